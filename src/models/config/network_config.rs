use std::path::Path;

use crate::models::{ConfigLoader, Network};

use super::error::ConfigError;

/// Largest supported power of ten between base and main denomination
const MAX_DECIMALS: u32 = 36;

const DEFAULT_NETWORK_DIR: &str = "config/networks";

impl ConfigLoader for Network {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let network_dir = path.unwrap_or(Path::new(DEFAULT_NETWORK_DIR));
		let mut pairs = Vec::new();

		if !network_dir.exists() {
			return Err(ConfigError::file_error(format!(
				"networks directory not found: {}",
				network_dir.display()
			)));
		}

		for entry in std::fs::read_dir(network_dir)? {
			let entry = entry?;
			let path = entry.path();

			if !Self::is_json_file(&path) {
				continue;
			}

			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			match Self::load_from_path(&path) {
				Ok(network) => pairs.push((name, network)),
				Err(e) => tracing::warn!(
					path = %path.display(),
					error = %e,
					"Skipping invalid network configuration"
				),
			}
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: Network = serde_json::from_reader(file)?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.slug.is_empty()
			|| !self
				.slug
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
		{
			return Err(ConfigError::validation_error(
				"Slug must contain only lowercase letters, numbers, and underscores",
			));
		}

		if self.name.trim().is_empty() {
			return Err(ConfigError::validation_error("Name must not be empty"));
		}

		if self.network_symbol.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Network symbol must not be empty",
			));
		}

		if matches!(&self.asset_symbol, Some(symbol) if symbol.trim().is_empty()) {
			return Err(ConfigError::validation_error(
				"Asset symbol must not be empty when provided",
			));
		}

		if self.decimals > MAX_DECIMALS {
			return Err(ConfigError::validation_error(format!(
				"Decimals must be at most {}",
				MAX_DECIMALS
			)));
		}

		if self.feed_buffer_size == Some(0) {
			return Err(ConfigError::validation_error(
				"feed_buffer_size must be greater than 0",
			));
		}

		Ok(())
	}
}
