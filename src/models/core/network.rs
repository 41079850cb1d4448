use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a network carries real value or is used for testing
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
	#[default]
	Mainnet,
	Testnet,
}

impl fmt::Display for NetworkType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Mainnet => write!(f, "mainnet"),
			Self::Testnet => write!(f, "testnet"),
		}
	}
}

/// Configuration shared by every payments component
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
	pub network: Option<NetworkType>,
}

/// An address, or the index an address is derived from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AddressOrIndex {
	Address(String),
	Index(u32),
}

/// A network a balance monitor is attached to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Network {
	pub slug: String,
	pub name: String,
	pub network_type: NetworkType,
	/// Symbol of the native asset, e.g. BTC
	pub network_symbol: String,
	/// Symbol of the monitored asset. Defaults to `network_symbol`.
	pub asset_symbol: Option<String>,
	/// Power of ten between base and main denomination
	pub decimals: u32,
	/// Capacity of the live transaction feed
	pub feed_buffer_size: Option<usize>,
}

/// Default capacity of the live transaction feed
pub const DEFAULT_FEED_BUFFER_SIZE: usize = 1024;

impl Network {
	pub fn asset_symbol(&self) -> &str {
		self.asset_symbol.as_deref().unwrap_or(&self.network_symbol)
	}

	pub fn feed_buffer_size(&self) -> usize {
		self.feed_buffer_size.unwrap_or(DEFAULT_FEED_BUFFER_SIZE)
	}
}
