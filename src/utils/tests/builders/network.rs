//! Test helper utilities for Network configuration
//!
//! - `NetworkBuilder`: Builder for creating test Network instances

use crate::models::{Network, NetworkType};

/// Builder for creating test Network instances
pub struct NetworkBuilder {
	network: Network,
}

impl Default for NetworkBuilder {
	fn default() -> Self {
		Self {
			network: Network {
				slug: "bitcoin_mainnet".to_string(),
				name: "Bitcoin Mainnet".to_string(),
				network_type: NetworkType::Mainnet,
				network_symbol: "BTC".to_string(),
				asset_symbol: None,
				decimals: 8,
				feed_buffer_size: None,
			},
		}
	}
}

impl NetworkBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn slug(mut self, slug: &str) -> Self {
		self.network.slug = slug.to_string();
		self
	}

	pub fn name(mut self, name: &str) -> Self {
		self.network.name = name.to_string();
		self
	}

	pub fn network_type(mut self, network_type: NetworkType) -> Self {
		self.network.network_type = network_type;
		self
	}

	pub fn network_symbol(mut self, symbol: &str) -> Self {
		self.network.network_symbol = symbol.to_string();
		self
	}

	pub fn asset_symbol(mut self, symbol: &str) -> Self {
		self.network.asset_symbol = Some(symbol.to_string());
		self
	}

	pub fn decimals(mut self, decimals: u32) -> Self {
		self.network.decimals = decimals;
		self
	}

	pub fn feed_buffer_size(mut self, size: usize) -> Self {
		self.network.feed_buffer_size = Some(size);
		self
	}

	pub fn build(self) -> Network {
		self.network
	}
}
