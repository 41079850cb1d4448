//! Test helper utilities for raw network transactions
//!
//! - `RawTransactionBuilder`: Builder for the JSON transactions a network client yields

use serde_json::{json, Value};

/// Builder for creating raw transaction objects
pub struct RawTransactionBuilder {
	id: String,
	from: Option<String>,
	outputs: Vec<Value>,
	fee: Option<String>,
	status: String,
	block_id: Option<String>,
	block_height: Option<u64>,
	block_time: Option<String>,
}

impl Default for RawTransactionBuilder {
	fn default() -> Self {
		Self {
			id: "test_tx".to_string(),
			from: None,
			outputs: Vec::new(),
			fee: None,
			status: "confirmed".to_string(),
			block_id: Some("test_block".to_string()),
			block_height: Some(100),
			block_time: Some("2024-01-01T00:00:00Z".to_string()),
		}
	}
}

impl RawTransactionBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn id(mut self, id: &str) -> Self {
		self.id = id.to_string();
		self
	}

	pub fn from(mut self, address: &str) -> Self {
		self.from = Some(address.to_string());
		self
	}

	pub fn output(mut self, address: &str, amount: &str) -> Self {
		self.outputs
			.push(json!({ "address": address, "amount": amount }));
		self
	}

	pub fn output_with_extra_id(mut self, address: &str, amount: &str, extra_id: &str) -> Self {
		self.outputs.push(json!({
			"address": address,
			"amount": amount,
			"extraId": extra_id,
		}));
		self
	}

	pub fn fee(mut self, fee: &str) -> Self {
		self.fee = Some(fee.to_string());
		self
	}

	pub fn status(mut self, status: &str) -> Self {
		self.status = status.to_string();
		self
	}

	pub fn confirmed(mut self, block_id: &str, height: u64) -> Self {
		self.status = "confirmed".to_string();
		self.block_id = Some(block_id.to_string());
		self.block_height = Some(height);
		self
	}

	/// Confirmed in block `height` with a block id derived from the height
	pub fn at_height(self, height: u64) -> Self {
		let block_id = format!("block_{}", height);
		self.confirmed(&block_id, height)
	}

	pub fn pending(mut self) -> Self {
		self.status = "pending".to_string();
		self.block_id = None;
		self.block_height = None;
		self.block_time = None;
		self
	}

	pub fn build(self) -> Value {
		json!({
			"id": self.id,
			"from": self.from,
			"outputs": self.outputs,
			"fee": self.fee,
			"status": self.status,
			"blockId": self.block_id,
			"blockHeight": self.block_height,
			"blockTime": self.block_time,
		})
	}
}
