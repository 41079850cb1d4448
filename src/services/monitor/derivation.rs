//! Derivation of balance activity from raw network transactions.
//!
//! The network layer hands over transactions as JSON objects of the shape
//!
//! ```json
//! {
//!   "id": "…",
//!   "from": "sender address",
//!   "outputs": [{ "address": "…", "amount": "base units", "extraId": "memo" }],
//!   "fee": "base units",
//!   "status": "confirmed",
//!   "blockId": "…",
//!   "blockHeight": 123,
//!   "blockTime": "2024-01-01T00:00:00Z"
//! }
//! ```
//!
//! Amounts are in base units and may be strings or JSON numbers. Nothing here
//! performs I/O.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{
	models::{BalanceActivity, BalanceActivityType, Network, TransactionStatus},
	services::{
		denomination::{format_plain, Numeric, UnitConverter},
		monitor::BalanceMonitorError,
	},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
	Text(String),
	Number(serde_json::Number),
}

impl RawAmount {
	fn to_numeric(&self) -> Numeric {
		match self {
			Self::Text(text) => Numeric::from(text),
			Self::Number(number) => Numeric::from(number.to_string()),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutput {
	address: String,
	amount: RawAmount,
	extra_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransaction {
	id: String,
	from: Option<String>,
	#[serde(default)]
	outputs: Vec<RawOutput>,
	fee: Option<RawAmount>,
	status: TransactionStatus,
	asset_symbol: Option<String>,
	block_id: Option<String>,
	block_height: Option<u64>,
	block_time: Option<DateTime<Utc>>,
}

/// Converts raw transactions of one network into balance activity
#[derive(Debug, Clone)]
pub struct ActivityDeriver {
	network: Network,
	converter: UnitConverter,
}

impl ActivityDeriver {
	pub fn new(network: Network) -> Self {
		let converter = UnitConverter::new(network.decimals);
		Self { network, converter }
	}

	pub fn network(&self) -> &Network {
		&self.network
	}

	pub fn converter(&self) -> &UnitConverter {
		&self.converter
	}

	/// Returns the activity `tx` causes on `address`.
	///
	/// Returns `None` when the transaction does not reference `address`, failed, was
	/// never signed, or moves no value for it. A sender's activity is everything that
	/// leaves the address: outputs to other addresses plus the fee. Outputs paying the
	/// sender back are change and are ignored.
	///
	/// # Errors
	/// `UnsupportedTransaction` when `tx` does not have the expected shape, carries an
	/// invalid amount, is confirmed without a block height, or pays `address` under
	/// conflicting extra ids.
	pub fn derive(
		&self,
		address: &str,
		tx: &Value,
	) -> Result<Option<BalanceActivity>, BalanceMonitorError> {
		let raw = RawTransaction::deserialize(tx).map_err(|e| {
			BalanceMonitorError::unsupported_transaction(format!(
				"unrecognized transaction shape: {}",
				e
			))
		})?;

		match raw.status {
			TransactionStatus::Failed | TransactionStatus::Unsigned => {
				tracing::debug!(
					transaction_id = %raw.id,
					status = %raw.status,
					"Transaction has no balance effect"
				);
				return Ok(None);
			}
			TransactionStatus::Signed | TransactionStatus::Pending | TransactionStatus::Confirmed => {}
		}

		let is_sender = raw.from.as_deref() == Some(address);
		let received: Vec<&RawOutput> = raw
			.outputs
			.iter()
			.filter(|output| output.address == address)
			.collect();

		if !is_sender && received.is_empty() {
			return Ok(None);
		}

		let (confirmation_id, confirmation_number, confirmation_timestamp) = match raw.status {
			TransactionStatus::Confirmed => {
				let height = raw.block_height.ok_or_else(|| {
					BalanceMonitorError::unsupported_transaction(format!(
						"transaction {} is confirmed but has no block height",
						raw.id
					))
				})?;
				(raw.block_id.clone(), Some(height), raw.block_time)
			}
			_ => (None, None, None),
		};

		let (activity_type, amount, extra_id) = if is_sender {
			let mut sent = self.sum_outputs(
				&raw.id,
				raw.outputs.iter().filter(|output| output.address != address),
			)?;
			if let Some(fee) = &raw.fee {
				sent = sent + self.to_main(&raw.id, fee)?;
			}
			(BalanceActivityType::Out, -sent, None)
		} else {
			let extra_id = single_extra_id(&raw.id, &received)?;
			let total = self.sum_outputs(&raw.id, received.iter().copied())?;
			(BalanceActivityType::In, total, extra_id)
		};

		if amount == BigDecimal::from(0) {
			return Ok(None);
		}

		Ok(Some(BalanceActivity {
			address: address.to_string(),
			activity_type,
			network_type: self.network.network_type,
			network_symbol: self.network.network_symbol.clone(),
			asset_symbol: raw
				.asset_symbol
				.unwrap_or_else(|| self.network.asset_symbol().to_string()),
			transaction_id: raw.id,
			confirmation_id,
			confirmation_number,
			confirmation_timestamp,
			amount: format_plain(&amount),
			extra_id,
		}))
	}

	fn sum_outputs<'a>(
		&self,
		transaction_id: &str,
		outputs: impl Iterator<Item = &'a RawOutput>,
	) -> Result<BigDecimal, BalanceMonitorError> {
		let mut total = BigDecimal::from(0);
		for output in outputs {
			total = total + self.to_main(transaction_id, &output.amount)?;
		}
		Ok(total)
	}

	fn to_main(
		&self,
		transaction_id: &str,
		amount: &RawAmount,
	) -> Result<BigDecimal, BalanceMonitorError> {
		let value = self
			.converter
			.to_main_denomination_decimal(amount.to_numeric())
			.map_err(|e| {
				BalanceMonitorError::unsupported_transaction(format!(
					"transaction {} has an invalid amount: {}",
					transaction_id, e
				))
			})?;

		if value < BigDecimal::from(0) {
			return Err(BalanceMonitorError::unsupported_transaction(format!(
				"transaction {} has a negative amount",
				transaction_id
			)));
		}
		Ok(value)
	}
}

fn single_extra_id(
	transaction_id: &str,
	outputs: &[&RawOutput],
) -> Result<Option<String>, BalanceMonitorError> {
	let mut extra_ids = outputs.iter().map(|output| output.extra_id.as_deref());
	let first = extra_ids.next().flatten();
	if extra_ids.any(|extra_id| extra_id != first) {
		return Err(BalanceMonitorError::unsupported_transaction(format!(
			"transaction {} pays the address under conflicting extra ids",
			transaction_id
		)));
	}
	Ok(first.map(str::to_string))
}
