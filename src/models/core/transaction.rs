use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a payments transaction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	Unsigned,
	Signed,
	Pending,
	Confirmed,
	Failed,
}

impl TransactionStatus {
	/// Whether the transaction has reached the network and can move funds
	pub fn is_broadcast(&self) -> bool {
		matches!(self, Self::Pending | Self::Confirmed | Self::Failed)
	}
}

impl fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let status = match self {
			Self::Unsigned => "unsigned",
			Self::Signed => "signed",
			Self::Pending => "pending",
			Self::Confirmed => "confirmed",
			Self::Failed => "failed",
		};
		write!(f, "{}", status)
	}
}

/// Fields shared by transactions in every stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCommon {
	pub id: Option<String>,
	pub from_address: Option<String>,
	pub to_address: Option<String>,
	pub to_extra_id: Option<String>,
	pub from_index: Option<u32>,
	pub to_index: Option<u32>,
	pub amount: Option<String>,
	pub fee: Option<String>,
	pub status: TransactionStatus,
}

/// A transaction as reported by the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTransactionInfo {
	#[serde(flatten)]
	pub common: TransactionCommon,
	pub is_executed: bool,
	pub is_confirmed: bool,
	pub confirmations: u64,
	pub confirmation_id: Option<String>,
	pub confirmation_timestamp: Option<DateTime<Utc>>,
	pub data: serde_json::Value,
}

/// Result of broadcasting a signed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseBroadcastResult {
	pub id: String,
}

/// Balance of an address in main denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResult {
	pub confirmed_balance: String,
	pub unconfirmed_balance: String,
	pub sweepable: bool,
}
