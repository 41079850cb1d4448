//! Balance activity data structures.
//!
//! A [`BalanceActivity`] describes a single inbound or outbound movement of value
//! affecting one address. Activities are produced by a balance monitor and handed to
//! the caller; they are never retained by the monitor itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, ops::ControlFlow, sync::Arc};

use crate::models::NetworkType;

/// Direction of value flow relative to the activity's address
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceActivityType {
	/// Value received by the address
	In,
	/// Value sent from the address
	Out,
}

impl fmt::Display for BalanceActivityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::In => write!(f, "in"),
			Self::Out => write!(f, "out"),
		}
	}
}

/// A single confirmed or pending change to an address's balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceActivity {
	/// The affected address
	pub address: String,

	/// Direction of the value flow
	#[serde(rename = "type")]
	pub activity_type: BalanceActivityType,

	/// Network the activity occurred on
	pub network_type: NetworkType,

	/// Symbol of the network's native asset
	pub network_symbol: String,

	/// Symbol of the asset that moved
	pub asset_symbol: String,

	/// Identifier of the originating transaction
	pub transaction_id: String,

	/// Identifier of the block containing the transaction
	pub confirmation_id: Option<String>,

	/// Height of the block containing the transaction
	pub confirmation_number: Option<u64>,

	/// Timestamp of the block containing the transaction
	pub confirmation_timestamp: Option<DateTime<Utc>>,

	/// Signed amount in main denomination. Negative for outbound activity.
	pub amount: String,

	/// Memo, tag or sub-account identifier sharing `address`
	pub extra_id: Option<String>,
}

impl BalanceActivity {
	/// Identity of the logical activity. Re-delivered activities share the same key.
	pub fn key(&self) -> ActivityKey {
		ActivityKey {
			transaction_id: self.transaction_id.clone(),
			address: self.address.clone(),
			activity_type: self.activity_type,
		}
	}

	/// Whether the activity has been included in a block
	pub fn is_confirmed(&self) -> bool {
		self.confirmation_number.is_some()
	}
}

/// Deduplication key of a [`BalanceActivity`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityKey {
	pub transaction_id: String,
	pub address: String,
	pub activity_type: BalanceActivityType,
}

/// Block range filter for historical retrieval.
///
/// A missing bound means the range is unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalanceActivityOptions {
	pub from: Option<u64>,
	pub to: Option<u64>,
}

impl GetBalanceActivityOptions {
	pub fn new(from: Option<u64>, to: Option<u64>) -> Self {
		Self { from, to }
	}

	/// Range starting at `from` with no upper bound
	pub fn from_block(from: u64) -> Self {
		Self {
			from: Some(from),
			to: None,
		}
	}

	/// Range covering `from..=to`
	pub fn between(from: u64, to: u64) -> Self {
		Self {
			from: Some(from),
			to: Some(to),
		}
	}
}

/// The block range a historical retrieval actually covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveBalanceActivitiesResult {
	pub from: u64,
	pub to: u64,
}

impl RetrieveBalanceActivitiesResult {
	/// True when no block was covered, i.e. the requested range was entirely outside
	/// the history available on the network.
	pub fn is_empty(&self) -> bool {
		self.from > self.to
	}
}

/// Listener for live balance activity
pub type BalanceActivityCallback = Arc<dyn Fn(&BalanceActivity) + Send + Sync>;

/// Consumer of a historical retrieval stream.
///
/// Returning `ControlFlow::Break(())` stops the retrieval early. Returning an error
/// aborts it and the error is propagated to the caller.
pub type RetrievalCallback<'a> =
	dyn FnMut(BalanceActivity) -> Result<ControlFlow<()>, anyhow::Error> + Send + 'a;
