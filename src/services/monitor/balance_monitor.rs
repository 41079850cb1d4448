//! Balance monitor interface.
//!
//! A balance monitor tracks changes in the balance of addresses on chain. It keeps
//! no balance state: activities should be recorded by the caller (for instance in a
//! database) where a balance is the sum of the `amount` fields.
//!
//! Activity can be tracked two ways. For a live stream, subscribe addresses with
//! `subscribe_addresses` and listen with `on_balance_activity`. For history, use
//! `retrieve_balance_activities` with an optional block range.
//! `tx_to_balance_activity` converts a single raw transaction, which is useful for
//! recording the activity of a freshly sent transaction in advance.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
	models::{
		BalanceActivity, BalanceActivityCallback, GetBalanceActivityOptions, RetrievalCallback,
		RetrieveBalanceActivitiesResult,
	},
	services::monitor::BalanceMonitorError,
};

/// Defines the contract every balance monitor implements
///
/// Apart from `init`, every method fails with `NotInitialized` before `init`
/// succeeds and with `AlreadyDestroyed` after `destroy`.
#[async_trait]
pub trait BalanceMonitor: Send + Sync {
	/// Initializes the monitor and any connections it requires
	async fn init(&self) -> Result<(), BalanceMonitorError>;

	/// Tears down connections and stops live delivery
	///
	/// No listener is invoked after this resolves.
	async fn destroy(&self) -> Result<(), BalanceMonitorError>;

	/// Adds addresses to the set watched for live activity
	///
	/// Subscriptions accumulate across calls. Subscribing an address twice is a no-op.
	async fn subscribe_addresses(&self, addresses: &[String]) -> Result<(), BalanceMonitorError>;

	/// Registers a listener called once per live activity on any subscribed address
	///
	/// Activities are delivered in the order the network reports them. Historical
	/// retrieval never reaches these listeners.
	async fn on_balance_activity(
		&self,
		callback: BalanceActivityCallback,
	) -> Result<(), BalanceMonitorError>;

	/// Streams the historical activity of `address` to `callback`
	///
	/// Activities are delivered in ascending block order, each logical activity at
	/// most once per call. Resolves with the block range actually covered, which can
	/// be narrower than requested when the network no longer retains older blocks.
	/// When the callback stops early, the range ends at the block before the one the
	/// retrieval stopped in, since that block may not have been delivered in full.
	///
	/// # Arguments
	/// * `address` - The address to get activity of
	/// * `callback` - Receives each activity; may stop the retrieval early
	/// * `options` - Optional block range, defaults to the entire history
	async fn retrieve_balance_activities<'a>(
		&self,
		address: &str,
		callback: &mut RetrievalCallback<'a>,
		options: GetBalanceActivityOptions,
	) -> Result<RetrieveBalanceActivitiesResult, BalanceMonitorError>;

	/// Returns the activity a raw transaction causes on `address`
	///
	/// Returns `None` if the transaction does not apply to the address, has failed or
	/// otherwise moves no value for it. A transaction that cannot be interpreted fails
	/// with `UnsupportedTransaction`.
	///
	/// # Arguments
	/// * `address` - The address the activity should apply to
	/// * `tx` - The raw transaction object returned by the network
	async fn tx_to_balance_activity(
		&self,
		address: &str,
		tx: &Value,
	) -> Result<Option<BalanceActivity>, BalanceMonitorError>;
}
