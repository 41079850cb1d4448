//! Network collaborator interface.
//!
//! A balance monitor does no chain I/O of its own. Everything it needs from a
//! network (the live transaction feed, address subscriptions and historical
//! transaction queries) goes through [`BalanceNetworkClient`].

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::services::blockchain::BlockChainError;

/// Sending half of the live feed. The network pushes every raw transaction touching a
/// subscribed address into it as the transaction is seen.
pub type TransactionSender = mpsc::Sender<Value>;

/// Raw transactions returned by a historical query, in ascending block order
pub type TransactionStream = BoxStream<'static, Result<Value, BlockChainError>>;

/// Block heights a network can currently serve history for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
	/// Oldest retained block
	pub earliest: u64,
	/// Most recent block
	pub latest: u64,
}

impl BlockRange {
	pub fn new(earliest: u64, latest: u64) -> Self {
		Self { earliest, latest }
	}
}

/// Defines the interface a balance monitor requires from a network
///
/// Implementations wrap a chain-specific node connection and hand back raw
/// transactions as JSON objects already fetched and parsed by the network layer.
#[async_trait]
pub trait BalanceNetworkClient: Send + Sync {
	/// Establishes the connections required for live tracking
	///
	/// # Arguments
	/// * `feed` - Where live raw transactions are pushed until `disconnect` is called
	async fn connect(&self, feed: TransactionSender) -> Result<(), BlockChainError>;

	/// Tears down every connection established by `connect`
	///
	/// Must be safe to call when `connect` failed or was never called.
	async fn disconnect(&self) -> Result<(), BlockChainError>;

	/// Starts pushing transactions touching `addresses` into the live feed
	async fn subscribe_addresses(&self, addresses: &[String]) -> Result<(), BlockChainError>;

	/// Retrieves the range of blocks the network retains history for
	async fn get_retained_range(&self) -> Result<BlockRange, BlockChainError>;

	/// Streams the raw transactions involving `address` in blocks `from..=to`
	///
	/// # Note
	/// Transactions must be yielded in ascending block order.
	async fn get_address_transactions(
		&self,
		address: &str,
		from: u64,
		to: u64,
	) -> Result<TransactionStream, BlockChainError>;
}
