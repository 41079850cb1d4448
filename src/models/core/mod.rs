//! Core domain models for balance monitoring.
//!
//! This module contains the fundamental data structures that represent:
//! - Activities: Balance changes reported by a monitor and retrieval range types
//! - Networks: Network definitions the monitor is attached to
//! - Fees: Fee level and fee rate vocabulary of payments transactions
//! - Transactions: Transaction status and shared transaction records

mod activity;
mod fee;
mod network;
mod transaction;

pub use activity::{
	ActivityKey, BalanceActivity, BalanceActivityCallback, BalanceActivityType,
	GetBalanceActivityOptions, RetrievalCallback, RetrieveBalanceActivitiesResult,
};
pub use fee::{
	CreateTransactionOptions, FeeLevel, FeeOption, FeeOptionCustom, FeeOptionLevel, FeeRateType,
	PresetFeeLevel, ResolvedFeeOption,
};
pub use network::{AddressOrIndex, BaseConfig, Network, NetworkType, DEFAULT_FEED_BUFFER_SIZE};
pub use transaction::{
	BalanceResult, BaseBroadcastResult, BaseTransactionInfo, TransactionCommon, TransactionStatus,
};
