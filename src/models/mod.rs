//! Domain models and data structures for balance monitoring.
//!
//! This module contains all the core data structures used throughout the crate:
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (BalanceActivity, Network, fees, transactions)

mod config;
mod core;

// Re-export core types
pub use core::{
	ActivityKey, AddressOrIndex, BalanceActivity, BalanceActivityCallback, BalanceActivityType,
	BalanceResult, BaseBroadcastResult, BaseConfig, BaseTransactionInfo, CreateTransactionOptions,
	FeeLevel, FeeOption, FeeOptionCustom, FeeOptionLevel, FeeRateType, GetBalanceActivityOptions,
	Network, NetworkType, PresetFeeLevel, ResolvedFeeOption, RetrievalCallback,
	RetrieveBalanceActivitiesResult, TransactionCommon, TransactionStatus,
	DEFAULT_FEED_BUFFER_SIZE,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader};
