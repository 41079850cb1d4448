//! Network collaborator interfaces.
//!
//! Provides the abstraction a balance monitor uses to reach a blockchain network:
//!
//! - Network client trait for live feeds, subscriptions and historical queries
//! - Error handling for blockchain operations

mod client;
mod error;

pub use client::{BalanceNetworkClient, BlockRange, TransactionSender, TransactionStream};
pub use error::BlockChainError;
