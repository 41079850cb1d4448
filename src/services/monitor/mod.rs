//! Balance monitoring.
//!
//! This module provides the balance monitor contract and its network-backed
//! implementation. It includes:
//! - The `BalanceMonitor` trait: live subscriptions, historical retrieval and
//!   transaction-to-activity derivation
//! - `NetworkBalanceMonitor`, delegating chain I/O to a network client
//! - Derivation of activity from raw transactions
//! - Fan-out of live activity to listeners
//! - Error handling specific to balance monitoring

mod balance_monitor;
mod derivation;
mod dispatcher;
mod error;
mod service;
mod state;

pub use balance_monitor::BalanceMonitor;
pub use derivation::ActivityDeriver;
pub use dispatcher::ActivityDispatcher;
pub use error::BalanceMonitorError;
pub use service::NetworkBalanceMonitor;
pub use state::MonitorState;
