//! Balance activity monitoring for blockchain payments.
//!
//! Tracks balance changes ("balance activity") of watched addresses across
//! heterogeneous networks and converts amounts between a chain's base unit and its
//! main denomination without precision loss.
//!
//! # Architecture
//! - Models: Balance activity, network configuration and the payments type vocabulary
//! - Services: Denomination conversion, the network collaborator interface and the
//!   balance monitor itself
//! - Utils: Logging setup and test builders
//!
//! # Flow
//! 1. Load a `Network` configuration and wrap a network client
//! 2. `init` the monitor, `subscribe_addresses` and register `on_balance_activity` listeners
//! 3. Backfill history with `retrieve_balance_activities`
//! 4. Persist activities and sum their amounts to obtain balances

pub mod models;
pub mod services;
pub mod utils;
