//! Core services of the balance monitor.
//!
//! - `blockchain`: Interface to the network layer supplying raw transactions
//! - `denomination`: Exact base/main denomination conversion
//! - `monitor`: Balance monitor contract and implementation

pub mod blockchain;
pub mod denomination;
pub mod monitor;
