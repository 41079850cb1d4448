//! Balance monitor error types.

use thiserror::Error;

use crate::services::blockchain::BlockChainError;

/// Errors that can occur during balance monitor operations
#[derive(Debug, Error)]
pub enum BalanceMonitorError {
	/// An operation was attempted before `init` completed
	#[error("Balance monitor is not initialized, cannot {operation}")]
	NotInitialized { operation: &'static str },

	/// `init` was called on a monitor that is already initialized
	#[error("Balance monitor is already initialized")]
	AlreadyInitialized,

	/// An operation was attempted after `destroy`
	#[error("Balance monitor has been destroyed, cannot {operation}")]
	AlreadyDestroyed { operation: &'static str },

	/// A raw transaction could not be interpreted
	#[error("Unsupported transaction: {0}")]
	UnsupportedTransaction(String),

	/// The network failed while streaming historical activity
	#[error("Retrieval failure: {0}")]
	RetrievalFailure(String),

	/// The network failed to connect, subscribe or disconnect
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// The requested range starts after it ends
	#[error("Invalid block range: from {from} is greater than to {to}")]
	InvalidRange { from: u64, to: u64 },

	/// The retrieval callback failed
	#[error("Balance activity callback failed: {0}")]
	CallbackError(#[source] anyhow::Error),
}

impl BalanceMonitorError {
	/// Creates a new unsupported transaction error with logging
	pub fn unsupported_transaction(msg: impl Into<String>) -> Self {
		let error = Self::UnsupportedTransaction(msg.into());
		tracing::error!(error = %error, "Cannot interpret transaction");
		error
	}

	/// Creates a new retrieval failure with logging
	pub fn retrieval_failure(msg: impl Into<String>) -> Self {
		let error = Self::RetrievalFailure(msg.into());
		tracing::error!(error = %error, "Balance activity retrieval failed");
		error
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		tracing::error!(error = %error, "Balance monitor connection failed");
		error
	}

	/// Creates a new callback error with logging
	pub fn callback_error(source: anyhow::Error) -> Self {
		let error = Self::CallbackError(source);
		tracing::error!(error = %error, "Balance activity callback failed");
		error
	}
}

impl From<BlockChainError> for BalanceMonitorError {
	fn from(err: BlockChainError) -> Self {
		Self::connection_error(err.to_string())
	}
}
