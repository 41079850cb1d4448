//! Network collaborator error types and handling.
//!
//! Errors raised by the network layer a balance monitor delegates chain I/O to,
//! covering connectivity and request processing.

use thiserror::Error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// Errors related to malformed requests or invalid responses
	#[error("Request error: {0}")]
	RequestError(String),
}

impl BlockChainError {
	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		tracing::error!(error = %error, "Blockchain connection failed");
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		tracing::error!(error = %error, "Blockchain request failed");
		error
	}
}
