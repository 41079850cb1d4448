//! Denomination conversion error types.

use std::fmt;
use thiserror::Error;

/// Which way an amount was being converted
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConversionDirection {
	/// Base units to main units
	ToMain,
	/// Main units to base units
	ToBase,
}

impl fmt::Display for ConversionDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ToMain => write!(f, "main"),
			Self::ToBase => write!(f, "base"),
		}
	}
}

/// Why an amount was rejected
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidAmountReason {
	NotANumber,
	NotFinite,
}

impl fmt::Display for InvalidAmountReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotANumber => write!(f, "not a number"),
			Self::NotFinite => write!(f, "not finite"),
		}
	}
}

/// Errors that can occur while converting between denominations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenominationError {
	#[error("Cannot convert to {direction} denomination - {reason}")]
	InvalidAmount {
		direction: ConversionDirection,
		reason: InvalidAmountReason,
		input: String,
	},
}

impl DenominationError {
	pub fn invalid_amount(
		direction: ConversionDirection,
		reason: InvalidAmountReason,
		input: impl Into<String>,
	) -> Self {
		let input = input.into();
		let error = Self::InvalidAmount {
			direction,
			reason,
			input: input.clone(),
		};
		tracing::error!(error = %error, input = %input, "Invalid amount");
		error
	}

	/// Direction of the failed conversion
	pub fn direction(&self) -> ConversionDirection {
		match self {
			Self::InvalidAmount { direction, .. } => *direction,
		}
	}
}
