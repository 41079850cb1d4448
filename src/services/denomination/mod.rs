//! Base and main denomination conversion.
//!
//! Provides exact conversion between an asset's indivisible base unit (satoshi, wei)
//! and its human-facing main unit (BTC, ETH) for a fixed number of decimal places.

mod converter;
mod error;

pub use converter::{
	create_unit_converters, format_plain, Numeric, UnitConverter, MAX_EXPONENT,
};
pub use error::{ConversionDirection, DenominationError, InvalidAmountReason};
