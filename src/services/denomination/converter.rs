//! Exact conversion between base and main denominations.
//!
//! Base units are integers that routinely exceed the range `f64` can represent
//! exactly (10^18 wei is one ether), so every conversion is a power-of-ten scale
//! shift on an arbitrary-precision [`BigDecimal`]. Native floats only appear in the
//! `_number` variants, which exist for display and estimation.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use super::error::{ConversionDirection, DenominationError, InvalidAmountReason};

/// A numeric amount in any of the representations callers hand us
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
	Text(String),
	Float(f64),
	Decimal(BigDecimal),
}

impl Numeric {
	fn parse(&self, direction: ConversionDirection) -> Result<BigDecimal, DenominationError> {
		let value = match self {
			Self::Text(text) => parse_text(text, direction)?,
			Self::Float(value) => {
				if value.is_nan() {
					return Err(DenominationError::invalid_amount(
						direction,
						InvalidAmountReason::NotANumber,
						value.to_string(),
					));
				}
				if value.is_infinite() {
					return Err(DenominationError::invalid_amount(
						direction,
						InvalidAmountReason::NotFinite,
						value.to_string(),
					));
				}
				// Display yields the shortest decimal that round-trips, so 0.1 stays 0.1
				parse_text(&value.to_string(), direction)?
			}
			Self::Decimal(value) => value.clone(),
		};
		within_range(value, direction, || self.describe())
	}

	/// Input as shown in errors. Decimals are rendered as `digits`e`exponent` so huge
	/// exponents are never expanded.
	fn describe(&self) -> String {
		match self {
			Self::Text(text) => text.clone(),
			Self::Float(value) => value.to_string(),
			Self::Decimal(value) => {
				let (digits, scale) = value.as_bigint_and_exponent();
				format!("{}e{}", digits, -i128::from(scale))
			}
		}
	}
}

/// Largest power of ten an amount may reach, in either direction
///
/// Larger magnitudes are rejected as not finite, smaller ones flush to zero.
pub const MAX_EXPONENT: i64 = 1_000_000;

/// Rejects values whose most significant digit lies above `10^MAX_EXPONENT` and
/// flushes values below `10^-MAX_EXPONENT` to zero.
fn within_range(
	value: BigDecimal,
	direction: ConversionDirection,
	input: impl FnOnce() -> String,
) -> Result<BigDecimal, DenominationError> {
	if value == BigDecimal::from(0) {
		return Ok(BigDecimal::from(0));
	}

	let (_, scale) = value.as_bigint_and_exponent();
	let exponent = i64::try_from(value.digits())
		.ok()
		.and_then(|digits| (digits - 1).checked_sub(scale));

	match exponent {
		Some(exponent) if exponent < -MAX_EXPONENT => Ok(BigDecimal::from(0)),
		Some(exponent) if exponent <= MAX_EXPONENT => Ok(value),
		_ => Err(DenominationError::invalid_amount(
			direction,
			InvalidAmountReason::NotFinite,
			input(),
		)),
	}
}

fn parse_text(text: &str, direction: ConversionDirection) -> Result<BigDecimal, DenominationError> {
	let trimmed = text.trim();
	let unsigned = trimmed.trim_start_matches(['+', '-']);

	if unsigned.eq_ignore_ascii_case("infinity") || unsigned.eq_ignore_ascii_case("inf") {
		return Err(DenominationError::invalid_amount(
			direction,
			InvalidAmountReason::NotFinite,
			text,
		));
	}

	BigDecimal::from_str(trimmed).map_err(|_| {
		DenominationError::invalid_amount(direction, InvalidAmountReason::NotANumber, text)
	})
}

impl From<&str> for Numeric {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Numeric {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&String> for Numeric {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

impl From<f64> for Numeric {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<BigDecimal> for Numeric {
	fn from(value: BigDecimal) -> Self {
		Self::Decimal(value)
	}
}

impl From<&BigDecimal> for Numeric {
	fn from(value: &BigDecimal) -> Self {
		Self::Decimal(value.clone())
	}
}

macro_rules! numeric_from_integer {
	($($t:ty),*) => {
		$(
			impl From<$t> for Numeric {
				fn from(value: $t) -> Self {
					Self::Decimal(BigDecimal::from(value))
				}
			}
		)*
	};
}

numeric_from_integer!(u32, u64, u128, i32, i64, i128);

/// Converts amounts for an asset with a fixed number of decimal places
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConverter {
	decimals: u32,
	base_per_main: BigDecimal,
}

impl UnitConverter {
	pub fn new(decimals: u32) -> Self {
		Self {
			decimals,
			base_per_main: BigDecimal::new(1.into(), -i64::from(decimals)),
		}
	}

	pub fn decimals(&self) -> u32 {
		self.decimals
	}

	/// Number of base units in one main unit, i.e. `10^decimals`
	pub fn base_per_main(&self) -> &BigDecimal {
		&self.base_per_main
	}

	pub fn to_main_denomination_decimal(
		&self,
		base: impl Into<Numeric>,
	) -> Result<BigDecimal, DenominationError> {
		shift(base.into(), i64::from(self.decimals), ConversionDirection::ToMain)
	}

	pub fn to_main_denomination_string(
		&self,
		base: impl Into<Numeric>,
	) -> Result<String, DenominationError> {
		Ok(format_plain(&self.to_main_denomination_decimal(base)?))
	}

	/// Lossy; use the string or decimal variant when exactness matters. Results
	/// beyond the `f64` range fail as not finite.
	pub fn to_main_denomination_number(
		&self,
		base: impl Into<Numeric>,
	) -> Result<f64, DenominationError> {
		let main_units = self.to_main_denomination_decimal(base)?;
		to_number(&main_units, ConversionDirection::ToMain)
	}

	pub fn to_base_denomination_decimal(
		&self,
		main: impl Into<Numeric>,
	) -> Result<BigDecimal, DenominationError> {
		shift(main.into(), -i64::from(self.decimals), ConversionDirection::ToBase)
	}

	pub fn to_base_denomination_string(
		&self,
		main: impl Into<Numeric>,
	) -> Result<String, DenominationError> {
		Ok(format_plain(&self.to_base_denomination_decimal(main)?))
	}

	/// Lossy; use the string or decimal variant when exactness matters. Results
	/// beyond the `f64` range fail as not finite.
	pub fn to_base_denomination_number(
		&self,
		main: impl Into<Numeric>,
	) -> Result<f64, DenominationError> {
		let base_units = self.to_base_denomination_decimal(main)?;
		to_number(&base_units, ConversionDirection::ToBase)
	}
}

/// Build the converters for an asset with `decimals` decimal places
pub fn create_unit_converters(decimals: u32) -> UnitConverter {
	UnitConverter::new(decimals)
}

/// Divide `amount` by `10^places` (multiply when negative) without rounding.
///
/// Both the input and the result are held to [`MAX_EXPONENT`].
fn shift(
	amount: Numeric,
	places: i64,
	direction: ConversionDirection,
) -> Result<BigDecimal, DenominationError> {
	let value = amount.parse(direction)?;
	let (digits, scale) = value.into_bigint_and_exponent();
	let shifted = match scale.checked_add(places) {
		Some(scale) => BigDecimal::new(digits, scale).normalized(),
		None => {
			return Err(DenominationError::invalid_amount(
				direction,
				InvalidAmountReason::NotFinite,
				amount.describe(),
			))
		}
	};
	within_range(shifted, direction, || amount.describe())
}

/// Render a decimal in positional notation with no trailing fractional zeros.
///
/// `BigDecimal`'s `Display` switches to exponent notation for very small and very
/// large magnitudes, which is not a valid amount string. The output grows with the
/// exponent; conversion results stay within [`MAX_EXPONENT`].
pub fn format_plain(value: &BigDecimal) -> String {
	let (digits, scale) = value.as_bigint_and_exponent();
	let text = digits.to_string();
	let (negative, magnitude) = match text.strip_prefix('-') {
		Some(magnitude) => (true, magnitude.to_string()),
		None => (false, text),
	};

	if magnitude == "0" {
		return "0".to_string();
	}

	let body = if scale <= 0 {
		let zeros = "0".repeat(scale.unsigned_abs() as usize);
		format!("{}{}", magnitude, zeros)
	} else {
		let scale = scale as usize;
		let padded = if magnitude.len() <= scale {
			format!("{}{}", "0".repeat(scale + 1 - magnitude.len()), magnitude)
		} else {
			magnitude
		};
		let (integer, fraction) = padded.split_at(padded.len() - scale);
		let fraction = fraction.trim_end_matches('0');
		if fraction.is_empty() {
			integer.to_string()
		} else {
			format!("{}.{}", integer, fraction)
		}
	};

	if negative {
		format!("-{}", body)
	} else {
		body
	}
}

fn to_number(value: &BigDecimal, direction: ConversionDirection) -> Result<f64, DenominationError> {
	let plain = format_plain(value);
	let number = plain.parse::<f64>().map_err(|_| {
		DenominationError::invalid_amount(direction, InvalidAmountReason::NotANumber, plain.clone())
	})?;
	if !number.is_finite() {
		return Err(DenominationError::invalid_amount(
			direction,
			InvalidAmountReason::NotFinite,
			plain,
		));
	}
	Ok(number)
}
