use serde::{Deserialize, Deserializer, Serialize};

/// Fee priority a transaction is created with
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeLevel {
	Custom,
	Low,
	Medium,
	High,
}

/// Unit a fee rate is expressed in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeRateType {
	#[serde(rename = "main")]
	Main,
	#[serde(rename = "base")]
	Base,
	#[serde(rename = "base/weight")]
	BasePerWeight,
}

/// Preset fee levels, i.e. every [`FeeLevel`] except `Custom`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetFeeLevel {
	Low,
	Medium,
	High,
}

impl From<PresetFeeLevel> for FeeLevel {
	fn from(level: PresetFeeLevel) -> Self {
		match level {
			PresetFeeLevel::Low => FeeLevel::Low,
			PresetFeeLevel::Medium => FeeLevel::Medium,
			PresetFeeLevel::High => FeeLevel::High,
		}
	}
}

/// Explicit fee rate chosen by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOptionCustom {
	pub fee_rate: String,
	pub fee_rate_type: FeeRateType,
	#[serde(
		default,
		deserialize_with = "deserialize_custom_level",
		skip_serializing_if = "Option::is_none"
	)]
	pub fee_level: Option<FeeLevel>,
}

/// Fee chosen by preset level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeOptionLevel {
	pub fee_level: PresetFeeLevel,
}

/// How the fee of a new transaction is determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeOption {
	Custom(FeeOptionCustom),
	Level(FeeOptionLevel),
}

pub type CreateTransactionOptions = FeeOption;

impl FeeOption {
	pub fn fee_level(&self) -> FeeLevel {
		match self {
			Self::Custom(_) => FeeLevel::Custom,
			Self::Level(option) => option.fee_level.into(),
		}
	}
}

/// A fee option after estimation, with the fee in both denominations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFeeOption {
	pub target_fee_level: FeeLevel,
	pub target_fee_rate: String,
	pub target_fee_rate_type: FeeRateType,
	pub fee_base: String,
	pub fee_main: String,
}

fn deserialize_custom_level<'de, D>(deserializer: D) -> Result<Option<FeeLevel>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<FeeLevel>::deserialize(deserializer)? {
		None | Some(FeeLevel::Custom) => Ok(Some(FeeLevel::Custom)),
		Some(other) => Err(serde::de::Error::custom(format!(
			"custom fee option cannot have fee level {:?}",
			other
		))),
	}
}
