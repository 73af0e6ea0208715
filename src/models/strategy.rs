//! Alternative calculation strategies.
//!
//! Two equipment cost models, two transport formulas and two buffer formulas
//! exist side by side. Each enum's `Default` is the system default; the other
//! variant is an alternate configuration that must be selected explicitly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Residual value assumed by the residual/financing cost model (20%).
pub const DEFAULT_RESIDUAL_FRACTION: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// How ownership cost per hour is derived from purchase and financing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum EquipmentCostModel {
    /// Straight-line depreciation to zero residual plus amortized insurance.
    /// Financing terms are ignored.
    #[default]
    StraightLine,
    /// Depreciation down to a residual fraction of the purchase price, plus
    /// annual financing interest and amortized insurance.
    ResidualFinanced {
        /// Fraction of the purchase price retained at end of life.
        residual_fraction: Decimal,
    },
}

impl EquipmentCostModel {
    /// The residual/financing model with the default 20% residual value.
    pub fn residual_financed() -> Self {
        EquipmentCostModel::ResidualFinanced {
            residual_fraction: DEFAULT_RESIDUAL_FRACTION,
        }
    }

    /// Identifier used in audit output.
    pub fn id(&self) -> &'static str {
        match self {
            EquipmentCostModel::StraightLine => "straight_line",
            EquipmentCostModel::ResidualFinanced { .. } => "residual_financed",
        }
    }
}

/// How one-way drive time is turned into billable transport hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TransportMode {
    /// Round trip converted to hours: `minutes × 2 / 60`.
    #[default]
    RoundTripMinutes,
    /// Round trip scaled by an explicit rate: `minutes × 2 × transport_rate`.
    Scaled {
        /// Multiplier applied to the round-trip minutes.
        transport_rate: Decimal,
    },
}

/// Which hours the buffer percentage is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BufferMode {
    /// Buffer production hours only.
    #[default]
    ProductionOnly,
    /// Buffer production and transport hours together.
    ProductionAndTransport,
}

/// The transport and buffer formulas used for one pricing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PricingOptions {
    /// Transport formula.
    #[serde(default)]
    pub transport: TransportMode,
    /// Buffer formula.
    #[serde(default)]
    pub buffer: BufferMode,
}

/// What loadout aggregation does with references that do not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingMemberPolicy {
    /// Exclude the member from the totals and emit a warning.
    #[default]
    ExcludeAndFlag,
    /// Fail the aggregation.
    Fail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults_are_primary_variants() {
        assert_eq!(EquipmentCostModel::default(), EquipmentCostModel::StraightLine);
        assert_eq!(TransportMode::default(), TransportMode::RoundTripMinutes);
        assert_eq!(BufferMode::default(), BufferMode::ProductionOnly);
        assert_eq!(MissingMemberPolicy::default(), MissingMemberPolicy::ExcludeAndFlag);
    }

    #[test]
    fn test_default_residual_fraction_is_twenty_percent() {
        assert_eq!(DEFAULT_RESIDUAL_FRACTION, Decimal::from_str("0.20").unwrap());
    }

    #[test]
    fn test_cost_model_deserializes_tagged() {
        let model: EquipmentCostModel = serde_json::from_str(
            r#"{"model": "residual_financed", "residual_fraction": "0.25"}"#,
        )
        .unwrap();
        assert_eq!(
            model,
            EquipmentCostModel::ResidualFinanced {
                residual_fraction: Decimal::from_str("0.25").unwrap()
            }
        );
        assert_eq!(model.id(), "residual_financed");
    }

    #[test]
    fn test_pricing_options_default_when_empty() {
        let options: PricingOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, PricingOptions::default());
    }

    #[test]
    fn test_scaled_transport_deserializes() {
        let mode: TransportMode =
            serde_json::from_str(r#"{"mode": "scaled", "transport_rate": "0.02"}"#).unwrap();
        assert_eq!(
            mode,
            TransportMode::Scaled {
                transport_rate: Decimal::from_str("0.02").unwrap()
            }
        );
    }
}
