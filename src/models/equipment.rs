//! Equipment model and cost inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fuel cost of running the equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FuelCost {
    /// A flat fuel cost per operating hour.
    PerHour {
        /// Dollars per hour.
        cost_per_hour: Decimal,
    },
    /// Fuel burn rate times fuel price.
    BurnRate {
        /// Gallons burned per operating hour.
        gallons_per_hour: Decimal,
        /// Dollars per gallon.
        price_per_gallon: Decimal,
    },
}

/// Maintenance cost of the equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaintenanceCost {
    /// A flat maintenance cost per operating hour.
    PerHour {
        /// Dollars per hour.
        cost_per_hour: Decimal,
    },
    /// Annual maintenance-tier base cost plus oil changes, amortized over
    /// annual operating hours.
    Scheduled {
        /// Annual base cost of the maintenance tier.
        annual_base_cost: Decimal,
        /// Oil changes per year.
        oil_changes_per_year: u32,
        /// Cost of a single oil change.
        oil_change_cost: Decimal,
    },
}

/// Loan terms used by the residual/financing cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financing {
    /// Annual percentage rate as a fraction (0.07 = 7%).
    pub apr: Decimal,
    /// Loan term in months.
    pub term_months: u32,
    /// Amount paid up front.
    #[serde(default)]
    pub down_payment: Decimal,
}

/// Everything needed to derive an hourly cost for a piece of equipment.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::{EquipmentCostInputs, FuelCost, MaintenanceCost};
/// use rust_decimal::Decimal;
///
/// let inputs = EquipmentCostInputs {
///     purchase_price: Decimal::new(100_000, 0),
///     useful_life_years: Decimal::new(5, 0),
///     annual_hours: Decimal::new(1200, 0),
///     insurance_annual: Decimal::new(3000, 0),
///     fuel: FuelCost::PerHour { cost_per_hour: Decimal::new(12, 0) },
///     maintenance: MaintenanceCost::PerHour { cost_per_hour: Decimal::new(8, 0) },
///     financing: None,
/// };
/// assert!(inputs.financing.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostInputs {
    /// Purchase price in dollars.
    pub purchase_price: Decimal,
    /// Useful life in years. Must be greater than zero.
    pub useful_life_years: Decimal,
    /// Operating hours per year. Must be greater than zero.
    pub annual_hours: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance_annual: Decimal,
    /// Fuel cost.
    pub fuel: FuelCost,
    /// Maintenance cost.
    pub maintenance: MaintenanceCost,
    /// Optional loan terms.
    #[serde(default)]
    pub financing: Option<Financing>,
}

/// A piece of equipment that can be assigned to loadouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique identifier for the equipment.
    pub id: String,
    /// Display name (e.g. "2019 Altec LR756 bucket truck").
    pub name: String,
    /// Cost inputs.
    pub inputs: EquipmentCostInputs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_per_hour_inputs() {
        let json = r#"{
            "purchase_price": "100000",
            "useful_life_years": "5",
            "annual_hours": "1200",
            "insurance_annual": "3000",
            "fuel": {"type": "per_hour", "cost_per_hour": "12"},
            "maintenance": {"type": "per_hour", "cost_per_hour": "8"}
        }"#;

        let inputs: EquipmentCostInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.purchase_price, dec("100000"));
        assert_eq!(
            inputs.fuel,
            FuelCost::PerHour {
                cost_per_hour: dec("12")
            }
        );
        assert!(inputs.financing.is_none());
    }

    #[test]
    fn test_deserialize_detailed_inputs_with_financing() {
        let json = r#"{
            "purchase_price": "85000",
            "useful_life_years": "8",
            "annual_hours": "1000",
            "fuel": {"type": "burn_rate", "gallons_per_hour": "3.5", "price_per_gallon": "4.10"},
            "maintenance": {
                "type": "scheduled",
                "annual_base_cost": "2500",
                "oil_changes_per_year": 4,
                "oil_change_cost": "150"
            },
            "financing": {"apr": "0.07", "term_months": 60, "down_payment": "15000"}
        }"#;

        let inputs: EquipmentCostInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.insurance_annual, Decimal::ZERO);
        assert_eq!(
            inputs.maintenance,
            MaintenanceCost::Scheduled {
                annual_base_cost: dec("2500"),
                oil_changes_per_year: 4,
                oil_change_cost: dec("150"),
            }
        );
        let financing = inputs.financing.unwrap();
        assert_eq!(financing.term_months, 60);
        assert_eq!(financing.down_payment, dec("15000"));
    }

    #[test]
    fn test_financing_down_payment_defaults_to_zero() {
        let financing: Financing =
            serde_json::from_str(r#"{"apr": "0.05", "term_months": 36}"#).unwrap();
        assert_eq!(financing.down_payment, Decimal::ZERO);
    }
}
