//! Equipment cost-per-hour calculation.
//!
//! Converts purchase, usage and financing inputs into ownership, operating
//! and total cost per operating hour, using one of the two
//! [`EquipmentCostModel`] strategies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::financing::annual_financing_interest;
use crate::error::{
    EngineError, EngineResult, checked_add, checked_div, checked_mul, require_non_negative,
    require_positive,
};
use crate::models::{AuditStep, EquipmentCostInputs, EquipmentCostModel, FuelCost, MaintenanceCost};

/// The hourly cost breakdown of a piece of equipment.
///
/// Derived data only: it is recomputed from the inputs on every call and
/// never cached by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostResult {
    /// Depreciation + financing + insurance per hour.
    pub ownership_cost_per_hour: Decimal,
    /// Fuel + maintenance per hour.
    pub operating_cost_per_hour: Decimal,
    /// Ownership + operating per hour.
    pub total_cost_per_hour: Decimal,
    /// Depreciation component of ownership cost.
    pub depreciation_per_hour: Decimal,
    /// Financing interest component of ownership cost.
    pub financing_per_hour: Decimal,
    /// Insurance component of ownership cost.
    pub insurance_per_hour: Decimal,
    /// Fuel component of operating cost.
    pub fuel_per_hour: Decimal,
    /// Maintenance component of operating cost.
    pub maintenance_per_hour: Decimal,
    /// The cost model that produced these figures.
    pub cost_model: EquipmentCostModel,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes ownership, operating and total cost per hour for equipment.
///
/// # Cost models
///
/// - [`EquipmentCostModel::StraightLine`]:
///   `purchase / (life × hours) + insurance / hours`. Financing is ignored.
/// - [`EquipmentCostModel::ResidualFinanced`]:
///   `purchase × (1 − residual) / (life × hours) + annual interest / hours
///   + insurance / hours`.
///
/// Operating cost is the same in both models: fuel per hour plus maintenance
/// per hour, where scheduled maintenance is
/// `(tier base + oil changes × oil change cost) / hours`.
///
/// # Errors
///
/// - `InvalidDivisor` if `annual_hours` or `useful_life_years` is not positive
/// - `InvalidInput` for negative money inputs or a residual fraction outside `[0, 1)`
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::compute_equipment_costs;
/// use tree_pricing_engine::models::{
///     EquipmentCostInputs, EquipmentCostModel, FuelCost, MaintenanceCost,
/// };
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = EquipmentCostInputs {
///     purchase_price: Decimal::from(100_000),
///     useful_life_years: Decimal::from(5),
///     annual_hours: Decimal::from(1200),
///     insurance_annual: Decimal::from(3000),
///     fuel: FuelCost::PerHour { cost_per_hour: Decimal::from(12) },
///     maintenance: MaintenanceCost::PerHour { cost_per_hour: Decimal::from(8) },
///     financing: None,
/// };
///
/// let result = compute_equipment_costs(&inputs, EquipmentCostModel::StraightLine, 1).unwrap();
/// assert_eq!(result.ownership_cost_per_hour.round_dp(3), Decimal::from_str("19.167").unwrap());
/// assert_eq!(result.operating_cost_per_hour, Decimal::from(20));
/// assert_eq!(result.total_cost_per_hour.round_dp(3), Decimal::from_str("39.167").unwrap());
/// ```
pub fn compute_equipment_costs(
    inputs: &EquipmentCostInputs,
    model: EquipmentCostModel,
    step_number: u32,
) -> EngineResult<EquipmentCostResult> {
    let annual_hours = require_positive("annual_hours", inputs.annual_hours)?;
    let useful_life_years = require_positive("useful_life_years", inputs.useful_life_years)?;
    let purchase_price = require_non_negative("purchase_price", inputs.purchase_price)?;
    let insurance_annual = require_non_negative("insurance_annual", inputs.insurance_annual)?;

    let lifetime_hours = checked_mul("useful_life_years", useful_life_years, annual_hours)?;
    let insurance_per_hour = checked_div("insurance_annual", insurance_annual, annual_hours)?;

    let (depreciation_per_hour, financing_per_hour) = match model {
        EquipmentCostModel::StraightLine => (
            checked_div("purchase_price", purchase_price, lifetime_hours)?,
            Decimal::ZERO,
        ),
        EquipmentCostModel::ResidualFinanced { residual_fraction } => {
            if residual_fraction < Decimal::ZERO || residual_fraction >= Decimal::ONE {
                return Err(EngineError::InvalidInput {
                    field: "residual_fraction".to_string(),
                    message: format!("must be in [0, 1) (got {})", residual_fraction),
                });
            }
            let depreciable =
                checked_mul("purchase_price", purchase_price, Decimal::ONE - residual_fraction)?;
            let financing = match &inputs.financing {
                Some(terms) => checked_div(
                    "financing",
                    annual_financing_interest(purchase_price, terms)?,
                    annual_hours,
                )?,
                None => Decimal::ZERO,
            };
            (checked_div("purchase_price", depreciable, lifetime_hours)?, financing)
        }
    };

    let fuel_per_hour = fuel_cost_per_hour(&inputs.fuel)?;
    let maintenance_per_hour = maintenance_cost_per_hour(&inputs.maintenance, annual_hours)?;

    let ownership_cost_per_hour = checked_add(
        "ownership_cost_per_hour",
        checked_add("ownership_cost_per_hour", depreciation_per_hour, financing_per_hour)?,
        insurance_per_hour,
    )?;
    let operating_cost_per_hour =
        checked_add("operating_cost_per_hour", fuel_per_hour, maintenance_per_hour)?;
    let total_cost_per_hour =
        checked_add("total_cost_per_hour", ownership_cost_per_hour, operating_cost_per_hour)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "equipment_cost".to_string(),
        rule_name: "Equipment Cost Per Hour".to_string(),
        formula: match model {
            EquipmentCostModel::StraightLine => {
                "purchase / (life × hours) + insurance / hours + fuel + maintenance".to_string()
            }
            EquipmentCostModel::ResidualFinanced { .. } => {
                "purchase × (1 − residual) / (life × hours) + interest / hours + insurance / hours + fuel + maintenance"
                    .to_string()
            }
        },
        input: serde_json::json!({
            "purchase_price": purchase_price.normalize().to_string(),
            "useful_life_years": useful_life_years.normalize().to_string(),
            "annual_hours": annual_hours.normalize().to_string(),
            "insurance_annual": insurance_annual.normalize().to_string(),
            "cost_model": model.id(),
            "financed": inputs.financing.is_some()
        }),
        output: serde_json::json!({
            "ownership_cost_per_hour": ownership_cost_per_hour.round_dp(4).normalize().to_string(),
            "operating_cost_per_hour": operating_cost_per_hour.round_dp(4).normalize().to_string(),
            "total_cost_per_hour": total_cost_per_hour.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "Ownership ${}/h (depreciation ${} + financing ${} + insurance ${}) + operating ${}/h (fuel ${} + maintenance ${}) = ${}/h",
            ownership_cost_per_hour.round_dp(2),
            depreciation_per_hour.round_dp(2),
            financing_per_hour.round_dp(2),
            insurance_per_hour.round_dp(2),
            operating_cost_per_hour.round_dp(2),
            fuel_per_hour.round_dp(2),
            maintenance_per_hour.round_dp(2),
            total_cost_per_hour.round_dp(2)
        ),
    };

    Ok(EquipmentCostResult {
        ownership_cost_per_hour,
        operating_cost_per_hour,
        total_cost_per_hour,
        depreciation_per_hour,
        financing_per_hour,
        insurance_per_hour,
        fuel_per_hour,
        maintenance_per_hour,
        cost_model: model,
        audit_step,
    })
}

fn fuel_cost_per_hour(fuel: &FuelCost) -> EngineResult<Decimal> {
    match *fuel {
        FuelCost::PerHour { cost_per_hour } => require_non_negative("fuel.cost_per_hour", cost_per_hour),
        FuelCost::BurnRate {
            gallons_per_hour,
            price_per_gallon,
        } => {
            let gallons = require_non_negative("fuel.gallons_per_hour", gallons_per_hour)?;
            let price = require_non_negative("fuel.price_per_gallon", price_per_gallon)?;
            checked_mul("fuel", gallons, price)
        }
    }
}

fn maintenance_cost_per_hour(
    maintenance: &MaintenanceCost,
    annual_hours: Decimal,
) -> EngineResult<Decimal> {
    match *maintenance {
        MaintenanceCost::PerHour { cost_per_hour } => {
            require_non_negative("maintenance.cost_per_hour", cost_per_hour)
        }
        MaintenanceCost::Scheduled {
            annual_base_cost,
            oil_changes_per_year,
            oil_change_cost,
        } => {
            let base = require_non_negative("maintenance.annual_base_cost", annual_base_cost)?;
            let oil = require_non_negative("maintenance.oil_change_cost", oil_change_cost)?;
            let oil_total = checked_mul("maintenance", Decimal::from(oil_changes_per_year), oil)?;
            let annual = checked_add("maintenance", base, oil_total)?;
            checked_div("maintenance", annual, annual_hours)
        }
    }
}
