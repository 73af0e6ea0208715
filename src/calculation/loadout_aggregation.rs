//! Loadout cost aggregation.
//!
//! Sums member equipment and labor costs with overhead into a total hourly
//! loadout cost and prices it at every target margin. Nothing is cached: the
//! totals and the billing rate table are rebuilt together on every call.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::billing_rates::{BillingRate, billing_rate_table};
use crate::error::{EngineResult, checked_add, require_non_negative};
use crate::models::AuditStep;

/// The hourly cost of one loadout member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCost {
    /// Equipment or employee id.
    pub id: String,
    /// Total cost per hour (equipment) or true cost per hour (employee).
    pub cost_per_hour: Decimal,
}

impl MemberCost {
    /// Creates a member cost entry.
    pub fn new(id: impl Into<String>, cost_per_hour: Decimal) -> Self {
        Self {
            id: id.into(),
            cost_per_hour,
        }
    }
}

/// Aggregated hourly cost of a loadout and its billing rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutCosts {
    /// Σ equipment total cost per hour.
    pub total_equipment_cost: Decimal,
    /// Σ employee true cost per hour.
    pub total_labor_cost: Decimal,
    /// Overhead per hour.
    pub overhead_cost: Decimal,
    /// Equipment + labor + overhead.
    pub total_loadout_cost: Decimal,
    /// One billing rate per target margin.
    pub billing_rates: Vec<BillingRate>,
    /// Audit steps for the sum and the margin table.
    pub audit_steps: Vec<AuditStep>,
}

fn sum_members(members: &[MemberCost]) -> EngineResult<Decimal> {
    members.iter().try_fold(Decimal::ZERO, |total, member| {
        let field = format!("cost_per_hour[{}]", member.id);
        let cost = require_non_negative(&field, member.cost_per_hour)?;
        checked_add(&field, total, cost)
    })
}

fn member_json(members: &[MemberCost]) -> serde_json::Value {
    members
        .iter()
        .map(|m| serde_json::json!({"id": m.id, "cost_per_hour": m.cost_per_hour.normalize().to_string()}))
        .collect()
}

/// Aggregates member costs and overhead into a loadout total and its
/// billing rate table.
///
/// Uses two audit steps, `step_number` and `step_number + 1`.
///
/// # Errors
///
/// Returns `InvalidInput` if the overhead or any member cost is negative.
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::{MemberCost, aggregate_loadout};
/// use rust_decimal::Decimal;
///
/// let costs = aggregate_loadout(
///     &[MemberCost::new("chipper", Decimal::new(40, 0))],
///     &[MemberCost::new("emp_1", Decimal::new(45, 0))],
///     Decimal::new(15, 0),
///     1,
/// )
/// .unwrap();
/// assert_eq!(costs.total_loadout_cost, Decimal::new(100, 0));
/// assert_eq!(costs.billing_rates[2].rate, Decimal::new(200, 0));
/// ```
pub fn aggregate_loadout(
    equipment: &[MemberCost],
    employees: &[MemberCost],
    overhead_cost: Decimal,
    step_number: u32,
) -> EngineResult<LoadoutCosts> {
    require_non_negative("overhead_cost", overhead_cost)?;

    let total_equipment_cost = sum_members(equipment)?;
    let total_labor_cost = sum_members(employees)?;
    let total_loadout_cost = checked_add(
        "total_loadout_cost",
        checked_add("total_loadout_cost", total_equipment_cost, total_labor_cost)?,
        overhead_cost,
    )?;
    let billing_rates = billing_rate_table(total_loadout_cost)?;

    let sum_step = AuditStep {
        step_number,
        rule_id: "loadout_total".to_string(),
        rule_name: "Loadout Hourly Cost".to_string(),
        formula: "Σ equipment + Σ labor + overhead".to_string(),
        input: serde_json::json!({
            "equipment": member_json(equipment),
            "employees": member_json(employees),
            "overhead_cost": overhead_cost.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_equipment_cost": total_equipment_cost.normalize().to_string(),
            "total_labor_cost": total_labor_cost.normalize().to_string(),
            "total_loadout_cost": total_loadout_cost.normalize().to_string()
        }),
        reasoning: format!(
            "{} equipment (${}) + {} employees (${}) + ${} overhead = ${}/h",
            equipment.len(),
            total_equipment_cost.normalize(),
            employees.len(),
            total_labor_cost.normalize(),
            overhead_cost.normalize(),
            total_loadout_cost.normalize()
        ),
    };

    let rate_summary: Vec<String> = billing_rates
        .iter()
        .map(|r| format!("{}%: ${}", r.margin_percent(), r.rate.round_dp(2)))
        .collect();
    let margin_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "billing_rates".to_string(),
        rule_name: "Margin Billing Rates".to_string(),
        formula: "cost / (1 − margin)".to_string(),
        input: serde_json::json!({
            "total_loadout_cost": total_loadout_cost.normalize().to_string()
        }),
        output: serde_json::to_value(&billing_rates).unwrap_or_default(),
        reasoning: rate_summary.join(", "),
    };

    Ok(LoadoutCosts {
        total_equipment_cost,
        total_labor_cost,
        overhead_cost,
        total_loadout_cost,
        billing_rates,
        audit_steps: vec![sum_step, margin_step],
    })
}
