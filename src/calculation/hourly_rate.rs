//! Effective hourly rate calculation.
//!
//! An employee's effective hourly rate is their Tier-1 base rate scaled by
//! the tier multiplier, plus the premium of every add-on they hold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, checked_add, checked_mul};
use crate::models::{
    AddOn, AddOnFamily, AddOnInfo, AuditStep, CodeTable, DriverLicense, Employee,
    EquipmentCertification, LeadershipLevel, ProfessionalCertification,
};

/// An add-on held by an employee, tagged with its family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldAddOn {
    /// The family the add-on belongs to.
    pub family: AddOnFamily,
    /// Code, name, premium and description.
    #[serde(flatten)]
    pub info: AddOnInfo,
}

fn held<A: AddOn>(add_on: A) -> HeldAddOn {
    HeldAddOn {
        family: A::FAMILY,
        info: add_on.info(),
    }
}

/// Lists the add-ons an employee holds in employee-code order: leadership,
/// equipment, driver, certification, each family in declaration order.
pub fn held_add_ons(employee: &Employee) -> Vec<HeldAddOn> {
    let mut add_ons = Vec::new();
    add_ons.extend(employee.leadership.map(held));
    add_ons.extend(employee.equipment_certifications.iter().copied().map(held));
    add_ons.extend(employee.driver_licenses.iter().copied().map(held));
    add_ons.extend(employee.professional_certs.iter().copied().map(held));
    add_ons
}

fn family_catalog<A: AddOn>() -> impl Iterator<Item = HeldAddOn> {
    A::all().iter().copied().map(held)
}

/// Every add-on of every family, in employee-code order.
pub fn add_on_catalog() -> Vec<HeldAddOn> {
    family_catalog::<LeadershipLevel>()
        .chain(family_catalog::<EquipmentCertification>())
        .chain(family_catalog::<DriverLicense>())
        .chain(family_catalog::<ProfessionalCertification>())
        .collect()
}

/// The result of a base rate lookup, including the rate and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseRateLookupResult {
    /// The Tier-1 hourly rate used for the employee.
    pub rate: Decimal,
    /// True if the rate came from the employee record rather than the track table.
    pub overridden: bool,
}

/// Determines an employee's Tier-1 base rate.
///
/// The employee's `base_hourly_rate` override wins when present; otherwise
/// the career track's table rate is used.
///
/// # Errors
///
/// Returns `InvalidInput` if the override is zero or negative.
pub fn get_base_rate(employee: &Employee) -> EngineResult<BaseRateLookupResult> {
    match employee.base_hourly_rate {
        Some(rate) if rate <= Decimal::ZERO => Err(EngineError::InvalidInput {
            field: "base_hourly_rate".to_string(),
            message: format!("must be greater than zero (got {})", rate),
        }),
        Some(rate) => Ok(BaseRateLookupResult {
            rate,
            overridden: true,
        }),
        None => Ok(BaseRateLookupResult {
            rate: employee.career_track.base_rate(),
            overridden: false,
        }),
    }
}

/// The effective hourly rate of an employee with its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRateResult {
    /// Tier-1 base rate.
    pub base_rate: Decimal,
    /// Multiplier of the employee's tier.
    pub tier_multiplier: Decimal,
    /// `base_rate × tier_multiplier`.
    pub tiered_rate: Decimal,
    /// Add-ons contributing premiums.
    pub add_ons: Vec<HeldAddOn>,
    /// Sum of add-on premiums.
    pub premium_total: Decimal,
    /// `tiered_rate + premium_total`.
    pub hourly_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates an employee's effective hourly rate.
///
/// `hourly_rate = base_rate × tier_multiplier + Σ add-on premiums`
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::calculate_hourly_rate;
/// use tree_pricing_engine::models::{CareerTrack, DriverLicense, Employee, TierLevel};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut employee = Employee::new(
///     "emp_001",
///     "Jordan Reyes",
///     CareerTrack::ArboristClimber,
///     TierLevel::Senior,
///     Decimal::from_str("1.5").unwrap(),
/// );
/// employee.driver_licenses.insert(DriverLicense::ClassB);
///
/// // 24.00 × 1.30 + 2.00
/// let result = calculate_hourly_rate(&employee, 1).unwrap();
/// assert_eq!(result.hourly_rate, Decimal::from_str("33.20").unwrap());
/// ```
pub fn calculate_hourly_rate(employee: &Employee, step_number: u32) -> EngineResult<HourlyRateResult> {
    let base = get_base_rate(employee)?;
    let tier_multiplier = employee.tier.multiplier();
    let tiered_rate = checked_mul("base_hourly_rate", base.rate, tier_multiplier)?;

    let add_ons = held_add_ons(employee);
    let premium_total: Decimal = add_ons.iter().map(|a| a.info.premium).sum();
    let hourly_rate = checked_add("hourly_rate", tiered_rate, premium_total)?;

    let premium_codes: Vec<&str> = add_ons.iter().map(|a| a.info.code.as_str()).collect();
    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Effective Hourly Rate".to_string(),
        formula: "base × tier multiplier + Σ add-on premiums".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "career_track": employee.career_track.code(),
            "tier": employee.tier.number(),
            "base_rate": base.rate.normalize().to_string(),
            "base_rate_source": if base.overridden { "employee_override" } else { "career_track" },
            "add_ons": premium_codes
        }),
        output: serde_json::json!({
            "tiered_rate": tiered_rate.normalize().to_string(),
            "premium_total": premium_total.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} + ${} in premiums = ${}",
            base.rate.normalize(),
            tier_multiplier.normalize(),
            premium_total.normalize(),
            hourly_rate.normalize()
        ),
    };

    Ok(HourlyRateResult {
        base_rate: base.rate,
        tier_multiplier,
        tiered_rate,
        add_ons,
        premium_total,
        hourly_rate,
        audit_step,
    })
}
