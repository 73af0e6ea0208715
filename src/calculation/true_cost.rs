//! Burdened labor cost.
//!
//! The true cost of an employee hour is the wage scaled by the burden
//! multiplier (payroll taxes, workers' comp, benefits).

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult, checked_mul, require_non_negative};

/// Paid hours in a standard work year (52 × 40).
pub const STANDARD_ANNUAL_HOURS: Decimal = Decimal::from_parts(2080, 0, 0, false, 0);

/// Calculates the true (burdened) cost per hour.
///
/// `true_cost = hourly_rate × burden_multiplier`
///
/// # Errors
///
/// - `InvalidInput` if the burden multiplier is below 1
/// - `InvalidInput` if the hourly rate is negative
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::calculate_true_cost;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cost = calculate_true_cost(
///     Decimal::from_str("30.00").unwrap(),
///     Decimal::from_str("1.4").unwrap(),
/// ).unwrap();
/// assert_eq!(cost, Decimal::from_str("42.00").unwrap());
/// ```
pub fn calculate_true_cost(hourly_rate: Decimal, burden_multiplier: Decimal) -> EngineResult<Decimal> {
    require_non_negative("hourly_rate", hourly_rate)?;
    if burden_multiplier < Decimal::ONE {
        return Err(EngineError::InvalidInput {
            field: "burden_multiplier".to_string(),
            message: format!("must be at least 1 (got {})", burden_multiplier),
        });
    }
    checked_mul("true_cost_per_hour", hourly_rate, burden_multiplier)
}

/// Annual salary equivalent of an hourly rate over [`STANDARD_ANNUAL_HOURS`].
///
/// # Errors
///
/// Returns `InvalidInput` if the salary exceeds the Decimal range.
pub fn annual_salary(hourly_rate: Decimal) -> EngineResult<Decimal> {
    checked_mul("annual_salary", hourly_rate, STANDARD_ANNUAL_HOURS)
}
