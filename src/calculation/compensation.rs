//! Full compensation summary for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee_code::generate_employee_code;
use super::hourly_rate::{HourlyRateResult, calculate_hourly_rate};
use super::true_cost::{STANDARD_ANNUAL_HOURS, annual_salary, calculate_true_cost};
use crate::error::EngineResult;
use crate::models::{AuditStep, Employee};

/// Everything the engine derives from an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensation {
    /// The employee this summary belongs to.
    pub employee_id: String,
    /// Generated employee code.
    pub employee_code: String,
    /// Hourly rate breakdown.
    pub hourly: HourlyRateResult,
    /// Burden multiplier applied to the hourly rate.
    pub burden_multiplier: Decimal,
    /// Burdened cost of one hour of this employee.
    pub true_cost_per_hour: Decimal,
    /// Hourly rate over a standard work year.
    pub annual_salary: Decimal,
    /// The audit step recording the true-cost derivation.
    pub audit_step: AuditStep,
}

impl EmployeeCompensation {
    /// Audit steps in calculation order.
    pub fn audit_steps(&self) -> Vec<AuditStep> {
        vec![self.hourly.audit_step.clone(), self.audit_step.clone()]
    }
}

/// Derives code, hourly rate, true cost and annual salary for an employee.
///
/// Uses two audit steps, `step_number` and `step_number + 1`.
pub fn compensate_employee(employee: &Employee, step_number: u32) -> EngineResult<EmployeeCompensation> {
    let hourly = calculate_hourly_rate(employee, step_number)?;
    let true_cost_per_hour = calculate_true_cost(hourly.hourly_rate, employee.burden_multiplier)?;
    let salary = annual_salary(hourly.hourly_rate)?;
    let employee_code = generate_employee_code(employee);

    let audit_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "true_cost".to_string(),
        rule_name: "Burdened Labor Cost".to_string(),
        formula: "hourly rate × burden multiplier".to_string(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "hourly_rate": hourly.hourly_rate.normalize().to_string(),
            "burden_multiplier": employee.burden_multiplier.normalize().to_string(),
            "annual_hours": STANDARD_ANNUAL_HOURS.to_string()
        }),
        output: serde_json::json!({
            "true_cost_per_hour": true_cost_per_hour.normalize().to_string(),
            "annual_salary": salary.normalize().to_string()
        }),
        reasoning: format!(
            "{} costs ${} x {} = ${}/h burdened",
            employee_code,
            hourly.hourly_rate.normalize(),
            employee.burden_multiplier.normalize(),
            true_cost_per_hour.normalize()
        ),
    };

    Ok(EmployeeCompensation {
        employee_id: employee.id.clone(),
        employee_code,
        hourly,
        burden_multiplier: employee.burden_multiplier,
        true_cost_per_hour,
        annual_salary: salary,
        audit_step,
    })
}
