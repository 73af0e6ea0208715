//! Job pricing.
//!
//! Converts a loadout's billing rate and production rate plus the job's work
//! units, drive time and buffer into billable hours and a line total. The
//! billing rate already includes margin, so none is added here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{
    EngineResult, checked_add, checked_div, checked_mul, require_non_negative, require_non_zero,
    require_positive,
};
use crate::models::{AuditStep, BufferMode, PricingLineItem, PricingOptions, TransportMode};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);
const ROUND_TRIP: Decimal = Decimal::TWO;

/// Inputs for pricing a single job line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPricingInputs {
    /// Hourly billing rate (margin included).
    pub billing_rate: Decimal,
    /// Units of work the loadout completes per hour.
    pub production_rate: Decimal,
    /// One-way drive time in minutes.
    pub drive_time_minutes: Decimal,
    /// Units of work in the job.
    pub work_units: Decimal,
    /// Contingency as a percentage (15 = 15%).
    pub buffer_percentage: Decimal,
}

/// Billable hours and total for a job line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPricingResult {
    /// `work_units / production_rate`.
    pub production_hours: Decimal,
    /// Round-trip transport hours.
    pub transport_hours: Decimal,
    /// Contingency hours.
    pub buffer_hours: Decimal,
    /// Production + transport + buffer.
    pub total_hours: Decimal,
    /// `total_hours × billing_rate`.
    pub line_total: Decimal,
    /// The formulas used.
    pub options: PricingOptions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn transport_hours(drive_time_minutes: Decimal, mode: TransportMode) -> EngineResult<Decimal> {
    let round_trip = checked_mul("drive_time_minutes", drive_time_minutes, ROUND_TRIP)?;
    match mode {
        TransportMode::RoundTripMinutes => Ok(round_trip / MINUTES_PER_HOUR),
        TransportMode::Scaled { transport_rate } => {
            require_non_negative("transport_rate", transport_rate)?;
            checked_mul("transport_rate", round_trip, transport_rate)
        }
    }
}

fn buffer_hours(
    production: Decimal,
    transport: Decimal,
    percentage: Decimal,
    mode: BufferMode,
) -> EngineResult<Decimal> {
    let fraction = percentage / Decimal::ONE_HUNDRED;
    let base = match mode {
        BufferMode::ProductionOnly => production,
        BufferMode::ProductionAndTransport => {
            checked_add("buffer_percentage", production, transport)?
        }
    };
    checked_mul("buffer_percentage", base, fraction)
}

/// Prices a job line.
///
/// One `options` value governs the whole calculation; the transport and
/// buffer formulas are never mixed within a single result.
///
/// # Errors
///
/// - `InvalidDivisor` if `production_rate` is zero or negative
/// - `InvalidInput` if work units or billing rate is not positive
/// - `InvalidInput` if drive time, buffer percentage or a scaled transport
///   rate is negative
/// - `InvalidInput` if the hours or line total are too large to represent
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::{JobPricingInputs, calculate_pricing};
/// use tree_pricing_engine::models::PricingOptions;
/// use rust_decimal::Decimal;
///
/// let inputs = JobPricingInputs {
///     billing_rate: Decimal::new(100, 0),
///     production_rate: Decimal::new(2, 0),
///     drive_time_minutes: Decimal::new(30, 0),
///     work_units: Decimal::new(10, 0),
///     buffer_percentage: Decimal::new(15, 0),
/// };
/// let result = calculate_pricing(&inputs, PricingOptions::default(), 1).unwrap();
/// assert_eq!(result.total_hours, Decimal::new(675, 2));
/// assert_eq!(result.line_total, Decimal::new(675, 0));
/// ```
pub fn calculate_pricing(
    inputs: &JobPricingInputs,
    options: PricingOptions,
    step_number: u32,
) -> EngineResult<JobPricingResult> {
    let production_rate = require_positive("production_rate", inputs.production_rate)?;
    require_non_zero("work_units", inputs.work_units)?;
    require_non_negative("drive_time_minutes", inputs.drive_time_minutes)?;
    require_non_negative("buffer_percentage", inputs.buffer_percentage)?;
    require_non_zero("billing_rate", inputs.billing_rate)?;

    let production_hours = checked_div("work_units", inputs.work_units, production_rate)?;
    let transport_hours = transport_hours(inputs.drive_time_minutes, options.transport)?;
    let buffer_hours = buffer_hours(
        production_hours,
        transport_hours,
        inputs.buffer_percentage,
        options.buffer,
    )?;
    let total_hours = checked_add(
        "total_hours",
        checked_add("total_hours", production_hours, transport_hours)?,
        buffer_hours,
    )?;
    let line_total = checked_mul("line_total", total_hours, inputs.billing_rate)?;

    let transport_formula = match options.transport {
        TransportMode::RoundTripMinutes => "minutes × 2 / 60",
        TransportMode::Scaled { .. } => "minutes × 2 × transport rate",
    };
    let buffer_formula = match options.buffer {
        BufferMode::ProductionOnly => "production × buffer%",
        BufferMode::ProductionAndTransport => "(production + transport) × buffer%",
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "job_pricing".to_string(),
        rule_name: "Job Line Pricing".to_string(),
        formula: format!(
            "units / rate + {} + {}, × billing rate",
            transport_formula, buffer_formula
        ),
        input: serde_json::json!({
            "billing_rate": inputs.billing_rate.normalize().to_string(),
            "production_rate": production_rate.normalize().to_string(),
            "drive_time_minutes": inputs.drive_time_minutes.normalize().to_string(),
            "work_units": inputs.work_units.normalize().to_string(),
            "buffer_percentage": inputs.buffer_percentage.normalize().to_string(),
            "options": options
        }),
        output: serde_json::json!({
            "production_hours": production_hours.normalize().to_string(),
            "transport_hours": transport_hours.normalize().to_string(),
            "buffer_hours": buffer_hours.normalize().to_string(),
            "total_hours": total_hours.normalize().to_string(),
            "line_total": line_total.normalize().to_string()
        }),
        reasoning: format!(
            "{}h production + {}h transport + {}h buffer = {}h at ${}/h = ${}",
            production_hours.round_dp(2).normalize(),
            transport_hours.round_dp(2).normalize(),
            buffer_hours.round_dp(2).normalize(),
            total_hours.round_dp(2).normalize(),
            inputs.billing_rate.normalize(),
            line_total.round_dp(2).normalize()
        ),
    };

    Ok(JobPricingResult {
        production_hours,
        transport_hours,
        buffer_hours,
        total_hours,
        line_total,
        options,
        audit_step,
    })
}

/// Prices a job line and wraps it as a [`PricingLineItem`] for `loadout_id`.
pub fn build_line_item(
    loadout_id: &str,
    inputs: &JobPricingInputs,
    options: PricingOptions,
    step_number: u32,
) -> EngineResult<(PricingLineItem, JobPricingResult)> {
    let result = calculate_pricing(inputs, options, step_number)?;
    let item = PricingLineItem {
        loadout_id: loadout_id.to_string(),
        work_units: inputs.work_units,
        drive_time_minutes: inputs.drive_time_minutes,
        buffer_percentage: inputs.buffer_percentage,
        production_hours: result.production_hours,
        transport_hours: result.transport_hours,
        buffer_hours: result.buffer_hours,
        total_hours: result.total_hours,
        hourly_rate: inputs.billing_rate,
        line_total: result.line_total,
        options,
    };
    Ok((item, result))
}
