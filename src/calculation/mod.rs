//! Calculation logic for the pricing engine.
//!
//! This module contains the pure cost and pricing functions: equipment cost
//! per hour under either cost model (with loan amortization), employee hourly
//! rate, burdened cost and employee codes, loadout aggregation with
//! margin-based billing rates, and job line pricing.

mod billing_rates;
mod compensation;
mod employee_code;
mod equipment_cost;
mod financing;
mod hourly_rate;
mod job_pricing;
mod loadout_aggregation;
mod loadout_members;
mod true_cost;

pub use billing_rates::{
    BillingRate, MARGIN_TIERS, billing_rate, billing_rate_table, rate_at_margin,
};
pub use compensation::{EmployeeCompensation, compensate_employee};
pub use employee_code::{
    CROSS_TRAINING_PREFIX, CROSS_TRAINING_SEPARATOR, CodeSegment, EmployeeCode,
    ParsedEmployeeCode, SegmentKind, TOKEN_SEPARATOR, UNKNOWN_LABEL, generate_employee_code,
    parse_employee_code,
};
pub use equipment_cost::{EquipmentCostResult, compute_equipment_costs};
pub use financing::{annual_financing_interest, monthly_payment};
pub use hourly_rate::{
    BaseRateLookupResult, HeldAddOn, HourlyRateResult, add_on_catalog, calculate_hourly_rate,
    get_base_rate, held_add_ons,
};
pub use job_pricing::{JobPricingInputs, JobPricingResult, build_line_item, calculate_pricing};
pub use loadout_aggregation::{LoadoutCosts, MemberCost, aggregate_loadout};
pub use loadout_members::{
    LoadoutCostReport, MISSING_MEMBER_WARNING, MemberKind, MissingMember, ResolvedMembers,
    cost_loadout, resolve_loadout_members,
};
pub use true_cost::{STANDARD_ANNUAL_HOURS, annual_salary, calculate_true_cost};
