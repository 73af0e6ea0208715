//! Quoted line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::strategy::PricingOptions;

/// A priced job line, ready to be attached to a proposal.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::{PricingLineItem, PricingOptions};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = PricingLineItem {
///     loadout_id: "lo_001".to_string(),
///     work_units: Decimal::from_str("10").unwrap(),
///     drive_time_minutes: Decimal::from_str("30").unwrap(),
///     buffer_percentage: Decimal::from_str("15").unwrap(),
///     production_hours: Decimal::from_str("5").unwrap(),
///     transport_hours: Decimal::from_str("1").unwrap(),
///     buffer_hours: Decimal::from_str("0.75").unwrap(),
///     total_hours: Decimal::from_str("6.75").unwrap(),
///     hourly_rate: Decimal::from_str("100").unwrap(),
///     line_total: Decimal::from_str("675").unwrap(),
///     options: PricingOptions::default(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingLineItem {
    /// The loadout whose billing rate priced this line.
    pub loadout_id: String,
    /// Units of work quoted.
    pub work_units: Decimal,
    /// One-way drive time in minutes.
    pub drive_time_minutes: Decimal,
    /// Buffer as a percentage (15 = 15%).
    pub buffer_percentage: Decimal,
    /// Hours spent producing work units.
    pub production_hours: Decimal,
    /// Round-trip transport hours.
    pub transport_hours: Decimal,
    /// Contingency hours.
    pub buffer_hours: Decimal,
    /// Sum of production, transport and buffer hours.
    pub total_hours: Decimal,
    /// Billing rate applied per hour.
    pub hourly_rate: Decimal,
    /// `total_hours × hourly_rate`.
    pub line_total: Decimal,
    /// The transport and buffer formulas used.
    pub options: PricingOptions,
}
