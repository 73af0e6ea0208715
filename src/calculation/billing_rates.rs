//! Margin-based billing rates.
//!
//! A billing rate at margin `M` is the hourly cost grossed up so that `M` of
//! the billed amount is profit: `rate = cost / (1 − M)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, checked_div, require_non_negative};

/// The five target margins every loadout is priced at.
pub const MARGIN_TIERS: [Decimal; 5] = [
    Decimal::from_parts(30, 0, 0, false, 2),
    Decimal::from_parts(40, 0, 0, false, 2),
    Decimal::from_parts(50, 0, 0, false, 2),
    Decimal::from_parts(60, 0, 0, false, 2),
    Decimal::from_parts(70, 0, 0, false, 2),
];

/// Billing rate for an hourly cost at a target margin.
///
/// # Errors
///
/// - `InvalidDivisor` if `margin >= 1` (the denominator `1 − margin` would be
///   zero or negative)
/// - `InvalidInput` if `margin` or `cost` is negative
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::billing_rate;
/// use rust_decimal::Decimal;
///
/// let rate = billing_rate(Decimal::new(100, 0), Decimal::new(50, 2)).unwrap();
/// assert_eq!(rate, Decimal::new(200, 0));
/// ```
pub fn billing_rate(cost: Decimal, margin: Decimal) -> EngineResult<Decimal> {
    require_non_negative("cost", cost)?;
    require_non_negative("margin", margin)?;

    let divisor = Decimal::ONE - margin;
    if divisor <= Decimal::ZERO {
        return Err(EngineError::InvalidDivisor {
            field: "1 - margin".to_string(),
            value: divisor,
        });
    }

    checked_div("cost", cost, divisor)
}

/// A billing rate at one target margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRate {
    /// Margin as a fraction (0.30 = 30%).
    pub margin: Decimal,
    /// Hourly rate that yields the margin.
    pub rate: Decimal,
}

impl BillingRate {
    /// The margin as a whole percentage (30 for 0.30).
    pub fn margin_percent(&self) -> Decimal {
        (self.margin * Decimal::ONE_HUNDRED).normalize()
    }
}

/// Billing rates for `cost` at every entry of [`MARGIN_TIERS`], in order.
pub fn billing_rate_table(cost: Decimal) -> EngineResult<Vec<BillingRate>> {
    MARGIN_TIERS
        .iter()
        .map(|&margin| {
            Ok(BillingRate {
                margin,
                rate: billing_rate(cost, margin)?,
            })
        })
        .collect()
}

/// Looks up the rate at `margin` in a table built by [`billing_rate_table`].
pub fn rate_at_margin(rates: &[BillingRate], margin: Decimal) -> Option<Decimal> {
    rates
        .iter()
        .find(|entry| entry.margin == margin)
        .map(|entry| entry.rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// BR-001: 50% margin doubles cost
    #[test]
    fn test_fifty_percent_margin_doubles_cost() {
        assert_eq!(billing_rate(dec("100"), dec("0.5")).unwrap(), dec("200"));
    }

    /// BR-002: 30% margin divides by 0.7
    #[test]
    fn test_thirty_percent_margin() {
        let rate = billing_rate(dec("100"), dec("0.30")).unwrap();
        assert_eq!(rate.round_dp(3), dec("142.857"));
    }

    #[test]
    fn test_zero_margin_is_cost() {
        assert_eq!(billing_rate(dec("87.5"), Decimal::ZERO).unwrap(), dec("87.5"));
    }

    #[test]
    fn test_margin_of_one_is_invalid_divisor() {
        match billing_rate(dec("100"), Decimal::ONE) {
            Err(EngineError::InvalidDivisor { field, value }) => {
                assert_eq!(field, "1 - margin");
                assert_eq!(value, Decimal::ZERO);
            }
            other => panic!("Expected InvalidDivisor, got {:?}", other),
        }
        assert!(matches!(
            billing_rate(dec("100"), dec("1.2")),
            Err(EngineError::InvalidDivisor { .. })
        ));
    }

    #[test]
    fn test_negative_margin_is_rejected() {
        assert!(matches!(
            billing_rate(dec("100"), dec("-0.1")),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_table_covers_all_tiers_in_order() {
        let table = billing_rate_table(dec("100")).unwrap();
        let percents: Vec<Decimal> = table.iter().map(|r| r.margin_percent()).collect();
        assert_eq!(
            percents,
            vec![dec("30"), dec("40"), dec("50"), dec("60"), dec("70")]
        );
        assert_eq!(rate_at_margin(&table, dec("0.5")), Some(dec("200")));
        assert_eq!(rate_at_margin(&table, dec("0.6")), Some(dec("250")));
        assert_eq!(rate_at_margin(&table, dec("0.55")), None);
    }

    #[test]
    fn test_table_rates_increase_with_margin() {
        let table = billing_rate_table(dec("64.25")).unwrap();
        assert!(table.windows(2).all(|pair| pair[0].rate < pair[1].rate));
    }

    #[test]
    fn test_margin_identity_on_table() {
        let cost = dec("123.45");
        for entry in billing_rate_table(cost).unwrap() {
            let recovered = entry.rate * (Decimal::ONE - entry.margin);
            assert!((recovered - cost).abs() < dec("0.0000000001"));
        }
    }

    #[test]
    fn test_cost_too_large_to_gross_up_is_invalid_input() {
        match billing_rate(Decimal::MAX, dec("0.70")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "cost"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!(billing_rate_table(Decimal::MAX).is_err());
    }
}
