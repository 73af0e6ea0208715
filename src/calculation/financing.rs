//! Equipment loan amortization.
//!
//! Used by the residual/financing cost model to turn loan terms into an
//! annual interest cost.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{
    EngineError, EngineResult, checked_div, checked_mul, checked_sub, require_non_negative,
    require_positive,
};
use crate::models::Financing;

/// Months per year, used to annualize loan interest.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Computes the level monthly payment of a fully amortizing loan.
///
/// Uses the standard annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)` with the
/// monthly rate `r = apr / 12`. A zero APR degenerates to `P / n`.
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::monthly_payment;
/// use rust_decimal::Decimal;
///
/// let payment = monthly_payment(Decimal::new(12_000, 0), Decimal::ZERO, 12).unwrap();
/// assert_eq!(payment, Decimal::new(1000, 0));
/// ```
pub fn monthly_payment(principal: Decimal, apr: Decimal, term_months: u32) -> EngineResult<Decimal> {
    require_non_negative("principal", principal)?;
    require_non_negative("apr", apr)?;
    let months = require_positive("term_months", Decimal::from(term_months))?;

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let monthly_rate = apr / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return checked_div("financing", principal, months);
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(term_months))
        .ok_or_else(|| EngineError::InvalidInput {
            field: "financing".to_string(),
            message: format!(
                "interest growth overflows for apr {} over {} months",
                apr, term_months
            ),
        })?;

    let numerator = checked_mul("financing", principal, monthly_rate)?;
    let numerator = checked_mul("financing", numerator, growth)?;
    checked_div("financing", numerator, growth - Decimal::ONE)
}

/// Computes the average annual interest paid on an equipment loan.
///
/// The financed principal is the purchase price less the down payment. Total
/// interest over the term (`payment × n − principal`) is spread evenly over
/// the term's years.
pub fn annual_financing_interest(
    purchase_price: Decimal,
    financing: &Financing,
) -> EngineResult<Decimal> {
    require_non_negative("down_payment", financing.down_payment)?;
    let principal = checked_sub("down_payment", purchase_price, financing.down_payment)?;
    if principal < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "down_payment".to_string(),
            message: format!(
                "down payment {} exceeds purchase price {}",
                financing.down_payment, purchase_price
            ),
        });
    }

    let payment = monthly_payment(principal, financing.apr, financing.term_months)?;
    let months = Decimal::from(financing.term_months);
    let total_paid = checked_mul("financing", payment, months)?;
    let total_interest = checked_sub("financing", total_paid, principal)?;
    let years = months / MONTHS_PER_YEAR;

    checked_div("financing", total_interest, years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_monthly_payment_matches_annuity_formula() {
        // $12,000 at 6% over 12 months
        let payment = monthly_payment(dec("12000"), dec("0.06"), 12).unwrap();
        assert_eq!(payment.round_dp(2), dec("1032.80"));
    }

    #[test]
    fn test_zero_apr_is_straight_division() {
        let payment = monthly_payment(dec("36000"), Decimal::ZERO, 36).unwrap();
        assert_eq!(payment, dec("1000"));
    }

    #[test]
    fn test_zero_principal_pays_nothing() {
        let payment = monthly_payment(Decimal::ZERO, dec("0.07"), 60).unwrap();
        assert_eq!(payment, Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_is_invalid_divisor() {
        let result = monthly_payment(dec("1000"), dec("0.05"), 0);
        match result {
            Err(EngineError::InvalidDivisor { field, .. }) => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidDivisor, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_apr_is_rejected() {
        assert!(matches!(
            monthly_payment(dec("1000"), dec("-0.01"), 12),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_annual_interest_one_year_loan() {
        let financing = Financing {
            apr: dec("0.06"),
            term_months: 12,
            down_payment: dec("3000"),
        };
        let interest = annual_financing_interest(dec("15000"), &financing).unwrap();
        assert_eq!(interest.round_dp(2), dec("393.57"));
    }

    #[test]
    fn test_annual_interest_spreads_over_term_years() {
        // $70,000 financed at 7% over 5 years
        let financing = Financing {
            apr: dec("0.07"),
            term_months: 60,
            down_payment: dec("15000"),
        };
        let interest = annual_financing_interest(dec("85000"), &financing).unwrap();
        assert_eq!(interest.round_dp(2), dec("2633.01"));
    }

    #[test]
    fn test_zero_apr_has_no_interest() {
        let financing = Financing {
            apr: Decimal::ZERO,
            term_months: 48,
            down_payment: Decimal::ZERO,
        };
        let interest = annual_financing_interest(dec("48000"), &financing).unwrap();
        assert_eq!(interest, Decimal::ZERO);
    }

    #[test]
    fn test_down_payment_above_price_is_rejected() {
        let financing = Financing {
            apr: dec("0.05"),
            term_months: 12,
            down_payment: dec("20000"),
        };
        match annual_financing_interest(dec("10000"), &financing) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "down_payment"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_payment_is_invalid_input() {
        // 10% a month compounds past the Decimal range once multiplied out
        match monthly_payment(dec("10000000"), dec("1.2"), 600) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "financing"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_annual_interest_is_invalid_input() {
        let financing = Financing {
            apr: dec("1.2"),
            term_months: 600,
            down_payment: Decimal::ZERO,
        };
        assert!(matches!(
            annual_financing_interest(dec("10000000"), &financing),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
