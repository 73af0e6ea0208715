//! Error types for the pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the cost, compensation, loadout and job pricing
//! calculations can report.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the pricing engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let error = EngineError::InvalidDivisor {
///     field: "production_rate".to_string(),
///     value: Decimal::ZERO,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid divisor 'production_rate': 0 (must be greater than zero)"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A value used as a denominator was zero or negative.
    #[error("Invalid divisor '{field}': {value} (must be greater than zero)")]
    InvalidDivisor {
        /// The input field acting as the divisor.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// An input value was outside its permitted range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A code did not match any entry of its lookup table.
    #[error("Unrecognized {kind} code: {code}")]
    UnrecognizedCode {
        /// The lookup table that was searched (e.g. "career track").
        kind: String,
        /// The code that was not found.
        code: String,
    },

    /// A loadout references members that are not in the supplied snapshot.
    #[error("Loadout '{loadout_id}' references missing members: {}", missing.join(", "))]
    InconsistentAggregation {
        /// The loadout being aggregated.
        loadout_id: String,
        /// The unresolved equipment or employee references.
        missing: Vec<String>,
    },

    /// A maintenance tier name was not found in the configuration.
    #[error("Maintenance tier not found: {tier}")]
    MaintenanceTierNotFound {
        /// The tier name that was not found.
        tier: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Returns `value` unchanged if it is strictly positive, otherwise an
/// [`EngineError::InvalidDivisor`] naming `field`.
pub(crate) fn require_positive(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(EngineError::InvalidDivisor {
            field: field.to_string(),
            value,
        })
    }
}

/// Returns `value` unchanged if it is zero or positive, otherwise an
/// [`EngineError::InvalidInput`] naming `field`.
pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value >= Decimal::ZERO {
        Ok(value)
    } else {
        Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        })
    }
}

/// Returns `value` unchanged if it is strictly positive, otherwise an
/// [`EngineError::InvalidInput`] naming `field`. For quantities that are not
/// divisors but must still be non-zero.
pub(crate) fn require_non_zero(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must be greater than zero (got {})", value),
        })
    }
}

fn overflow(field: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: "value is too large to calculate with".to_string(),
    }
}

/// `a + b`, or `InvalidInput` naming `field` on overflow.
pub(crate) fn checked_add(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b).ok_or_else(|| overflow(field))
}

/// `a - b`, or `InvalidInput` naming `field` on overflow.
pub(crate) fn checked_sub(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| overflow(field))
}

/// `a × b`, or `InvalidInput` naming `field` on overflow.
pub(crate) fn checked_mul(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| overflow(field))
}

/// `a / b`, or `InvalidInput` naming `field` on overflow. Callers reject
/// zero divisors first with [`require_positive`].
pub(crate) fn checked_div(field: &str, a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_div(b).ok_or_else(|| overflow(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_divisor_displays_field_and_value() {
        let error = EngineError::InvalidDivisor {
            field: "annual_hours".to_string(),
            value: Decimal::ZERO,
        };
        assert_eq!(
            error.to_string(),
            "Invalid divisor 'annual_hours': 0 (must be greater than zero)"
        );
    }

    #[test]
    fn test_unrecognized_code_displays_kind_and_code() {
        let error = EngineError::UnrecognizedCode {
            kind: "career track".to_string(),
            code: "ZZZ".to_string(),
        };
        assert_eq!(error.to_string(), "Unrecognized career track code: ZZZ");
    }

    #[test]
    fn test_inconsistent_aggregation_lists_missing_members() {
        let error = EngineError::InconsistentAggregation {
            loadout_id: "lo_001".to_string(),
            missing: vec!["equipment:eq_9".to_string(), "employee:emp_4".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Loadout 'lo_001' references missing members: equipment:eq_9, employee:emp_4"
        );
    }

    #[test]
    fn test_require_positive_rejects_zero_and_negative() {
        assert!(require_positive("x", Decimal::ONE).is_ok());
        assert!(matches!(
            require_positive("x", Decimal::ZERO),
            Err(EngineError::InvalidDivisor { .. })
        ));
        assert!(matches!(
            require_positive("x", Decimal::NEGATIVE_ONE),
            Err(EngineError::InvalidDivisor { .. })
        ));
    }

    #[test]
    fn test_require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("x", Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert!(matches!(
            require_non_negative("x", Decimal::NEGATIVE_ONE),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_divisor() -> EngineResult<()> {
            require_positive("production_rate", Decimal::ZERO)?;
            Ok(())
        }

        assert!(returns_invalid_divisor().is_err());
    }

    #[test]
    fn test_require_non_zero_is_invalid_input() {
        assert!(require_non_zero("billing_rate", Decimal::ONE).is_ok());
        match require_non_zero("billing_rate", Decimal::ZERO) {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "billing_rate");
                assert!(message.contains("greater than zero"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        assert_eq!(checked_add("x", Decimal::ONE, Decimal::ONE).unwrap(), Decimal::TWO);
        assert!(matches!(
            checked_add("x", Decimal::MAX, Decimal::ONE),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            checked_sub("x", Decimal::MIN, Decimal::ONE),
            Err(EngineError::InvalidInput { .. })
        ));
        match checked_mul("line_total", Decimal::MAX, Decimal::TWO) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "line_total"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!(checked_div("x", Decimal::MAX, Decimal::new(5, 1)).is_err());
    }
}
