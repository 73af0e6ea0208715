//! Calculation result models for the pricing engine.
//!
//! This module contains the audit types every calculation step produces and
//! the [`CalculationEnvelope`] that wraps a result with its identifiers and
//! audit trace when it leaves the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a formula
/// application.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "billing_rates".to_string(),
///     rule_name: "Margin Billing Rates".to_string(),
///     formula: "cost / (1 - margin)".to_string(),
///     input: serde_json::json!({"total_loadout_cost": "100"}),
///     output: serde_json::json!({"billing_rate_50": "200"}),
///     reasoning: "$100 / (1 - 0.50) = $200".to_string(),
/// };
/// assert_eq!(step.rule_id, "billing_rates");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula the rule evaluates.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Records every decision made during the calculation process so a quote
/// can be explained line by line.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A calculation result stamped with identifiers and its audit trace.
///
/// The engine functions themselves are pure; the envelope is added at the
/// API boundary, which is why only it carries an id and a timestamp.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::{AuditTrace, CalculationEnvelope};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let envelope = CalculationEnvelope {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     result: 42u32,
///     audit_trace: AuditTrace { steps: vec![], warnings: vec![], duration_us: 0 },
/// };
/// assert_eq!(envelope.result, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationEnvelope<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculation output.
    pub result: T,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_audit_trace() -> AuditTrace {
        AuditTrace {
            steps: vec![],
            warnings: vec![],
            duration_us: 1000,
        }
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "job_pricing".to_string(),
            rule_name: "Job Pricing".to_string(),
            formula: "total_hours × billing_rate".to_string(),
            input: serde_json::json!({"total_hours": "6.75"}),
            output: serde_json::json!({"line_total": "675"}),
            reasoning: "6.75h x $100 = $675".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"job_pricing\""));
        assert!(json.contains("\"rule_name\":\"Job Pricing\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "MISSING_LOADOUT_MEMBER".to_string(),
            message: "Equipment 'eq_9' not found".to_string(),
            severity: "medium".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"MISSING_LOADOUT_MEMBER\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = CalculationEnvelope {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            result: "payload".to_string(),
            audit_trace: create_sample_audit_trace(),
        };

        let json = serde_json::to_string(&envelope).unwrap();
        let deserialized: CalculationEnvelope<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, deserialized);
    }

    #[test]
    fn test_envelope_serializes_result_field() {
        let envelope = CalculationEnvelope {
            calculation_id: Uuid::nil(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            result: serde_json::json!({"total_hours": "6.75"}),
            audit_trace: create_sample_audit_trace(),
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["result"]["total_hours"], "6.75");
        assert_eq!(value["audit_trace"]["duration_us"], 1000);
        assert_eq!(
            value["calculation_id"],
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
