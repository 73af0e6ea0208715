//! Response types for the pricing engine API.
//!
//! This module defines the response bodies that are not plain engine results,
//! the error response structures, and the mapping from [`EngineError`] to
//! HTTP errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculation::{HeldAddOn, JobPricingResult, ParsedEmployeeCode};
use crate::config::MaintenanceTier;
use crate::error::EngineError;
use crate::models::{PricingLineItem, TrackCategory};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidDivisor { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DIVISOR",
                    message,
                    format!("'{}' is used as a divisor and must be greater than zero", field),
                ),
            },
            EngineError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_INPUT", message),
            },
            EngineError::UnrecognizedCode { kind, code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNRECOGNIZED_CODE",
                    message,
                    format!("'{}' is not a known {} code; see GET /reference/codes", code, kind),
                ),
            },
            EngineError::InconsistentAggregation { missing, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INCONSISTENT_AGGREGATION",
                    message,
                    format!(
                        "{} referenced member(s) are not in the supplied snapshot",
                        missing.len()
                    ),
                ),
            },
            EngineError::MaintenanceTierNotFound { tier } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MAINTENANCE_TIER_NOT_FOUND",
                    message,
                    format!("The maintenance tier '{}' is not configured", tier),
                ),
            },
        }
    }
}

/// Result of `POST /employees/code/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCodeResponse {
    /// Labelled segments and recognized components.
    pub parsed: ParsedEmployeeCode,
    /// Canonical form of the code, present only when every segment is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

/// Result of `POST /pricing/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResponse {
    /// Hours and total.
    pub pricing: JobPricingResult,
    /// Line item, present when the request named a loadout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item: Option<PricingLineItem>,
}

/// A career track in the reference listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerTrackEntry {
    /// Three-letter code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Category.
    pub category: TrackCategory,
    /// Tier-1 hourly rate.
    pub base_rate: Decimal,
}

/// A tier in the reference listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierEntry {
    /// Tier number.
    pub tier: u8,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Base rate multiplier.
    pub multiplier: Decimal,
}

/// Result of `GET /reference/codes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCodes {
    /// Every career track.
    pub career_tracks: Vec<CareerTrackEntry>,
    /// Every tier.
    pub tiers: Vec<TierEntry>,
    /// Every add-on, in employee-code order.
    pub add_ons: Vec<HeldAddOn>,
    /// Target margins billing rates are computed at.
    pub margin_tiers: Vec<Decimal>,
    /// Configured maintenance tiers.
    pub maintenance_tiers: BTreeMap<String, MaintenanceTier>,
}
