//! HTTP request handlers for the pricing engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    EmployeeCode, EquipmentCostResult, JobPricingInputs, LoadoutCostReport, MARGIN_TIERS,
    add_on_catalog, build_line_item, calculate_pricing, compensate_employee,
    compute_equipment_costs, cost_loadout, parse_employee_code,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalculationEnvelope, CareerTrack, CodeTable, Employee,
    TierLevel,
};

use super::request::{
    CompensationRequest, EquipmentCostRequest, LoadoutAggregateRequest, ParseCodeRequest,
    PricingRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CareerTrackEntry, ParseCodeResponse, PricingResponse,
    ReferenceCodes, TierEntry,
};
use super::state::AppState;

/// Warning code for employee codes with unknown segments.
const UNRECOGNIZED_SEGMENT_WARNING: &str = "UNRECOGNIZED_CODE_SEGMENT";

/// A successful calculation before it is wrapped in an envelope.
struct Outcome<T> {
    result: T,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl<T> Outcome<T> {
    fn new(result: T, steps: Vec<AuditStep>) -> Self {
        Self {
            result,
            steps,
            warnings: Vec::new(),
        }
    }
}

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/equipment/costs", post(equipment_costs_handler))
        .route("/employees/compensation", post(compensation_handler))
        .route("/employees/code/parse", post(parse_code_handler))
        .route("/loadouts/aggregate", post(aggregate_loadout_handler))
        .route("/pricing/calculate", post(pricing_handler))
        .route("/reference/codes", get(reference_codes_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Wraps an outcome in a [`CalculationEnvelope`] or maps its error.
fn respond<T: Serialize>(
    config: &ConfigLoader,
    correlation_id: Uuid,
    started: Instant,
    operation: &'static str,
    outcome: EngineResult<Outcome<T>>,
) -> Response {
    match outcome {
        Ok(outcome) => {
            let duration = started.elapsed();
            info!(
                correlation_id = %correlation_id,
                operation,
                steps = outcome.steps.len(),
                warnings = outcome.warnings.len(),
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let envelope = CalculationEnvelope {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: config.engine().version.clone(),
                result: outcome.result,
                audit_trace: AuditTrace {
                    steps: outcome.steps,
                    warnings: outcome.warnings,
                    duration_us: duration.as_micros() as u64,
                },
            };
            json_response(StatusCode::OK, envelope)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Extracts the request body or returns the rejection response.
macro_rules! extract_or_reject {
    ($payload:expr, $correlation_id:expr) => {
        match $payload {
            Ok(Json(request)) => request,
            Err(rejection) => return rejection_response(rejection, $correlation_id),
        }
    };
}

/// Handler for POST /equipment/costs.
async fn equipment_costs_handler(
    State(state): State<AppState>,
    payload: Result<Json<EquipmentCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing equipment cost request");
    let request = extract_or_reject!(payload, correlation_id);

    let started = Instant::now();
    let config = state.config();
    let outcome = run_equipment_costs(config, request, correlation_id);

    respond(config, correlation_id, started, "equipment_costs", outcome)
}

/// Costs one piece of equipment with the requested or default model.
fn run_equipment_costs(
    config: &ConfigLoader,
    request: EquipmentCostRequest,
    correlation_id: Uuid,
) -> EngineResult<Outcome<EquipmentCostResult>> {
    let model = request
        .cost_model
        .unwrap_or_else(|| config.default_cost_model());
    let equipment = request.equipment.into_equipment(config)?;
    debug!(
        correlation_id = %correlation_id,
        equipment_id = %equipment.id,
        cost_model = model.id(),
        "Costing equipment"
    );
    let result = compute_equipment_costs(&equipment.inputs, model, 1)?;
    let steps = vec![result.audit_step.clone()];
    Ok(Outcome::new(result, steps))
}

/// Handler for POST /employees/compensation.
async fn compensation_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompensationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compensation request");
    let request = extract_or_reject!(payload, correlation_id);

    let started = Instant::now();
    let outcome = Employee::try_from(request.employee).and_then(|employee| {
        let result = compensate_employee(&employee, 1)?;
        let steps = result.audit_steps();
        Ok(Outcome::new(result, steps))
    });

    respond(state.config(), correlation_id, started, "compensation", outcome)
}

/// Handler for POST /employees/code/parse.
///
/// Lenient by default: unknown segments are labelled "Unknown" and reported
/// as warnings. With `strict`, any unknown segment fails the request.
async fn parse_code_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseCodeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee code parse request");
    let request = extract_or_reject!(payload, correlation_id);

    let started = Instant::now();
    let strict = request.code.parse::<EmployeeCode>();
    let outcome = match strict {
        Err(err) if request.strict => Err(err),
        strict => {
            let parsed = parse_employee_code(&request.code);
            let warnings = parsed
                .unrecognized()
                .into_iter()
                .map(|segment| AuditWarning {
                    code: UNRECOGNIZED_SEGMENT_WARNING.to_string(),
                    message: format!("Segment '{}' did not match any lookup table", segment),
                    severity: "low".to_string(),
                })
                .collect();
            Ok(Outcome {
                result: ParseCodeResponse {
                    parsed,
                    canonical: strict.ok().map(|code| code.to_string()),
                },
                steps: Vec::new(),
                warnings,
            })
        }
    };

    respond(state.config(), correlation_id, started, "parse_code", outcome)
}

/// Handler for POST /loadouts/aggregate.
async fn aggregate_loadout_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoadoutAggregateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing loadout aggregation request");
    let request = extract_or_reject!(payload, correlation_id);

    let started = Instant::now();
    let config = state.config();
    let outcome = run_loadout_aggregation(config, request, correlation_id);

    respond(config, correlation_id, started, "aggregate_loadout", outcome)
}

/// Converts the snapshot to domain types and costs the loadout.
fn run_loadout_aggregation(
    config: &ConfigLoader,
    request: LoadoutAggregateRequest,
    correlation_id: Uuid,
) -> EngineResult<Outcome<LoadoutCostReport>> {
    let equipment = request
        .equipment
        .into_iter()
        .map(|e| e.into_equipment(config))
        .collect::<EngineResult<Vec<_>>>()?;
    let employees = request
        .employees
        .into_iter()
        .map(Employee::try_from)
        .collect::<EngineResult<Vec<_>>>()?;
    let policy = request
        .missing_member_policy
        .unwrap_or_else(|| config.missing_member_policy());

    let report = cost_loadout(
        &request.loadout,
        &equipment,
        &employees,
        config.default_cost_model(),
        policy,
    )?;

    for missing in &report.members.missing {
        warn!(
            correlation_id = %correlation_id,
            loadout_id = %report.loadout_id,
            member_kind = ?missing.kind,
            member_id = %missing.id,
            "Loadout member missing from snapshot; excluded"
        );
    }

    let steps = report.audit_steps();
    let warnings = report.members.warnings.clone();
    Ok(Outcome {
        result: report,
        steps,
        warnings,
    })
}

/// Handler for POST /pricing/calculate.
async fn pricing_handler(
    State(state): State<AppState>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pricing request");
    let request = extract_or_reject!(payload, correlation_id);

    let started = Instant::now();
    let config = state.config();
    let options = request.pricing_options(config.default_pricing_options());
    let inputs = JobPricingInputs {
        billing_rate: request.billing_rate,
        production_rate: request.production_rate,
        drive_time_minutes: request.drive_time_minutes,
        work_units: request.work_units,
        buffer_percentage: request
            .buffer_percentage
            .unwrap_or(config.pricing().default_buffer_percentage),
    };

    let outcome = match request.line_item_loadout() {
        Some(loadout_id) => build_line_item(loadout_id, &inputs, options, 1).map(|(item, pricing)| {
            let steps = vec![pricing.audit_step.clone()];
            Outcome::new(
                PricingResponse {
                    pricing,
                    line_item: Some(item),
                },
                steps,
            )
        }),
        None => calculate_pricing(&inputs, options, 1).map(|pricing| {
            let steps = vec![pricing.audit_step.clone()];
            Outcome::new(
                PricingResponse {
                    pricing,
                    line_item: None,
                },
                steps,
            )
        }),
    };

    respond(config, correlation_id, started, "pricing", outcome)
}

/// Handler for GET /reference/codes.
async fn reference_codes_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing reference codes");

    let codes = ReferenceCodes {
        career_tracks: CareerTrack::all()
            .iter()
            .map(|track| CareerTrackEntry {
                code: track.code().to_string(),
                name: track.name().to_string(),
                category: track.category(),
                base_rate: track.base_rate(),
            })
            .collect(),
        tiers: TierLevel::all()
            .iter()
            .map(|tier| TierEntry {
                tier: tier.number(),
                name: tier.name().to_string(),
                description: tier.description().to_string(),
                multiplier: tier.multiplier(),
            })
            .collect(),
        add_ons: add_on_catalog(),
        margin_tiers: MARGIN_TIERS.to_vec(),
        maintenance_tiers: state.config().config().maintenance().tiers.clone(),
    };

    json_response(StatusCode::OK, codes)
}
