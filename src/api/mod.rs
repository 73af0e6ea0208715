//! HTTP API module for the pricing engine.
//!
//! This module provides the REST API endpoints for equipment costs, employee
//! compensation and codes, loadout aggregation and job pricing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CompensationRequest, CrossTrainingRequest, EmployeeRequest, EquipmentCostRequest,
    EquipmentRequest, LoadoutAggregateRequest, MaintenanceRequest, ParseCodeRequest,
    PricingRequest,
};
pub use response::{
    ApiError, CareerTrackEntry, ParseCodeResponse, PricingResponse, ReferenceCodes, TierEntry,
};
pub use state::AppState;
