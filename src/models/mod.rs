//! Core data models for the pricing engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the fixed lookup tables, equipment, employees, loadouts, line items and
//! the audit types attached to every result.

mod add_ons;
mod calculation_result;
mod career;
mod codes;
mod employee;
mod equipment;
mod line_item;
mod loadout;
mod strategy;

pub use add_ons::{DriverLicense, EquipmentCertification, LeadershipLevel, ProfessionalCertification};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationEnvelope};
pub use career::{CareerTrack, TierLevel, TrackCategory};
pub use codes::{AddOn, AddOnFamily, AddOnInfo, CodeTable};
pub use employee::{CrossTraining, Employee};
pub use equipment::{Equipment, EquipmentCostInputs, Financing, FuelCost, MaintenanceCost};
pub use line_item::PricingLineItem;
pub use loadout::Loadout;
pub use strategy::{
    BufferMode, DEFAULT_RESIDUAL_FRACTION, EquipmentCostModel, MissingMemberPolicy,
    PricingOptions, TransportMode,
};
