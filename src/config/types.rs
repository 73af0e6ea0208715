//! Configuration types for the pricing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{
    BufferMode, DEFAULT_RESIDUAL_FRACTION, EquipmentCostModel, MissingMemberPolicy,
    PricingOptions, TransportMode,
};

/// Metadata about the engine deployment, from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short identifier (e.g., "TREE_SERVICE").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version stamped on every calculation.
    pub version: String,
    /// ISO currency code all money values are in.
    pub currency: String,
}

/// Which equipment cost model is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostModelKind {
    /// Straight-line depreciation.
    #[default]
    StraightLine,
    /// Residual value plus financing interest.
    ResidualFinanced,
}

/// Which transport formula is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportModeKind {
    /// `minutes × 2 / 60`.
    #[default]
    RoundTripMinutes,
    /// `minutes × 2 × transport_rate`.
    Scaled,
}

fn default_residual_fraction() -> Decimal {
    DEFAULT_RESIDUAL_FRACTION
}

/// Pricing defaults from `pricing.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingDefaults {
    /// Default equipment cost model.
    #[serde(default)]
    pub equipment_cost_model: CostModelKind,
    /// Residual fraction used when the residual model is the default.
    #[serde(default = "default_residual_fraction")]
    pub residual_value_fraction: Decimal,
    /// Default transport formula.
    #[serde(default)]
    pub transport_mode: TransportModeKind,
    /// Transport rate for the scaled formula.
    #[serde(default)]
    pub transport_rate: Option<Decimal>,
    /// Default buffer formula.
    #[serde(default)]
    pub buffer_mode: BufferMode,
    /// Buffer percentage applied when a request omits one.
    pub default_buffer_percentage: Decimal,
    /// What aggregation does with unresolved loadout members.
    #[serde(default)]
    pub missing_member_policy: MissingMemberPolicy,
}

impl PricingDefaults {
    /// The configured default equipment cost model.
    pub fn equipment_cost_model(&self) -> EquipmentCostModel {
        match self.equipment_cost_model {
            CostModelKind::StraightLine => EquipmentCostModel::StraightLine,
            CostModelKind::ResidualFinanced => EquipmentCostModel::ResidualFinanced {
                residual_fraction: self.residual_value_fraction,
            },
        }
    }

    /// The configured default transport formula.
    ///
    /// Returns `None` if the scaled formula is selected without a rate.
    pub fn transport_mode(&self) -> Option<TransportMode> {
        match self.transport_mode {
            TransportModeKind::RoundTripMinutes => Some(TransportMode::RoundTripMinutes),
            TransportModeKind::Scaled => self
                .transport_rate
                .map(|transport_rate| TransportMode::Scaled { transport_rate }),
        }
    }

    /// Default transport and buffer formulas together.
    pub fn pricing_options(&self) -> PricingOptions {
        PricingOptions {
            transport: self.transport_mode().unwrap_or_default(),
            buffer: self.buffer_mode,
        }
    }
}

/// A named maintenance schedule tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceTier {
    /// Display name.
    pub name: String,
    /// Annual base maintenance cost.
    pub annual_base_cost: Decimal,
    /// What kind of equipment the tier fits.
    #[serde(default)]
    pub description: String,
}

/// Maintenance configuration from `maintenance.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceConfig {
    /// Cost of one oil change when equipment does not specify one.
    pub oil_change_cost: Decimal,
    /// Tiers keyed by id (e.g., "heavy").
    pub tiers: BTreeMap<String, MaintenanceTier>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    pricing: PricingDefaults,
    maintenance: MaintenanceConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        pricing: PricingDefaults,
        maintenance: MaintenanceConfig,
    ) -> Self {
        Self {
            metadata,
            pricing,
            maintenance,
        }
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the pricing defaults.
    pub fn pricing(&self) -> &PricingDefaults {
        &self.pricing
    }

    /// Returns the maintenance configuration.
    pub fn maintenance(&self) -> &MaintenanceConfig {
        &self.maintenance
    }
}
