//! Request types for the pricing engine API.
//!
//! Lookup-table values arrive as plain codes ("ATC", "CDLB", tier 3) and are
//! resolved against the closed tables here, so unknown codes are rejected at
//! the boundary with `UnrecognizedCode`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BufferMode, CareerTrack, CodeTable, CrossTraining, Employee, Equipment, EquipmentCostInputs,
    EquipmentCostModel, Financing, FuelCost, LeadershipLevel, Loadout, MaintenanceCost,
    MissingMemberPolicy, PricingOptions, TierLevel, TransportMode,
};

/// A cross-training entry in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossTrainingRequest {
    /// Career track code of the secondary role.
    pub role: String,
    /// Tier number (1-5).
    pub tier: u8,
}

/// Employee information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Career track code (e.g., "ATC").
    pub career_track: String,
    /// Tier number (1-5).
    pub tier: u8,
    /// Optional override for the Tier-1 base rate.
    #[serde(default)]
    pub base_hourly_rate: Option<Decimal>,
    /// Burden multiplier (at least 1).
    pub burden_multiplier: Decimal,
    /// Leadership code (e.g., "CL").
    #[serde(default)]
    pub leadership: Option<String>,
    /// Equipment certification codes.
    #[serde(default)]
    pub equipment_certifications: Vec<String>,
    /// Driver license codes.
    #[serde(default)]
    pub driver_licenses: Vec<String>,
    /// Professional certification codes.
    #[serde(default)]
    pub professional_certs: Vec<String>,
    /// Secondary competencies.
    #[serde(default)]
    pub cross_training: Vec<CrossTrainingRequest>,
}

fn parse_set<T: CodeTable + Ord>(codes: &[String]) -> EngineResult<BTreeSet<T>> {
    codes.iter().map(|code| T::parse_code(code)).collect()
}

impl TryFrom<EmployeeRequest> for Employee {
    type Error = EngineError;

    fn try_from(req: EmployeeRequest) -> EngineResult<Self> {
        let cross_training = req
            .cross_training
            .iter()
            .map(|entry| {
                Ok(CrossTraining {
                    role: CareerTrack::parse_code(&entry.role)?,
                    tier: TierLevel::try_from(entry.tier)?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Employee {
            id: req.id,
            name: req.name,
            career_track: CareerTrack::parse_code(&req.career_track)?,
            tier: TierLevel::try_from(req.tier)?,
            base_hourly_rate: req.base_hourly_rate,
            burden_multiplier: req.burden_multiplier,
            leadership: req
                .leadership
                .as_deref()
                .map(LeadershipLevel::parse_code)
                .transpose()?,
            equipment_certifications: parse_set(&req.equipment_certifications)?,
            driver_licenses: parse_set(&req.driver_licenses)?,
            professional_certs: parse_set(&req.professional_certs)?,
            cross_training,
        })
    }
}

/// Request body for `POST /employees/compensation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationRequest {
    /// The employee to compensate.
    pub employee: EmployeeRequest,
}

/// Request body for `POST /employees/code/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCodeRequest {
    /// The employee code to parse.
    pub code: String,
    /// Reject the code if any segment is unrecognized.
    #[serde(default)]
    pub strict: bool,
}

/// Maintenance cost in a request, optionally by configured tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaintenanceRequest {
    /// A flat maintenance cost per operating hour.
    PerHour {
        /// Dollars per hour.
        cost_per_hour: Decimal,
    },
    /// An explicit maintenance schedule.
    Scheduled {
        /// Annual base maintenance cost.
        annual_base_cost: Decimal,
        /// Oil changes per year.
        oil_changes_per_year: u32,
        /// Cost of a single oil change.
        oil_change_cost: Decimal,
    },
    /// A schedule based on a configured maintenance tier.
    Tier {
        /// Tier id from `maintenance.yaml`.
        tier: String,
        /// Oil changes per year.
        oil_changes_per_year: u32,
        /// Overrides the configured oil change cost.
        #[serde(default)]
        oil_change_cost: Option<Decimal>,
    },
}

impl MaintenanceRequest {
    fn resolve(self, config: &ConfigLoader) -> EngineResult<MaintenanceCost> {
        match self {
            MaintenanceRequest::PerHour { cost_per_hour } => {
                Ok(MaintenanceCost::PerHour { cost_per_hour })
            }
            MaintenanceRequest::Scheduled {
                annual_base_cost,
                oil_changes_per_year,
                oil_change_cost,
            } => Ok(MaintenanceCost::Scheduled {
                annual_base_cost,
                oil_changes_per_year,
                oil_change_cost,
            }),
            MaintenanceRequest::Tier {
                tier,
                oil_changes_per_year,
                oil_change_cost,
            } => config.scheduled_maintenance(&tier, oil_changes_per_year, oil_change_cost),
        }
    }
}

/// Equipment information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentRequest {
    /// Unique identifier for the equipment.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Purchase price in dollars.
    pub purchase_price: Decimal,
    /// Useful life in years.
    pub useful_life_years: Decimal,
    /// Operating hours per year.
    pub annual_hours: Decimal,
    /// Annual insurance premium.
    #[serde(default)]
    pub insurance_annual: Decimal,
    /// Fuel cost.
    pub fuel: FuelCost,
    /// Maintenance cost.
    pub maintenance: MaintenanceRequest,
    /// Optional loan terms.
    #[serde(default)]
    pub financing: Option<Financing>,
}

impl EquipmentRequest {
    /// Resolves maintenance tiers against the configuration.
    pub fn into_equipment(self, config: &ConfigLoader) -> EngineResult<Equipment> {
        Ok(Equipment {
            id: self.id,
            name: self.name,
            inputs: EquipmentCostInputs {
                purchase_price: self.purchase_price,
                useful_life_years: self.useful_life_years,
                annual_hours: self.annual_hours,
                insurance_annual: self.insurance_annual,
                fuel: self.fuel,
                maintenance: self.maintenance.resolve(config)?,
                financing: self.financing,
            },
        })
    }
}

/// Request body for `POST /equipment/costs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentCostRequest {
    /// The equipment to cost.
    pub equipment: EquipmentRequest,
    /// Cost model; the configured default if omitted.
    #[serde(default)]
    pub cost_model: Option<EquipmentCostModel>,
}

/// Request body for `POST /loadouts/aggregate`.
///
/// `equipment` and `employees` are the snapshot the loadout's references are
/// resolved against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadoutAggregateRequest {
    /// The loadout to cost.
    pub loadout: Loadout,
    /// Equipment snapshot.
    #[serde(default)]
    pub equipment: Vec<EquipmentRequest>,
    /// Employee snapshot.
    #[serde(default)]
    pub employees: Vec<EmployeeRequest>,
    /// Overrides the configured missing-member policy.
    #[serde(default)]
    pub missing_member_policy: Option<MissingMemberPolicy>,
}

/// Request body for `POST /pricing/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Hourly billing rate (margin included).
    pub billing_rate: Decimal,
    /// Units of work per hour.
    pub production_rate: Decimal,
    /// One-way drive time in minutes.
    #[serde(default)]
    pub drive_time_minutes: Decimal,
    /// Units of work in the job.
    pub work_units: Decimal,
    /// Buffer percentage; the configured default if omitted.
    #[serde(default)]
    pub buffer_percentage: Option<Decimal>,
    /// Transport formula; the configured default if omitted.
    #[serde(default)]
    pub transport_mode: Option<TransportMode>,
    /// Buffer formula; the configured default if omitted.
    #[serde(default)]
    pub buffer_mode: Option<BufferMode>,
    /// When set, the result also carries a line item for this loadout.
    #[serde(default)]
    pub loadout_id: Option<String>,
    /// The loadout doing the job. Its transport rate applies when
    /// `transport_mode` is omitted.
    #[serde(default)]
    pub loadout: Option<Loadout>,
}

impl PricingRequest {
    /// Formulas for this request: explicit modes first, then the loadout's
    /// transport rate, then `defaults`.
    pub fn pricing_options(&self, defaults: PricingOptions) -> PricingOptions {
        let transport = match (self.transport_mode, &self.loadout) {
            (Some(mode), _) => mode,
            (None, Some(loadout)) => loadout.transport_mode(defaults.transport),
            (None, None) => defaults.transport,
        };
        PricingOptions {
            transport,
            buffer: self.buffer_mode.unwrap_or(defaults.buffer),
        }
    }

    /// The loadout a line item is built for, if any.
    pub fn line_item_loadout(&self) -> Option<&str> {
        self.loadout_id
            .as_deref()
            .or_else(|| self.loadout.as_ref().map(|loadout| loadout.id.as_str()))
    }
}
