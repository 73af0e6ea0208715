//! Employee model and related types.
//!
//! This module defines the Employee struct and the CrossTraining pair used
//! to describe secondary competencies.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::add_ons::{
    DriverLicense, EquipmentCertification, LeadershipLevel, ProfessionalCertification,
};
use super::career::{CareerTrack, TierLevel};

/// A secondary role the employee is trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CrossTraining {
    /// The secondary career track.
    pub role: CareerTrack,
    /// The tier held in that track.
    pub tier: TierLevel,
}

/// Represents a crew member whose cost is priced into loadouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Primary career track.
    pub career_track: CareerTrack,
    /// Tier within the primary track.
    pub tier: TierLevel,
    /// Optional override for the track's Tier-1 hourly rate.
    #[serde(default)]
    pub base_hourly_rate: Option<Decimal>,
    /// Factor applied to the wage to cover taxes, insurance and benefits.
    pub burden_multiplier: Decimal,
    /// Leadership level, if any.
    #[serde(default)]
    pub leadership: Option<LeadershipLevel>,
    /// Equipment certifications held.
    #[serde(default)]
    pub equipment_certifications: BTreeSet<EquipmentCertification>,
    /// Driver licenses held.
    #[serde(default)]
    pub driver_licenses: BTreeSet<DriverLicense>,
    /// Professional certifications held.
    #[serde(default)]
    pub professional_certs: BTreeSet<ProfessionalCertification>,
    /// Secondary competencies, in the order they were recorded.
    #[serde(default)]
    pub cross_training: Vec<CrossTraining>,
}

impl Employee {
    /// Creates an employee with no add-ons or cross training.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_pricing_engine::models::{CareerTrack, Employee, TierLevel};
    /// use rust_decimal::Decimal;
    ///
    /// let climber = Employee::new(
    ///     "emp_001",
    ///     "Jordan Reyes",
    ///     CareerTrack::ArboristClimber,
    ///     TierLevel::Senior,
    ///     Decimal::new(150, 2),
    /// );
    /// assert!(!climber.has_add_ons());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        career_track: CareerTrack,
        tier: TierLevel,
        burden_multiplier: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            career_track,
            tier,
            base_hourly_rate: None,
            burden_multiplier,
            leadership: None,
            equipment_certifications: BTreeSet::new(),
            driver_licenses: BTreeSet::new(),
            professional_certs: BTreeSet::new(),
            cross_training: Vec::new(),
        }
    }

    /// Returns true if the employee holds at least one add-on.
    pub fn has_add_ons(&self) -> bool {
        self.leadership.is_some()
            || !self.equipment_certifications.is_empty()
            || !self.driver_licenses.is_empty()
            || !self.professional_certs.is_empty()
    }
}
