//! Career tracks and tier levels.
//!
//! A career track is an employee's primary role; the tier (1-5) scales the
//! track's Tier-1 base rate by a fixed multiplier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::CodeTable;
use crate::error::{EngineError, EngineResult};

/// Broad grouping of career tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    /// Climbing, removal and ground work.
    FieldOperations,
    /// Heavy equipment operation.
    EquipmentOperations,
    /// Treatments, fertilization and diagnostics.
    PlantHealthCare,
    /// Estimating and consulting.
    SalesConsulting,
    /// Shop and office roles.
    Support,
}

impl TrackCategory {
    /// Display label for the category.
    pub fn label(self) -> &'static str {
        match self {
            TrackCategory::FieldOperations => "Field Operations",
            TrackCategory::EquipmentOperations => "Equipment Operations",
            TrackCategory::PlantHealthCare => "Plant Health Care",
            TrackCategory::SalesConsulting => "Sales & Consulting",
            TrackCategory::Support => "Support",
        }
    }
}

/// An employee's primary role classification.
///
/// Every code is exactly three upper-case ASCII letters, which lets the
/// employee-code parser split the career track from the tier digits.
///
/// # Example
///
/// ```
/// use tree_pricing_engine::models::{CareerTrack, CodeTable};
/// use rust_decimal::Decimal;
///
/// let track = CareerTrack::parse_code("ATC").unwrap();
/// assert_eq!(track, CareerTrack::ArboristClimber);
/// assert_eq!(track.base_rate(), Decimal::new(2400, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CareerTrack {
    /// Arborist tree climber.
    #[serde(rename = "ATC")]
    ArboristClimber,
    /// Tree removal specialist.
    #[serde(rename = "TRS")]
    RemovalSpecialist,
    /// Groundsperson.
    #[serde(rename = "GRD")]
    Groundsperson,
    /// Forestry equipment operator.
    #[serde(rename = "FOR")]
    ForestryOperator,
    /// Crane operator.
    #[serde(rename = "CRN")]
    CraneOperator,
    /// Plant health care technician.
    #[serde(rename = "PHC")]
    PlantHealthTechnician,
    /// Consulting arborist.
    #[serde(rename = "CAR")]
    ConsultingArborist,
    /// Sales estimator.
    #[serde(rename = "EST")]
    Estimator,
    /// Equipment mechanic.
    #[serde(rename = "MEC")]
    Mechanic,
    /// Office administrator.
    #[serde(rename = "ADM")]
    Administrator,
}

impl CareerTrack {
    /// Display name of the track.
    pub fn name(self) -> &'static str {
        match self {
            CareerTrack::ArboristClimber => "Arborist Tree Climber",
            CareerTrack::RemovalSpecialist => "Tree Removal Specialist",
            CareerTrack::Groundsperson => "Groundsperson",
            CareerTrack::ForestryOperator => "Forestry Equipment Operator",
            CareerTrack::CraneOperator => "Crane Operator",
            CareerTrack::PlantHealthTechnician => "Plant Health Care Technician",
            CareerTrack::ConsultingArborist => "Consulting Arborist",
            CareerTrack::Estimator => "Sales Estimator",
            CareerTrack::Mechanic => "Equipment Mechanic",
            CareerTrack::Administrator => "Office Administrator",
        }
    }

    /// The category the track belongs to.
    pub fn category(self) -> TrackCategory {
        match self {
            CareerTrack::ArboristClimber
            | CareerTrack::RemovalSpecialist
            | CareerTrack::Groundsperson => TrackCategory::FieldOperations,
            CareerTrack::ForestryOperator | CareerTrack::CraneOperator => {
                TrackCategory::EquipmentOperations
            }
            CareerTrack::PlantHealthTechnician => TrackCategory::PlantHealthCare,
            CareerTrack::ConsultingArborist | CareerTrack::Estimator => {
                TrackCategory::SalesConsulting
            }
            CareerTrack::Mechanic | CareerTrack::Administrator => TrackCategory::Support,
        }
    }

    /// The Tier-1 hourly rate for the track.
    pub fn base_rate(self) -> Decimal {
        match self {
            CareerTrack::ArboristClimber => Decimal::new(2400, 2),
            CareerTrack::RemovalSpecialist => Decimal::new(2500, 2),
            CareerTrack::Groundsperson => Decimal::new(1800, 2),
            CareerTrack::ForestryOperator => Decimal::new(2300, 2),
            CareerTrack::CraneOperator => Decimal::new(3000, 2),
            CareerTrack::PlantHealthTechnician => Decimal::new(2100, 2),
            CareerTrack::ConsultingArborist => Decimal::new(3200, 2),
            CareerTrack::Estimator => Decimal::new(2700, 2),
            CareerTrack::Mechanic => Decimal::new(2600, 2),
            CareerTrack::Administrator => Decimal::new(1900, 2),
        }
    }
}

impl CodeTable for CareerTrack {
    const KIND: &'static str = "career track";

    fn all() -> &'static [Self] {
        &[
            CareerTrack::ArboristClimber,
            CareerTrack::RemovalSpecialist,
            CareerTrack::Groundsperson,
            CareerTrack::ForestryOperator,
            CareerTrack::CraneOperator,
            CareerTrack::PlantHealthTechnician,
            CareerTrack::ConsultingArborist,
            CareerTrack::Estimator,
            CareerTrack::Mechanic,
            CareerTrack::Administrator,
        ]
    }

    fn code(self) -> &'static str {
        match self {
            CareerTrack::ArboristClimber => "ATC",
            CareerTrack::RemovalSpecialist => "TRS",
            CareerTrack::Groundsperson => "GRD",
            CareerTrack::ForestryOperator => "FOR",
            CareerTrack::CraneOperator => "CRN",
            CareerTrack::PlantHealthTechnician => "PHC",
            CareerTrack::ConsultingArborist => "CAR",
            CareerTrack::Estimator => "EST",
            CareerTrack::Mechanic => "MEC",
            CareerTrack::Administrator => "ADM",
        }
    }
}

/// Seniority level within a career track.
///
/// Serialized as its number (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TierLevel {
    /// Tier 1.
    Apprentice,
    /// Tier 2.
    Technician,
    /// Tier 3.
    Senior,
    /// Tier 4.
    Lead,
    /// Tier 5.
    Master,
}

impl TierLevel {
    /// The tier number (1-5).
    pub fn number(self) -> u8 {
        match self {
            TierLevel::Apprentice => 1,
            TierLevel::Technician => 2,
            TierLevel::Senior => 3,
            TierLevel::Lead => 4,
            TierLevel::Master => 5,
        }
    }

    /// Display name of the tier.
    pub fn name(self) -> &'static str {
        match self {
            TierLevel::Apprentice => "Apprentice",
            TierLevel::Technician => "Technician",
            TierLevel::Senior => "Senior Technician",
            TierLevel::Lead => "Lead",
            TierLevel::Master => "Master",
        }
    }

    /// What the tier means on the job.
    pub fn description(self) -> &'static str {
        match self {
            TierLevel::Apprentice => "Learning core skills under direct supervision",
            TierLevel::Technician => "Works independently on routine jobs",
            TierLevel::Senior => "Handles complex work and trains others",
            TierLevel::Lead => "Runs technical work on multi-crew jobs",
            TierLevel::Master => "Recognized expert for the track",
        }
    }

    /// Multiplier applied to the track's Tier-1 base rate.
    pub fn multiplier(self) -> Decimal {
        match self {
            TierLevel::Apprentice => Decimal::new(100, 2),
            TierLevel::Technician => Decimal::new(115, 2),
            TierLevel::Senior => Decimal::new(130, 2),
            TierLevel::Lead => Decimal::new(150, 2),
            TierLevel::Master => Decimal::new(175, 2),
        }
    }
}

impl TryFrom<u8> for TierLevel {
    type Error = EngineError;

    fn try_from(value: u8) -> EngineResult<Self> {
        match value {
            1 => Ok(TierLevel::Apprentice),
            2 => Ok(TierLevel::Technician),
            3 => Ok(TierLevel::Senior),
            4 => Ok(TierLevel::Lead),
            5 => Ok(TierLevel::Master),
            other => Err(EngineError::UnrecognizedCode {
                kind: Self::KIND.to_string(),
                code: other.to_string(),
            }),
        }
    }
}

impl From<TierLevel> for u8 {
    fn from(tier: TierLevel) -> Self {
        tier.number()
    }
}

impl CodeTable for TierLevel {
    const KIND: &'static str = "tier";

    fn all() -> &'static [Self] {
        &[
            TierLevel::Apprentice,
            TierLevel::Technician,
            TierLevel::Senior,
            TierLevel::Lead,
            TierLevel::Master,
        ]
    }

    fn code(self) -> &'static str {
        match self {
            TierLevel::Apprentice => "1",
            TierLevel::Technician => "2",
            TierLevel::Senior => "3",
            TierLevel::Lead => "4",
            TierLevel::Master => "5",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_every_track_code_is_three_uppercase_letters() {
        for track in CareerTrack::all() {
            let code = track.code();
            assert_eq!(code.len(), 3, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
        }
    }

    #[test]
    fn test_track_codes_resolve_back() {
        for track in CareerTrack::all() {
            assert_eq!(CareerTrack::from_code(track.code()), Some(*track));
        }
    }

    #[test]
    fn test_unknown_track_is_unrecognized() {
        match CareerTrack::parse_code("ZZZ") {
            Err(EngineError::UnrecognizedCode { kind, code }) => {
                assert_eq!(kind, "career track");
                assert_eq!(code, "ZZZ");
            }
            other => panic!("Expected UnrecognizedCode, got {:?}", other),
        }
    }

    #[test]
    fn test_track_serde_uses_code() {
        assert_eq!(
            serde_json::to_string(&CareerTrack::CraneOperator).unwrap(),
            "\"CRN\""
        );
        let track: CareerTrack = serde_json::from_str("\"PHC\"").unwrap();
        assert_eq!(track, CareerTrack::PlantHealthTechnician);
    }

    #[test]
    fn test_track_category() {
        assert_eq!(
            CareerTrack::ArboristClimber.category(),
            TrackCategory::FieldOperations
        );
        assert_eq!(CareerTrack::Mechanic.category().label(), "Support");
    }

    #[test]
    fn test_tier_multipliers() {
        assert_eq!(TierLevel::Apprentice.multiplier(), dec("1.00"));
        assert_eq!(TierLevel::Senior.multiplier(), dec("1.30"));
        assert_eq!(TierLevel::Master.multiplier(), dec("1.75"));
    }

    #[test]
    fn test_tier_multipliers_strictly_increase() {
        let multipliers: Vec<Decimal> = TierLevel::all().iter().map(|t| t.multiplier()).collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tier_try_from_range() {
        assert_eq!(TierLevel::try_from(3).unwrap(), TierLevel::Senior);
        assert!(TierLevel::try_from(0).is_err());
        assert!(TierLevel::try_from(6).is_err());
    }

    #[test]
    fn test_tier_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TierLevel::Lead).unwrap(), "4");
        let tier: TierLevel = serde_json::from_str("2").unwrap();
        assert_eq!(tier, TierLevel::Technician);
        assert!(serde_json::from_str::<TierLevel>("9").is_err());
    }
}
