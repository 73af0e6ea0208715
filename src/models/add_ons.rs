//! The four stackable add-on families.
//!
//! Premiums are purely additive: an employee's effective hourly rate is the
//! tiered base rate plus the premium of every add-on they hold, across all
//! families. Codes are unique across families so an employee code token
//! resolves to at most one add-on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::{AddOn, AddOnFamily, AddOnInfo, CodeTable, add_on_info};

/// Crew leadership level. An employee holds at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeadershipLevel {
    /// Leads a single crew on site.
    #[serde(rename = "CL")]
    CrewLeader,
    /// Oversees several crews.
    #[serde(rename = "FM")]
    Foreman,
    /// Responsible for a whole job site.
    #[serde(rename = "SUP")]
    SiteSupervisor,
    /// Runs field operations.
    #[serde(rename = "OPM")]
    OperationsManager,
}

impl CodeTable for LeadershipLevel {
    const KIND: &'static str = "leadership";

    fn all() -> &'static [Self] {
        &[
            LeadershipLevel::CrewLeader,
            LeadershipLevel::Foreman,
            LeadershipLevel::SiteSupervisor,
            LeadershipLevel::OperationsManager,
        ]
    }

    fn code(self) -> &'static str {
        match self {
            LeadershipLevel::CrewLeader => "CL",
            LeadershipLevel::Foreman => "FM",
            LeadershipLevel::SiteSupervisor => "SUP",
            LeadershipLevel::OperationsManager => "OPM",
        }
    }
}

impl AddOn for LeadershipLevel {
    const FAMILY: AddOnFamily = AddOnFamily::Leadership;

    fn info(self) -> AddOnInfo {
        match self {
            LeadershipLevel::CrewLeader => add_on_info(
                "CL",
                "Crew Leader",
                Decimal::new(200, 2),
                "Directs a single crew and its daily tailgate briefing",
            ),
            LeadershipLevel::Foreman => add_on_info(
                "FM",
                "Foreman",
                Decimal::new(350, 2),
                "Coordinates multiple crews and job sequencing",
            ),
            LeadershipLevel::SiteSupervisor => add_on_info(
                "SUP",
                "Site Supervisor",
                Decimal::new(500, 2),
                "Accountable for safety and progress of an entire site",
            ),
            LeadershipLevel::OperationsManager => add_on_info(
                "OPM",
                "Operations Manager",
                Decimal::new(750, 2),
                "Schedules crews and equipment across the company",
            ),
        }
    }
}

/// Certification to operate a specific piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentCertification {
    /// Aerial lift / bucket truck.
    #[serde(rename = "BKT")]
    BucketTruck,
    /// Brush chipper.
    #[serde(rename = "CHP")]
    Chipper,
    /// Stump grinder.
    #[serde(rename = "STG")]
    StumpGrinder,
    /// Skid steer or compact loader.
    #[serde(rename = "SKD")]
    SkidSteer,
    /// Knuckle-boom or grapple saw truck.
    #[serde(rename = "GST")]
    GrappleSawTruck,
    /// Crane rigging and signaling.
    #[serde(rename = "CRG")]
    CraneRigging,
}

impl CodeTable for EquipmentCertification {
    const KIND: &'static str = "equipment certification";

    fn all() -> &'static [Self] {
        &[
            EquipmentCertification::BucketTruck,
            EquipmentCertification::Chipper,
            EquipmentCertification::StumpGrinder,
            EquipmentCertification::SkidSteer,
            EquipmentCertification::GrappleSawTruck,
            EquipmentCertification::CraneRigging,
        ]
    }

    fn code(self) -> &'static str {
        match self {
            EquipmentCertification::BucketTruck => "BKT",
            EquipmentCertification::Chipper => "CHP",
            EquipmentCertification::StumpGrinder => "STG",
            EquipmentCertification::SkidSteer => "SKD",
            EquipmentCertification::GrappleSawTruck => "GST",
            EquipmentCertification::CraneRigging => "CRG",
        }
    }
}

impl AddOn for EquipmentCertification {
    const FAMILY: AddOnFamily = AddOnFamily::Equipment;

    fn info(self) -> AddOnInfo {
        match self {
            EquipmentCertification::BucketTruck => add_on_info(
                "BKT",
                "Bucket Truck",
                Decimal::new(150, 2),
                "Certified aerial lift operator",
            ),
            EquipmentCertification::Chipper => add_on_info(
                "CHP",
                "Chipper",
                Decimal::new(50, 2),
                "Trained on brush chipper feed and safety bar",
            ),
            EquipmentCertification::StumpGrinder => add_on_info(
                "STG",
                "Stump Grinder",
                Decimal::new(75, 2),
                "Operates self-propelled stump grinders",
            ),
            EquipmentCertification::SkidSteer => add_on_info(
                "SKD",
                "Skid Steer",
                Decimal::new(100, 2),
                "Operates skid steers and compact track loaders",
            ),
            EquipmentCertification::GrappleSawTruck => add_on_info(
                "GST",
                "Grapple Saw Truck",
                Decimal::new(400, 2),
                "Operates knuckle-boom grapple saw trucks",
            ),
            EquipmentCertification::CraneRigging => add_on_info(
                "CRG",
                "Crane Rigging",
                Decimal::new(250, 2),
                "Qualified rigger and signal person for crane removals",
            ),
        }
    }
}

/// Commercial driver license class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DriverLicense {
    /// Class A: combination vehicles.
    #[serde(rename = "CDLA")]
    ClassA,
    /// Class B: heavy straight trucks.
    #[serde(rename = "CDLB")]
    ClassB,
    /// Class C: small vehicles with hazmat or passengers.
    #[serde(rename = "CDLC")]
    ClassC,
}

impl CodeTable for DriverLicense {
    const KIND: &'static str = "driver license";

    fn all() -> &'static [Self] {
        &[DriverLicense::ClassA, DriverLicense::ClassB, DriverLicense::ClassC]
    }

    fn code(self) -> &'static str {
        match self {
            DriverLicense::ClassA => "CDLA",
            DriverLicense::ClassB => "CDLB",
            DriverLicense::ClassC => "CDLC",
        }
    }
}

impl AddOn for DriverLicense {
    const FAMILY: AddOnFamily = AddOnFamily::Driver;

    fn info(self) -> AddOnInfo {
        match self {
            DriverLicense::ClassA => add_on_info(
                "CDLA",
                "CDL Class A",
                Decimal::new(300, 2),
                "Tows trailers and drives combination vehicles",
            ),
            DriverLicense::ClassB => add_on_info(
                "CDLB",
                "CDL Class B",
                Decimal::new(200, 2),
                "Drives chip trucks and heavy straight trucks",
            ),
            DriverLicense::ClassC => add_on_info(
                "CDLC",
                "CDL Class C",
                Decimal::new(100, 2),
                "Transports hazardous materials in small vehicles",
            ),
        }
    }
}

/// Industry certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProfessionalCertification {
    /// ISA Certified Arborist.
    #[serde(rename = "ISA")]
    CertifiedArborist,
    /// Board Certified Master Arborist.
    #[serde(rename = "BCMA")]
    MasterArborist,
    /// Certified Treecare Safety Professional.
    #[serde(rename = "CTSP")]
    SafetyProfessional,
    /// Tree Risk Assessment Qualification.
    #[serde(rename = "TRAQ")]
    RiskAssessment,
    /// Utility line clearance.
    #[serde(rename = "UTIL")]
    LineClearance,
    /// Licensed pesticide applicator.
    #[serde(rename = "PEST")]
    PesticideApplicator,
}

impl CodeTable for ProfessionalCertification {
    const KIND: &'static str = "professional certification";

    fn all() -> &'static [Self] {
        &[
            ProfessionalCertification::CertifiedArborist,
            ProfessionalCertification::MasterArborist,
            ProfessionalCertification::SafetyProfessional,
            ProfessionalCertification::RiskAssessment,
            ProfessionalCertification::LineClearance,
            ProfessionalCertification::PesticideApplicator,
        ]
    }

    fn code(self) -> &'static str {
        match self {
            ProfessionalCertification::CertifiedArborist => "ISA",
            ProfessionalCertification::MasterArborist => "BCMA",
            ProfessionalCertification::SafetyProfessional => "CTSP",
            ProfessionalCertification::RiskAssessment => "TRAQ",
            ProfessionalCertification::LineClearance => "UTIL",
            ProfessionalCertification::PesticideApplicator => "PEST",
        }
    }
}

impl AddOn for ProfessionalCertification {
    const FAMILY: AddOnFamily = AddOnFamily::Certification;

    fn info(self) -> AddOnInfo {
        match self {
            ProfessionalCertification::CertifiedArborist => add_on_info(
                "ISA",
                "ISA Certified Arborist",
                Decimal::new(250, 2),
                "International Society of Arboriculture certification",
            ),
            ProfessionalCertification::MasterArborist => add_on_info(
                "BCMA",
                "Board Certified Master Arborist",
                Decimal::new(500, 2),
                "Highest ISA credential",
            ),
            ProfessionalCertification::SafetyProfessional => add_on_info(
                "CTSP",
                "Certified Treecare Safety Professional",
                Decimal::new(150, 2),
                "Leads crew safety programs",
            ),
            ProfessionalCertification::RiskAssessment => add_on_info(
                "TRAQ",
                "Tree Risk Assessment Qualified",
                Decimal::new(100, 2),
                "Performs formal tree risk assessments",
            ),
            ProfessionalCertification::LineClearance => add_on_info(
                "UTIL",
                "Line Clearance Qualified",
                Decimal::new(200, 2),
                "Works near energized utility lines",
            ),
            ProfessionalCertification::PesticideApplicator => add_on_info(
                "PEST",
                "Pesticide Applicator",
                Decimal::new(125, 2),
                "State-licensed to apply restricted-use products",
            ),
        }
    }
}
