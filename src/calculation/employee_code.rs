//! Employee code generation and parsing.
//!
//! An employee code packs an employee's track, tier, add-ons and cross
//! training into one string:
//!
//! ```text
//! TRS4+FM+BKT+CRG+CDLA+ISA / X-CRN2+X-ATC3
//! └──┘ └──────────────────┘   └──────────────┘
//! track  add-ons in family      cross training
//! +tier  order                  (X-{role}{tier})
//! ```
//!
//! [`EmployeeCode`] is the strict form used when codes are created or
//! imported: any unknown segment is an error. [`parse_employee_code`] is the
//! lenient form used for display: it never fails and labels unknown
//! segments "Unknown".

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AddOn, CareerTrack, CodeTable, CrossTraining, DriverLicense, Employee,
    EquipmentCertification, LeadershipLevel, ProfessionalCertification, TierLevel,
};

/// Separates the primary segment from cross training.
pub const CROSS_TRAINING_SEPARATOR: &str = " / ";
/// Joins tokens within a segment.
pub const TOKEN_SEPARATOR: char = '+';
/// Prefix of every cross-training token.
pub const CROSS_TRAINING_PREFIX: &str = "X-";
/// Label given to segments that match no lookup table.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Length of every career track code.
const TRACK_CODE_LEN: usize = 3;

/// The components encoded by an employee code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCode {
    /// Primary career track.
    pub career_track: CareerTrack,
    /// Tier within the primary track.
    pub tier: TierLevel,
    /// Leadership level, if any.
    pub leadership: Option<LeadershipLevel>,
    /// Equipment certifications.
    pub equipment_certifications: BTreeSet<EquipmentCertification>,
    /// Driver licenses.
    pub driver_licenses: BTreeSet<DriverLicense>,
    /// Professional certifications.
    pub professional_certs: BTreeSet<ProfessionalCertification>,
    /// Cross training in recorded order.
    pub cross_training: Vec<CrossTraining>,
}

impl From<&Employee> for EmployeeCode {
    fn from(employee: &Employee) -> Self {
        Self {
            career_track: employee.career_track,
            tier: employee.tier,
            leadership: employee.leadership,
            equipment_certifications: employee.equipment_certifications.clone(),
            driver_licenses: employee.driver_licenses.clone(),
            professional_certs: employee.professional_certs.clone(),
            cross_training: employee.cross_training.clone(),
        }
    }
}

impl EmployeeCode {
    fn add_on_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.leadership
            .iter()
            .map(|a| a.code())
            .chain(self.equipment_certifications.iter().map(|a| a.code()))
            .chain(self.driver_licenses.iter().map(|a| a.code()))
            .chain(self.professional_certs.iter().map(|a| a.code()))
    }
}

impl fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.career_track.code(), self.tier.code())?;
        for code in self.add_on_codes() {
            write!(f, "{}{}", TOKEN_SEPARATOR, code)?;
        }
        for (index, entry) in self.cross_training.iter().enumerate() {
            if index == 0 {
                f.write_str(CROSS_TRAINING_SEPARATOR)?;
            } else {
                write!(f, "{}", TOKEN_SEPARATOR)?;
            }
            write!(
                f,
                "{}{}{}",
                CROSS_TRAINING_PREFIX,
                entry.role.code(),
                entry.tier.code()
            )?;
        }
        Ok(())
    }
}

/// Splits a `{track}{tier}` token at the fixed track-code length.
fn split_track_token(token: &str) -> Option<(&str, &str)> {
    if token.is_char_boundary(TRACK_CODE_LEN) && token.len() > TRACK_CODE_LEN {
        Some(token.split_at(TRACK_CODE_LEN))
    } else {
        None
    }
}

fn parse_track_and_tier(token: &str) -> EngineResult<(CareerTrack, TierLevel)> {
    let (track, tier) = split_track_token(token).ok_or_else(|| EngineError::UnrecognizedCode {
        kind: CareerTrack::KIND.to_string(),
        code: token.to_string(),
    })?;
    Ok((CareerTrack::parse_code(track)?, TierLevel::parse_code(tier)?))
}

impl FromStr for EmployeeCode {
    type Err = EngineError;

    fn from_str(code: &str) -> EngineResult<Self> {
        if code.trim().is_empty() {
            return Err(EngineError::InvalidInput {
                field: "employee_code".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let (primary, cross) = match code.split_once(CROSS_TRAINING_SEPARATOR) {
            Some((primary, cross)) => (primary, Some(cross)),
            None => (code, None),
        };

        let mut tokens = primary.split(TOKEN_SEPARATOR);
        let first = tokens.next().unwrap_or_default();
        let (career_track, tier) = parse_track_and_tier(first)?;

        let mut parsed = EmployeeCode {
            career_track,
            tier,
            leadership: None,
            equipment_certifications: BTreeSet::new(),
            driver_licenses: BTreeSet::new(),
            professional_certs: BTreeSet::new(),
            cross_training: Vec::new(),
        };

        let mut seen = BTreeSet::new();
        for token in tokens {
            if !seen.insert(token) {
                return Err(EngineError::InvalidInput {
                    field: "employee_code".to_string(),
                    message: format!("duplicate segment '{}' in '{}'", token, code),
                });
            }
            if let Some(level) = LeadershipLevel::from_code(token) {
                if parsed.leadership.replace(level).is_some() {
                    return Err(EngineError::InvalidInput {
                        field: "employee_code".to_string(),
                        message: format!("more than one leadership level in '{}'", code),
                    });
                }
            } else if let Some(cert) = EquipmentCertification::from_code(token) {
                parsed.equipment_certifications.insert(cert);
            } else if let Some(license) = DriverLicense::from_code(token) {
                parsed.driver_licenses.insert(license);
            } else if let Some(cert) = ProfessionalCertification::from_code(token) {
                parsed.professional_certs.insert(cert);
            } else {
                return Err(EngineError::UnrecognizedCode {
                    kind: "add-on".to_string(),
                    code: token.to_string(),
                });
            }
        }

        if let Some(cross) = cross {
            for token in cross.split(TOKEN_SEPARATOR) {
                let body = token.strip_prefix(CROSS_TRAINING_PREFIX).ok_or_else(|| {
                    EngineError::UnrecognizedCode {
                        kind: "cross training".to_string(),
                        code: token.to_string(),
                    }
                })?;
                let (role, tier) = parse_track_and_tier(body)?;
                parsed.cross_training.push(CrossTraining { role, tier });
            }
        }

        Ok(parsed)
    }
}

/// Generates the employee code for an employee.
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::generate_employee_code;
/// use tree_pricing_engine::models::{
///     CareerTrack, CrossTraining, DriverLicense, Employee, LeadershipLevel, TierLevel,
/// };
/// use rust_decimal::Decimal;
///
/// let mut employee = Employee::new(
///     "emp_001",
///     "Jordan Reyes",
///     CareerTrack::ArboristClimber,
///     TierLevel::Senior,
///     Decimal::new(15, 1),
/// );
/// employee.leadership = Some(LeadershipLevel::CrewLeader);
/// employee.driver_licenses.insert(DriverLicense::ClassB);
/// employee.cross_training.push(CrossTraining {
///     role: CareerTrack::RemovalSpecialist,
///     tier: TierLevel::Technician,
/// });
///
/// assert_eq!(generate_employee_code(&employee), "ATC3+CL+CDLB / X-TRS2");
/// ```
pub fn generate_employee_code(employee: &Employee) -> String {
    EmployeeCode::from(employee).to_string()
}

/// What a segment of a parsed code refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Primary career track.
    CareerTrack,
    /// Primary tier.
    Tier,
    /// Leadership add-on.
    Leadership,
    /// Equipment certification add-on.
    Equipment,
    /// Driver license add-on.
    Driver,
    /// Professional certification add-on.
    Certification,
    /// Cross-training entry.
    CrossTraining,
    /// Matched no table.
    Unknown,
}

/// One labelled piece of an employee code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSegment {
    /// The raw text of the segment.
    pub code: String,
    /// What the segment was recognized as.
    pub kind: SegmentKind,
    /// Display label ("Unknown" when unrecognized).
    pub label: String,
}

impl CodeSegment {
    fn new(code: &str, kind: SegmentKind, label: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            kind,
            label: label.into(),
        }
    }

    fn unknown(code: &str) -> Self {
        Self::new(code, SegmentKind::Unknown, UNKNOWN_LABEL)
    }

    fn add_on<A: AddOn>(code: &str, add_on: A, kind: SegmentKind) -> Self {
        let info = add_on.info();
        Self::new(code, kind, format!("{} (+${}/h)", info.name, info.premium.normalize()))
    }
}

/// A display-oriented parse of an employee code.
///
/// Recognized components are filled in; everything else is still present in
/// `segments` with the "Unknown" label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParsedEmployeeCode {
    /// Primary career track, if recognized.
    pub career_track: Option<CareerTrack>,
    /// Primary tier, if recognized.
    pub tier: Option<TierLevel>,
    /// Leadership level, if recognized.
    pub leadership: Option<LeadershipLevel>,
    /// Recognized equipment certifications.
    pub equipment_certifications: BTreeSet<EquipmentCertification>,
    /// Recognized driver licenses.
    pub driver_licenses: BTreeSet<DriverLicense>,
    /// Recognized professional certifications.
    pub professional_certs: BTreeSet<ProfessionalCertification>,
    /// Recognized cross training.
    pub cross_training: Vec<CrossTraining>,
    /// Every segment in code order with its label.
    pub segments: Vec<CodeSegment>,
}

impl ParsedEmployeeCode {
    /// True if every segment matched a lookup table.
    pub fn is_fully_recognized(&self) -> bool {
        !self.segments.is_empty()
            && self
                .segments
                .iter()
                .all(|segment| segment.kind != SegmentKind::Unknown)
    }

    /// Raw text of every unrecognized segment.
    pub fn unrecognized(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Unknown)
            .map(|segment| segment.code.as_str())
            .collect()
    }

    fn parse_primary(&mut self, token: &str) {
        let Some((track_code, tier_code)) = split_track_token(token) else {
            self.segments.push(CodeSegment::unknown(token));
            return;
        };

        self.career_track = CareerTrack::from_code(track_code);
        self.segments.push(match self.career_track {
            Some(track) => CodeSegment::new(track_code, SegmentKind::CareerTrack, track.name()),
            None => CodeSegment::unknown(track_code),
        });

        self.tier = TierLevel::from_code(tier_code);
        self.segments.push(match self.tier {
            Some(tier) => CodeSegment::new(
                tier_code,
                SegmentKind::Tier,
                format!("Tier {} {}", tier.number(), tier.name()),
            ),
            None => CodeSegment::unknown(tier_code),
        });
    }

    fn parse_add_on(&mut self, token: &str) {
        let segment = if let Some(level) = LeadershipLevel::from_code(token) {
            // Only one leadership level applies; later ones are not honored.
            if self.leadership.is_some() {
                CodeSegment::unknown(token)
            } else {
                self.leadership = Some(level);
                CodeSegment::add_on(token, level, SegmentKind::Leadership)
            }
        } else if let Some(cert) = EquipmentCertification::from_code(token) {
            self.equipment_certifications.insert(cert);
            CodeSegment::add_on(token, cert, SegmentKind::Equipment)
        } else if let Some(license) = DriverLicense::from_code(token) {
            self.driver_licenses.insert(license);
            CodeSegment::add_on(token, license, SegmentKind::Driver)
        } else if let Some(cert) = ProfessionalCertification::from_code(token) {
            self.professional_certs.insert(cert);
            CodeSegment::add_on(token, cert, SegmentKind::Certification)
        } else {
            CodeSegment::unknown(token)
        };
        self.segments.push(segment);
    }

    fn parse_cross_training(&mut self, token: &str) {
        let entry = token
            .strip_prefix(CROSS_TRAINING_PREFIX)
            .and_then(split_track_token)
            .and_then(|(role, tier)| {
                Some(CrossTraining {
                    role: CareerTrack::from_code(role)?,
                    tier: TierLevel::from_code(tier)?,
                })
            });

        let segment = match entry {
            Some(entry) => {
                self.cross_training.push(entry);
                CodeSegment::new(
                    token,
                    SegmentKind::CrossTraining,
                    format!("{} (Tier {})", entry.role.name(), entry.tier.number()),
                )
            }
            None => CodeSegment::unknown(token),
        };
        self.segments.push(segment);
    }
}

/// Parses an employee code for display without ever failing.
///
/// # Examples
///
/// ```
/// use tree_pricing_engine::calculation::parse_employee_code;
/// use tree_pricing_engine::models::CareerTrack;
///
/// let parsed = parse_employee_code("ATC3+CL+NOPE");
/// assert_eq!(parsed.career_track, Some(CareerTrack::ArboristClimber));
/// assert_eq!(parsed.unrecognized(), vec!["NOPE"]);
/// ```
pub fn parse_employee_code(code: &str) -> ParsedEmployeeCode {
    let mut parsed = ParsedEmployeeCode::default();
    let code = code.trim();
    if code.is_empty() {
        return parsed;
    }

    let (primary, cross) = match code.split_once(CROSS_TRAINING_SEPARATOR) {
        Some((primary, cross)) => (primary, Some(cross)),
        None => (code, None),
    };

    let mut tokens = primary.split(TOKEN_SEPARATOR);
    if let Some(first) = tokens.next() {
        parsed.parse_primary(first);
    }
    for token in tokens {
        parsed.parse_add_on(token);
    }
    if let Some(cross) = cross {
        for token in cross.split(TOKEN_SEPARATOR) {
            parsed.parse_cross_training(token);
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_full_employee() -> Employee {
        let mut employee = Employee::new(
            "emp_002",
            "Sam Okafor",
            CareerTrack::RemovalSpecialist,
            TierLevel::Lead,
            Decimal::new(142, 2),
        );
        employee.leadership = Some(LeadershipLevel::Foreman);
        employee
            .equipment_certifications
            .insert(EquipmentCertification::CraneRigging);
        employee
            .equipment_certifications
            .insert(EquipmentCertification::BucketTruck);
        employee.driver_licenses.insert(DriverLicense::ClassA);
        employee
            .professional_certs
            .insert(ProfessionalCertification::CertifiedArborist);
        employee.cross_training = vec![
            CrossTraining {
                role: CareerTrack::CraneOperator,
                tier: TierLevel::Technician,
            },
            CrossTraining {
                role: CareerTrack::ArboristClimber,
                tier: TierLevel::Senior,
            },
        ];
        employee
    }

    /// CODE-001: plain employee code
    #[test]
    fn test_generate_without_add_ons() {
        let employee = Employee::new(
            "emp_001",
            "A",
            CareerTrack::Groundsperson,
            TierLevel::Apprentice,
            Decimal::new(13, 1),
        );
        assert_eq!(generate_employee_code(&employee), "GRD1");
    }

    /// CODE-002: add-ons appear in family order, cross training last
    #[test]
    fn test_generate_full_code() {
        assert_eq!(
            generate_employee_code(&create_full_employee()),
            "TRS4+FM+BKT+CRG+CDLA+ISA / X-CRN2+X-ATC3"
        );
    }

    #[test]
    fn test_generate_cross_training_only() {
        let mut employee = Employee::new(
            "emp_003",
            "B",
            CareerTrack::PlantHealthTechnician,
            TierLevel::Senior,
            Decimal::new(13, 1),
        );
        employee.cross_training.push(CrossTraining {
            role: CareerTrack::Groundsperson,
            tier: TierLevel::Master,
        });
        assert_eq!(generate_employee_code(&employee), "PHC3 / X-GRD5");
    }

    /// CODE-003: strict parse inverts generation
    #[test]
    fn test_strict_round_trip() {
        let employee = create_full_employee();
        let code = generate_employee_code(&employee);
        let parsed: EmployeeCode = code.parse().unwrap();
        assert_eq!(parsed, EmployeeCode::from(&employee));
        assert_eq!(parsed.to_string(), code);
    }

    #[test]
    fn test_strict_parse_accepts_any_add_on_order() {
        let parsed: EmployeeCode = "ATC2+ISA+CDLB+CL".parse().unwrap();
        assert_eq!(parsed.leadership, Some(LeadershipLevel::CrewLeader));
        assert!(parsed.driver_licenses.contains(&DriverLicense::ClassB));
        assert_eq!(parsed.to_string(), "ATC2+CL+CDLB+ISA");
    }

    #[test]
    fn test_strict_parse_rejects_unknown_track() {
        match "ZZZ3+CL".parse::<EmployeeCode>() {
            Err(EngineError::UnrecognizedCode { kind, code }) => {
                assert_eq!(kind, "career track");
                assert_eq!(code, "ZZZ");
            }
            other => panic!("Expected UnrecognizedCode, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_parse_rejects_bad_tier() {
        match "ATC9".parse::<EmployeeCode>() {
            Err(EngineError::UnrecognizedCode { kind, code }) => {
                assert_eq!(kind, "tier");
                assert_eq!(code, "9");
            }
            other => panic!("Expected UnrecognizedCode, got {:?}", other),
        }
        assert!("ATC".parse::<EmployeeCode>().is_err());
    }

    #[test]
    fn test_strict_parse_rejects_unknown_add_on() {
        match "ATC3+WIZ".parse::<EmployeeCode>() {
            Err(EngineError::UnrecognizedCode { kind, code }) => {
                assert_eq!(kind, "add-on");
                assert_eq!(code, "WIZ");
            }
            other => panic!("Expected UnrecognizedCode, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_parse_rejects_two_leadership_levels() {
        assert!(matches!(
            "ATC3+CL+FM".parse::<EmployeeCode>(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_strict_parse_rejects_repeated_add_on() {
        match "ATC3+BKT+BKT".parse::<EmployeeCode>() {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "employee_code");
                assert!(message.contains("'BKT'"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert!("ATC3+BKT+CHP".parse::<EmployeeCode>().is_ok());
    }

    #[test]
    fn test_strict_parse_requires_cross_training_prefix() {
        match "ATC3 / TRS2".parse::<EmployeeCode>() {
            Err(EngineError::UnrecognizedCode { kind, .. }) => assert_eq!(kind, "cross training"),
            other => panic!("Expected UnrecognizedCode, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_parse_rejects_empty() {
        assert!(matches!(
            "".parse::<EmployeeCode>(),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    /// CODE-004: display parse recovers every component
    #[test]
    fn test_display_parse_full_code() {
        let employee = create_full_employee();
        let parsed = parse_employee_code(&generate_employee_code(&employee));

        assert!(parsed.is_fully_recognized());
        assert_eq!(parsed.career_track, Some(CareerTrack::RemovalSpecialist));
        assert_eq!(parsed.tier, Some(TierLevel::Lead));
        assert_eq!(parsed.leadership, employee.leadership);
        assert_eq!(parsed.equipment_certifications, employee.equipment_certifications);
        assert_eq!(parsed.driver_licenses, employee.driver_licenses);
        assert_eq!(parsed.professional_certs, employee.professional_certs);
        assert_eq!(parsed.cross_training, employee.cross_training);
    }

    #[test]
    fn test_display_parse_labels_segments() {
        let parsed = parse_employee_code("ATC3+CL / X-TRS2");
        let labels: Vec<&str> = parsed.segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Arborist Tree Climber",
                "Tier 3 Senior Technician",
                "Crew Leader (+$2/h)",
                "Tree Removal Specialist (Tier 2)",
            ]
        );
    }

    /// CODE-005: unknown segments degrade to "Unknown" instead of failing
    #[test]
    fn test_display_parse_unknown_segments() {
        let parsed = parse_employee_code("QQQ7+CL+ZAP / X-NOPE1+TRS2");

        assert_eq!(parsed.career_track, None);
        assert_eq!(parsed.tier, None);
        assert_eq!(parsed.leadership, Some(LeadershipLevel::CrewLeader));
        assert!(parsed.cross_training.is_empty());
        assert_eq!(parsed.unrecognized(), vec!["QQQ", "7", "ZAP", "X-NOPE1", "TRS2"]);
        assert!(
            parsed
                .segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Unknown)
                .all(|s| s.label == UNKNOWN_LABEL)
        );
        assert!(!parsed.is_fully_recognized());
    }

    #[test]
    fn test_display_parse_second_leadership_is_unknown() {
        let parsed = parse_employee_code("ATC3+CL+FM");

        assert_eq!(parsed.leadership, Some(LeadershipLevel::CrewLeader));
        assert_eq!(parsed.unrecognized(), vec!["FM"]);
        assert!(!parsed.is_fully_recognized());
        assert_eq!(parsed.segments[3].label, UNKNOWN_LABEL);
    }

    #[test]
    fn test_display_parse_short_token() {
        let parsed = parse_employee_code("AT");
        assert_eq!(parsed.unrecognized(), vec!["AT"]);
    }

    #[test]
    fn test_display_parse_empty_string() {
        let parsed = parse_employee_code("   ");
        assert!(parsed.segments.is_empty());
        assert!(!parsed.is_fully_recognized());
    }

    #[test]
    fn test_display_parse_non_ascii_does_not_panic() {
        let parsed = parse_employee_code("ÄTC3+CL");
        assert_eq!(parsed.career_track, None);
        assert_eq!(parsed.leadership, Some(LeadershipLevel::CrewLeader));
    }
}
