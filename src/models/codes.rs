//! Shared behaviour for the fixed lookup tables.
//!
//! Career tracks, tiers and the four add-on families are closed enumerations.
//! Each one implements [`CodeTable`] so that persisted or user-supplied
//! strings can be resolved against it at the boundary, and the add-on
//! families additionally implement [`AddOn`] to expose their premiums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A closed table of entries identified by short string codes.
pub trait CodeTable: Copy + Sized + 'static {
    /// Human-readable name of the table, used in error messages.
    const KIND: &'static str;

    /// Every entry of the table in canonical order.
    fn all() -> &'static [Self];

    /// The code that identifies this entry.
    fn code(self) -> &'static str;

    /// Looks up an entry by its exact code.
    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|entry| entry.code() == code)
    }

    /// Looks up an entry by its exact code, failing with
    /// [`EngineError::UnrecognizedCode`] if there is none.
    fn parse_code(code: &str) -> EngineResult<Self> {
        Self::from_code(code).ok_or_else(|| EngineError::UnrecognizedCode {
            kind: Self::KIND.to_string(),
            code: code.to_string(),
        })
    }
}

/// The four independent add-on families an employee can hold.
///
/// The declaration order is the order add-ons appear in an employee code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnFamily {
    /// Crew leadership responsibilities.
    Leadership,
    /// Equipment operation certifications.
    Equipment,
    /// Commercial driver licenses.
    Driver,
    /// Professional industry certifications.
    Certification,
}

impl AddOnFamily {
    /// Display label for the family.
    pub fn label(self) -> &'static str {
        match self {
            AddOnFamily::Leadership => "Leadership",
            AddOnFamily::Equipment => "Equipment Certification",
            AddOnFamily::Driver => "Driver License",
            AddOnFamily::Certification => "Professional Certification",
        }
    }
}

/// Descriptive data attached to a single add-on entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnInfo {
    /// The add-on code as it appears in an employee code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Hourly premium added on top of the tiered base rate.
    pub premium: Decimal,
    /// Longer description of what the add-on represents.
    pub description: String,
}

/// An entry of one of the stackable add-on families.
pub trait AddOn: CodeTable + Ord {
    /// The family this add-on belongs to.
    const FAMILY: AddOnFamily;

    /// Returns the display name, premium and description.
    fn info(self) -> AddOnInfo;

    /// Shortcut for the hourly premium.
    fn premium(self) -> Decimal {
        self.info().premium
    }
}

/// Builds an [`AddOnInfo`] from static table data.
pub(crate) fn add_on_info(
    code: &str,
    name: &str,
    premium: Decimal,
    description: &str,
) -> AddOnInfo {
    AddOnInfo {
        code: code.to_string(),
        name: name.to_string(),
        premium,
        description: description.to_string(),
    }
}
