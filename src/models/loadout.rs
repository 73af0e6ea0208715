//! Loadout model.
//!
//! A loadout is a named bundle of equipment and crew used as the unit of
//! cost and pricing for a type of job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::strategy::{EquipmentCostModel, TransportMode};

/// A named bundle of equipment and employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    /// Unique identifier for the loadout.
    pub id: String,
    /// Display name (e.g. "Bucket truck trim crew").
    pub name: String,
    /// The kind of work this loadout prices (e.g. "pruning", "removal").
    pub service_type: String,
    /// References to member equipment.
    #[serde(default)]
    pub equipment_ids: Vec<String>,
    /// References to member employees.
    #[serde(default)]
    pub employee_ids: Vec<String>,
    /// Units of work completed per hour.
    pub production_rate: Decimal,
    /// Overhead cost per hour.
    #[serde(default)]
    pub overhead_cost: Decimal,
    /// When set, jobs priced with this loadout scale transport by this rate.
    #[serde(default)]
    pub transport_rate: Option<Decimal>,
    /// Equipment cost model used for members; the configured default if unset.
    #[serde(default)]
    pub cost_model: Option<EquipmentCostModel>,
}

impl Loadout {
    /// The transport formula jobs priced with this loadout use, falling back
    /// to `default` when the loadout has no explicit transport rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_pricing_engine::models::{Loadout, TransportMode};
    /// use rust_decimal::Decimal;
    ///
    /// let loadout = Loadout {
    ///     id: "lo_001".to_string(),
    ///     name: "Trim crew".to_string(),
    ///     service_type: "pruning".to_string(),
    ///     equipment_ids: vec![],
    ///     employee_ids: vec![],
    ///     production_rate: Decimal::new(2, 0),
    ///     overhead_cost: Decimal::ZERO,
    ///     transport_rate: Some(Decimal::new(2, 2)),
    ///     cost_model: None,
    /// };
    /// assert_eq!(
    ///     loadout.transport_mode(TransportMode::RoundTripMinutes),
    ///     TransportMode::Scaled { transport_rate: Decimal::new(2, 2) }
    /// );
    /// ```
    pub fn transport_mode(&self, default: TransportMode) -> TransportMode {
        match self.transport_rate {
            Some(transport_rate) => TransportMode::Scaled { transport_rate },
            None => default,
        }
    }
}
