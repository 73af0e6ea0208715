//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EquipmentCostModel, MaintenanceCost, MissingMemberPolicy, PricingOptions,
};

use super::types::{
    EngineConfig, EngineMetadata, MaintenanceConfig, MaintenanceTier, PricingDefaults,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query pricing defaults and maintenance tiers.
///
/// # Directory Structure
///
/// ```text
/// config/tree_service/
/// ├── engine.yaml       # Engine metadata
/// ├── pricing.yaml      # Default cost model, transport/buffer formulas
/// └── maintenance.yaml  # Maintenance tiers and oil change cost
/// ```
///
/// # Example
///
/// ```no_run
/// use tree_pricing_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tree_service").unwrap();
/// let tier = loader.get_maintenance_tier("heavy").unwrap();
/// println!("Heavy tier: ${}/year", tier.annual_base_cost);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if any required file is missing
    /// - `ConfigParseError` if a file contains invalid YAML or an
    ///   inconsistent setting (a scaled transport default without a rate, a
    ///   residual fraction outside `[0, 1)`, a negative maintenance cost)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let pricing_path = path.join("pricing.yaml");
        let pricing = Self::load_yaml::<PricingDefaults>(&pricing_path)?;
        Self::validate_pricing(&pricing, &pricing_path)?;

        let maintenance_path = path.join("maintenance.yaml");
        let maintenance = Self::load_yaml::<MaintenanceConfig>(&maintenance_path)?;
        Self::validate_maintenance(&maintenance, &maintenance_path)?;

        Ok(Self {
            config: EngineConfig::new(metadata, pricing, maintenance),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn invalid(path: &Path, message: String) -> EngineError {
        EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        }
    }

    fn validate_pricing(pricing: &PricingDefaults, path: &Path) -> EngineResult<()> {
        if pricing.transport_mode().is_none() {
            return Err(Self::invalid(
                path,
                "transport_mode 'scaled' requires transport_rate".to_string(),
            ));
        }
        let fraction = pricing.residual_value_fraction;
        if fraction < Decimal::ZERO || fraction >= Decimal::ONE {
            return Err(Self::invalid(
                path,
                format!("residual_value_fraction must be in [0, 1) (got {})", fraction),
            ));
        }
        if pricing.default_buffer_percentage < Decimal::ZERO {
            return Err(Self::invalid(
                path,
                "default_buffer_percentage must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_maintenance(maintenance: &MaintenanceConfig, path: &Path) -> EngineResult<()> {
        if maintenance.oil_change_cost < Decimal::ZERO {
            return Err(Self::invalid(path, "oil_change_cost must not be negative".to_string()));
        }
        if let Some((id, _)) = maintenance
            .tiers
            .iter()
            .find(|(_, tier)| tier.annual_base_cost < Decimal::ZERO)
        {
            return Err(Self::invalid(
                path,
                format!("tier '{}' has a negative annual_base_cost", id),
            ));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        self.config.engine()
    }

    /// Returns the pricing defaults.
    pub fn pricing(&self) -> &PricingDefaults {
        self.config.pricing()
    }

    /// The default equipment cost model.
    pub fn default_cost_model(&self) -> EquipmentCostModel {
        self.pricing().equipment_cost_model()
    }

    /// The default transport and buffer formulas.
    pub fn default_pricing_options(&self) -> PricingOptions {
        self.pricing().pricing_options()
    }

    /// The configured missing-member policy.
    pub fn missing_member_policy(&self) -> MissingMemberPolicy {
        self.pricing().missing_member_policy
    }

    /// Gets a maintenance tier by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tree_pricing_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/tree_service")?;
    /// let tier = loader.get_maintenance_tier("light")?;
    /// println!("{}", tier.name);
    /// # Ok::<(), tree_pricing_engine::error::EngineError>(())
    /// ```
    pub fn get_maintenance_tier(&self, tier: &str) -> EngineResult<&MaintenanceTier> {
        self.config
            .maintenance()
            .tiers
            .get(tier)
            .ok_or_else(|| EngineError::MaintenanceTierNotFound {
                tier: tier.to_string(),
            })
    }

    /// Builds a scheduled maintenance cost from a configured tier.
    ///
    /// `oil_change_cost` falls back to the configured default when `None`.
    pub fn scheduled_maintenance(
        &self,
        tier: &str,
        oil_changes_per_year: u32,
        oil_change_cost: Option<Decimal>,
    ) -> EngineResult<MaintenanceCost> {
        let tier = self.get_maintenance_tier(tier)?;
        Ok(MaintenanceCost::Scheduled {
            annual_base_cost: tier.annual_base_cost,
            oil_changes_per_year,
            oil_change_cost: oil_change_cost
                .unwrap_or(self.config.maintenance().oil_change_cost),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BufferMode, TransportMode};
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/tree_service"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.engine().code, "TREE_SERVICE");
        assert_eq!(loader.engine().currency, "USD");
    }

    #[test]
    fn test_default_strategies_are_primary_variants() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.default_cost_model(), EquipmentCostModel::StraightLine);
        assert_eq!(
            loader.default_pricing_options().transport,
            TransportMode::RoundTripMinutes
        );
        assert_eq!(
            loader.default_pricing_options().buffer,
            BufferMode::ProductionOnly
        );
        assert_eq!(
            loader.missing_member_policy(),
            MissingMemberPolicy::ExcludeAndFlag
        );
        assert_eq!(loader.pricing().default_buffer_percentage, dec("15"));
    }

    #[test]
    fn test_get_maintenance_tier() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let tier = loader.get_maintenance_tier("heavy").unwrap();
        assert_eq!(tier.name, "Heavy Equipment");
        assert_eq!(tier.annual_base_cost, dec("4800"));
    }

    #[test]
    fn test_unknown_maintenance_tier_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_maintenance_tier("unknown") {
            Err(EngineError::MaintenanceTierNotFound { tier }) => assert_eq!(tier, "unknown"),
            other => panic!("Expected MaintenanceTierNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_scheduled_maintenance_uses_default_oil_change_cost() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let maintenance = loader.scheduled_maintenance("medium", 4, None).unwrap();
        assert_eq!(
            maintenance,
            MaintenanceCost::Scheduled {
                annual_base_cost: dec("2400"),
                oil_changes_per_year: 4,
                oil_change_cost: dec("150"),
            }
        );

        let maintenance = loader
            .scheduled_maintenance("medium", 4, Some(dec("95")))
            .unwrap();
        assert!(matches!(
            maintenance,
            MaintenanceCost::Scheduled { oil_change_cost, .. } if oil_change_cost == dec("95")
        ));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
