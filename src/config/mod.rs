//! Configuration loading and management for the pricing engine.
//!
//! This module loads engine metadata, pricing defaults (which cost model,
//! transport and buffer formulas apply when a request does not say) and
//! maintenance tiers from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tree_pricing_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tree_service").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CostModelKind, EngineConfig, EngineMetadata, MaintenanceConfig, MaintenanceTier,
    PricingDefaults, TransportModeKind,
};
