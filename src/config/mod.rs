//! Configuration loading and management for the Settlement Engine.
//!
//! This module loads engine metadata, the default calculation policy and the
//! versioned social-security and income-tax rate tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/clt").unwrap();
//! println!("Loaded rule set: {}", config.metadata().name);
//! ```

mod loader;
mod policy;
mod types;

pub use loader::ConfigLoader;
pub use policy::{CalculationPolicy, ProrationPolicy, TaxableBasisPolicy};
pub use types::{
    EngineConfig, EngineFile, EngineMetadata, RateBracket, RateSchedule, RateTable, RateTableSet,
};
