//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! metadata, default policy and versioned rate tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::policy::CalculationPolicy;
use super::types::{EngineConfig, EngineFile, EngineMetadata, RateSchedule, RateTableSet};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/clt/
/// ├── engine.yaml          # Metadata and default policy
/// └── rates/
///     └── 2024-01-01.yaml  # Rate tables effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/clt").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let tables = loader.rate_tables_for(date).unwrap();
/// println!("Tables effective {}", tables.effective_date);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if a required file is missing, contains invalid YAML, or holds a
    /// rate table that breaks its invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let engine = Self::load_yaml::<EngineFile>(&engine_path)?;

        let rates_dir = path.join("rates");
        let sets = Self::load_rates(&rates_dir)?;

        tracing::debug!(
            code = %engine.metadata.code,
            rate_sets = sets.len(),
            "Loaded engine configuration"
        );

        let config = EngineConfig::new(engine.metadata, engine.policy, RateSchedule::new(sets));
        Ok(Self { config })
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

    /// Loads and validates all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateTableSet>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut sets = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let set = Self::load_yaml::<RateTableSet>(&path)?;
                set.validate()?;
                sets.push(set);
            }
        }

        if sets.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Self::ensure_unique_effective_dates(&sets)?;
        Ok(sets)
    }

    /// Rejects two rate sets sharing an effective date.
    fn ensure_unique_effective_dates(sets: &[RateTableSet]) -> EngineResult<()> {
        let mut dates: Vec<NaiveDate> = sets.iter().map(|set| set.effective_date).collect();
        dates.sort();

        match dates.windows(2).find(|pair| pair[0] == pair[1]) {
            Some(pair) => Err(EngineError::InvalidRateTable {
                table: format!("rates/{}", pair[0]),
                message: format!("more than one rate file is effective on {}", pair[0]),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the default calculation policy.
    pub fn policy(&self) -> &CalculationPolicy {
        self.config.policy()
    }

    /// Returns the rate tables effective on `date`.
    pub fn rate_tables_for(&self, date: NaiveDate) -> EngineResult<&RateTableSet> {
        self.config.schedule().for_date(date)
    }
}
