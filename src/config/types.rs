//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: engine metadata and the
//! progressive rate tables, versioned by effective date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::policy::CalculationPolicy;

/// Metadata about the engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Short code for the rule set (e.g., "CLT").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version of the configuration.
    pub version: String,
    /// URL to the official legislation.
    pub source_url: String,
}

/// engine.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Engine metadata.
    #[serde(flatten)]
    pub metadata: EngineMetadata,
    /// Default calculation policy.
    #[serde(default)]
    pub policy: CalculationPolicy,
}

/// One band of a progressive rate table.
///
/// Withholding for a base that falls in this band is `base * rate - deduction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBracket {
    /// Ceiling of the band; `None` only on an uncapped final band.
    #[serde(default)]
    pub upper_threshold: Option<Decimal>,
    /// Rate in [0, 1].
    pub rate: Decimal,
    /// Amount subtracted after applying `rate`.
    #[serde(default)]
    pub deduction: Decimal,
}

impl RateBracket {
    /// Creates a capped bracket.
    pub fn new(upper_threshold: Decimal, rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_threshold: Some(upper_threshold),
            rate,
            deduction,
        }
    }

    /// Creates an uncapped final bracket.
    pub fn unbounded(rate: Decimal, deduction: Decimal) -> Self {
        Self {
            upper_threshold: None,
            rate,
            deduction,
        }
    }
}

/// An ordered progressive rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    brackets: Vec<RateBracket>,
}

impl RateTable {
    /// Creates a table, checking its invariants.
    ///
    /// `name` only labels the error.
    pub fn new(name: &str, brackets: Vec<RateBracket>) -> EngineResult<Self> {
        let table = Self { brackets };
        table.validate(name)?;
        Ok(table)
    }

    /// The brackets, ascending by threshold.
    pub fn brackets(&self) -> &[RateBracket] {
        &self.brackets
    }

    /// The ceiling of the final bracket, if capped.
    pub fn ceiling(&self) -> Option<Decimal> {
        self.brackets.last().and_then(|b| b.upper_threshold)
    }

    /// Checks that the table is non-empty, strictly ascending, has rates in
    /// [0, 1], non-negative deductions, and only an unbounded final bracket.
    pub fn validate(&self, name: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRateTable {
            table: name.to_string(),
            message,
        };

        if self.brackets.is_empty() {
            return Err(invalid("table has no brackets".to_string()));
        }

        let last_index = self.brackets.len() - 1;
        let mut previous: Option<Decimal> = None;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(invalid(format!(
                    "bracket {} rate {} is outside [0, 1]",
                    index + 1,
                    bracket.rate
                )));
            }
            if bracket.deduction < Decimal::ZERO {
                return Err(invalid(format!(
                    "bracket {} deduction {} is negative",
                    index + 1,
                    bracket.deduction
                )));
            }

            match bracket.upper_threshold {
                Some(threshold) => {
                    if threshold <= Decimal::ZERO {
                        return Err(invalid(format!(
                            "bracket {} threshold {} must be positive",
                            index + 1,
                            threshold
                        )));
                    }
                    if previous.is_some_and(|p| threshold <= p) {
                        return Err(invalid(format!(
                            "thresholds must be strictly ascending (bracket {} has {})",
                            index + 1,
                            threshold
                        )));
                    }
                    previous = Some(threshold);
                }
                None if index != last_index => {
                    return Err(invalid(format!(
                        "only the last bracket may omit its threshold (bracket {})",
                        index + 1
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// The rate tables in force from an effective date.
///
/// Loaded from `rates/<YYYY-MM-DD>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableSet {
    /// First day these tables apply.
    pub effective_date: NaiveDate,
    /// Social-security (INSS) contribution table; the last bracket is the cap.
    pub social_security: RateTable,
    /// Income-tax (IRRF) withholding table.
    pub income_tax: RateTable,
    /// Amount subtracted from the income-tax base per dependent.
    pub income_tax_dependent_deduction: Decimal,
}

impl RateTableSet {
    /// Checks both tables and the dependent deduction.
    pub fn validate(&self) -> EngineResult<()> {
        self.social_security.validate("social_security")?;
        self.income_tax.validate("income_tax")?;
        if self.income_tax_dependent_deduction < Decimal::ZERO {
            return Err(EngineError::InvalidRateTable {
                table: "income_tax".to_string(),
                message: format!(
                    "dependent deduction {} is negative",
                    self.income_tax_dependent_deduction
                ),
            });
        }
        Ok(())
    }
}

/// Every rate table set known to the engine.
#[derive(Debug, Clone)]
pub struct RateSchedule {
    /// Sets sorted oldest first.
    sets: Vec<RateTableSet>,
}

impl RateSchedule {
    /// Creates a schedule, sorting the sets by effective date.
    pub fn new(sets: Vec<RateTableSet>) -> Self {
        let mut sorted_sets = sets;
        sorted_sets.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self { sets: sorted_sets }
    }

    /// Returns all sets, oldest first.
    pub fn sets(&self) -> &[RateTableSet] {
        &self.sets
    }

    /// Returns the oldest set, if any.
    pub fn earliest(&self) -> Option<&RateTableSet> {
        self.sets.first()
    }

    /// Returns the most recent set effective on or before `date`.
    pub fn for_date(&self, date: NaiveDate) -> EngineResult<&RateTableSet> {
        self.sets
            .iter()
            .rfind(|set| set.effective_date <= date)
            .ok_or(EngineError::RateTableNotFound { date })
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    policy: CalculationPolicy,
    schedule: RateSchedule,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, policy: CalculationPolicy, schedule: RateSchedule) -> Self {
        Self {
            metadata,
            policy,
            schedule,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the default calculation policy.
    pub fn policy(&self) -> &CalculationPolicy {
        &self.policy
    }

    /// Returns the rate schedule.
    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }
}
