//! Employment fact model and related types.
//!
//! This module defines the [`EmploymentFact`] struct and [`TerminationReason`]
//! enum, the immutable input of a settlement calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The maximum number of worked days accepted for the final month.
pub const MAX_WORKED_DAYS_IN_MONTH: u32 = 31;

/// The largest monthly salary or fund balance accepted, in reais.
pub const MAX_MONETARY_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// The largest count of accrued leave periods accepted, per kind.
pub const MAX_ACCRUED_LEAVE_PERIODS: u32 = 100;

/// Why the employment contract ended.
///
/// Gates the indemnified notice period and the severance-fund penalty,
/// both of which are owed only for dismissal without cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Dismissal by the employer without just cause.
    WithoutCause,
    /// Dismissal by the employer for just cause.
    WithCause,
    /// The employee resigned.
    Resignation,
}

impl TerminationReason {
    /// Returns the snake_case name used in serialized output and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::WithoutCause => "without_cause",
            TerminationReason::WithCause => "with_cause",
            TerminationReason::Resignation => "resignation",
        }
    }

    /// Returns true if the reason is dismissal without cause.
    pub fn is_without_cause(&self) -> bool {
        *self == TerminationReason::WithoutCause
    }
}

/// The facts about an employment relationship needed to compute its settlement.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{EmploymentFact, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let fact = EmploymentFact {
///     monthly_salary: Decimal::new(300000, 2),
///     admission_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
///     termination_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     termination_reason: TerminationReason::WithoutCause,
///     dependents_count: 0,
///     worked_days_in_final_month: 0,
///     unjustified_absences_accrued: 0,
///     unjustified_absences_prorated: 0,
///     accrued_leave_periods_simple: 0,
///     accrued_leave_periods_doubled: 0,
///     severance_fund_balance: Decimal::ZERO,
/// };
/// assert!(fact.validate().is_ok());
/// assert!(fact.has_valid_date_range());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentFact {
    /// Gross monthly salary.
    pub monthly_salary: Decimal,
    /// First day of employment.
    pub admission_date: NaiveDate,
    /// Last day of employment.
    pub termination_date: NaiveDate,
    /// Why the contract ended.
    pub termination_reason: TerminationReason,
    /// Number of income-tax dependents.
    #[serde(default)]
    pub dependents_count: u32,
    /// Days worked in the final month and not yet paid.
    #[serde(default)]
    pub worked_days_in_final_month: u32,
    /// Unjustified absences in the overdue acquisition periods.
    #[serde(default)]
    pub unjustified_absences_accrued: u32,
    /// Unjustified absences in the current, incomplete acquisition period.
    #[serde(default)]
    pub unjustified_absences_prorated: u32,
    /// Overdue vacation periods owed at the simple rate.
    #[serde(default)]
    pub accrued_leave_periods_simple: u32,
    /// Overdue vacation periods owed in double because they were paid late.
    #[serde(default)]
    pub accrued_leave_periods_doubled: u32,
    /// Externally tracked severance-fund balance.
    #[serde(default)]
    pub severance_fund_balance: Decimal,
}

impl EmploymentFact {
    /// Returns true if the termination date is strictly after the admission date.
    pub fn has_valid_date_range(&self) -> bool {
        self.termination_date > self.admission_date
    }

    /// Checks the boundary invariants a caller must satisfy before calculating.
    ///
    /// The date range is intentionally not checked here; an inverted range
    /// yields a zeroed settlement flagged as invalid instead of an error.
    pub fn validate(&self) -> EngineResult<()> {
        if self.monthly_salary <= Decimal::ZERO {
            return Err(EngineError::InvalidEmploymentFact {
                field: "monthly_salary".to_string(),
                message: format!("must be positive, got {}", self.monthly_salary),
            });
        }

        if self.monthly_salary > MAX_MONETARY_AMOUNT {
            return Err(EngineError::InvalidEmploymentFact {
                field: "monthly_salary".to_string(),
                message: format!(
                    "must not exceed {}, got {}",
                    MAX_MONETARY_AMOUNT, self.monthly_salary
                ),
            });
        }

        if self.severance_fund_balance < Decimal::ZERO {
            return Err(EngineError::InvalidEmploymentFact {
                field: "severance_fund_balance".to_string(),
                message: format!("cannot be negative, got {}", self.severance_fund_balance),
            });
        }

        if self.severance_fund_balance > MAX_MONETARY_AMOUNT {
            return Err(EngineError::InvalidEmploymentFact {
                field: "severance_fund_balance".to_string(),
                message: format!(
                    "must not exceed {}, got {}",
                    MAX_MONETARY_AMOUNT, self.severance_fund_balance
                ),
            });
        }

        for (field, periods) in [
            ("accrued_leave_periods_simple", self.accrued_leave_periods_simple),
            ("accrued_leave_periods_doubled", self.accrued_leave_periods_doubled),
        ] {
            if periods > MAX_ACCRUED_LEAVE_PERIODS {
                return Err(EngineError::InvalidEmploymentFact {
                    field: field.to_string(),
                    message: format!(
                        "must be between 0 and {}, got {}",
                        MAX_ACCRUED_LEAVE_PERIODS, periods
                    ),
                });
            }
        }

        if self.worked_days_in_final_month > MAX_WORKED_DAYS_IN_MONTH {
            return Err(EngineError::InvalidEmploymentFact {
                field: "worked_days_in_final_month".to_string(),
                message: format!(
                    "must be between 0 and {}, got {}",
                    MAX_WORKED_DAYS_IN_MONTH, self.worked_days_in_final_month
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_fact() -> EmploymentFact {
        EmploymentFact {
            monthly_salary: dec("3000.00"),
            admission_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            termination_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            termination_reason: TerminationReason::WithoutCause,
            dependents_count: 0,
            worked_days_in_final_month: 0,
            unjustified_absences_accrued: 0,
            unjustified_absences_prorated: 0,
            accrued_leave_periods_simple: 0,
            accrued_leave_periods_doubled: 0,
            severance_fund_balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_deserialize_minimal_fact_uses_defaults() {
        let json = r#"{
            "monthly_salary": "2500.00",
            "admission_date": "2023-01-01",
            "termination_date": "2024-06-20",
            "termination_reason": "without_cause"
        }"#;

        let fact: EmploymentFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.monthly_salary, dec("2500.00"));
        assert_eq!(fact.termination_reason, TerminationReason::WithoutCause);
        assert_eq!(fact.dependents_count, 0);
        assert_eq!(fact.worked_days_in_final_month, 0);
        assert_eq!(fact.severance_fund_balance, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_full_fact() {
        let json = r#"{
            "monthly_salary": "4200.50",
            "admission_date": "2019-03-10",
            "termination_date": "2024-08-25",
            "termination_reason": "with_cause",
            "dependents_count": 2,
            "worked_days_in_final_month": 25,
            "unjustified_absences_accrued": 3,
            "unjustified_absences_prorated": 7,
            "accrued_leave_periods_simple": 1,
            "accrued_leave_periods_doubled": 1,
            "severance_fund_balance": "18000.00"
        }"#;

        let fact: EmploymentFact = serde_json::from_str(json).unwrap();
        assert_eq!(fact.termination_reason, TerminationReason::WithCause);
        assert_eq!(fact.dependents_count, 2);
        assert_eq!(fact.unjustified_absences_prorated, 7);
        assert_eq!(fact.accrued_leave_periods_doubled, 1);
        assert_eq!(fact.severance_fund_balance, dec("18000.00"));
    }

    #[test]
    fn test_termination_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&TerminationReason::WithoutCause).unwrap(),
            "\"without_cause\""
        );
        assert_eq!(
            serde_json::to_string(&TerminationReason::WithCause).unwrap(),
            "\"with_cause\""
        );
        assert_eq!(
            serde_json::to_string(&TerminationReason::Resignation).unwrap(),
            "\"resignation\""
        );
    }

    #[test]
    fn test_as_str_matches_serialized_name() {
        for reason in [
            TerminationReason::WithoutCause,
            TerminationReason::WithCause,
            TerminationReason::Resignation,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }

    #[test]
    fn test_valid_date_range() {
        let fact = create_test_fact();
        assert!(fact.has_valid_date_range());
    }

    #[test]
    fn test_same_day_is_invalid_date_range() {
        let mut fact = create_test_fact();
        fact.termination_date = fact.admission_date;
        assert!(!fact.has_valid_date_range());
    }

    #[test]
    fn test_validate_accepts_valid_fact() {
        assert!(create_test_fact().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_salary() {
        let mut fact = create_test_fact();
        fact.monthly_salary = Decimal::ZERO;

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, .. }) => {
                assert_eq!(field, "monthly_salary");
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_fund_balance() {
        let mut fact = create_test_fact();
        fact.severance_fund_balance = dec("-1.00");

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, .. }) => {
                assert_eq!(field, "severance_fund_balance");
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_too_many_worked_days() {
        let mut fact = create_test_fact();
        fact.worked_days_in_final_month = 32;

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, message }) => {
                assert_eq!(field, "worked_days_in_final_month");
                assert!(message.contains("32"));
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_does_not_reject_inverted_dates() {
        let mut fact = create_test_fact();
        fact.termination_date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(fact.validate().is_ok());
        assert!(!fact.has_valid_date_range());
    }

    #[test]
    fn test_validate_rejects_salary_above_maximum() {
        let mut fact = create_test_fact();
        fact.monthly_salary = dec("79228162514264337593543950335");

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, .. }) => {
                assert_eq!(field, "monthly_salary");
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_salary_at_maximum() {
        let mut fact = create_test_fact();
        fact.monthly_salary = MAX_MONETARY_AMOUNT;
        fact.severance_fund_balance = MAX_MONETARY_AMOUNT;
        assert!(fact.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_fund_balance_above_maximum() {
        let mut fact = create_test_fact();
        fact.severance_fund_balance = dec("1000000000000.01");

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, .. }) => {
                assert_eq!(field, "severance_fund_balance");
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_too_many_leave_periods() {
        let mut fact = create_test_fact();
        fact.accrued_leave_periods_doubled = 4_000_000_000;

        match fact.validate() {
            Err(EngineError::InvalidEmploymentFact { field, message }) => {
                assert_eq!(field, "accrued_leave_periods_doubled");
                assert!(message.contains("4000000000"));
            }
            other => panic!("Expected InvalidEmploymentFact, got {:?}", other),
        }

        fact.accrued_leave_periods_doubled = 0;
        fact.accrued_leave_periods_simple = MAX_ACCRUED_LEAVE_PERIODS + 1;
        assert!(fact.validate().is_err());
    }
}
