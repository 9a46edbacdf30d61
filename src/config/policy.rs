//! Calculation policies.
//!
//! Jurisprudence is not settled on how to apply the 15-day rule or on which
//! entitlements belong in the withholding base, so both choices are explicit
//! values chosen by the caller rather than constants in the calculators.

use serde::{Deserialize, Serialize};

use crate::models::LineItemCategory;

/// How a trailing partial month counts towards whole months of service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationPolicy {
    /// The partial period after the last whole month counts when it spans
    /// at least 15 days.
    #[default]
    TrailingDayCount,
    /// A partial period exists and the termination day-of-month is at least 15.
    DayOfMonth,
}

impl ProrationPolicy {
    /// Returns the snake_case name used in serialized output and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProrationPolicy::TrailingDayCount => "trailing_day_count",
            ProrationPolicy::DayOfMonth => "day_of_month",
        }
    }
}

/// Which entitlements enter the social-security and income-tax base.
///
/// Salary balance and 13th salary are always taxable; severance-fund items
/// never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxableBasisPolicy {
    /// Include the indemnified notice period.
    pub indemnified_notice: bool,
    /// Include vacation pay and its one-third bonuses.
    pub vacation: bool,
    /// Subtract the social-security withholding from the income-tax base.
    pub deduct_social_security_from_income_tax: bool,
}

impl Default for TaxableBasisPolicy {
    fn default() -> Self {
        Self {
            indemnified_notice: true,
            vacation: false,
            deduct_social_security_from_income_tax: true,
        }
    }
}

impl TaxableBasisPolicy {
    /// Treats notice and vacation as taxable and taxes the gross base.
    pub fn legacy_inclusive() -> Self {
        Self {
            indemnified_notice: true,
            vacation: true,
            deduct_social_security_from_income_tax: false,
        }
    }

    /// Returns true if items of `category` enter the withholding base.
    pub fn is_taxable(&self, category: LineItemCategory) -> bool {
        match category {
            LineItemCategory::SalaryBalance | LineItemCategory::ThirteenthSalary => true,
            LineItemCategory::IndemnifiedNotice => self.indemnified_notice,
            LineItemCategory::SeveranceFundDeposit | LineItemCategory::SeveranceFundPenalty => {
                false
            }
            LineItemCategory::ProportionalVacation
            | LineItemCategory::ProportionalVacationBonus
            | LineItemCategory::OverdueVacation
            | LineItemCategory::OverdueVacationBonus
            | LineItemCategory::DoubledVacation
            | LineItemCategory::DoubledVacationBonus => self.vacation,
        }
    }
}

/// The full set of policy choices for one calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationPolicy {
    /// 15-day rule variant.
    pub proration: ProrationPolicy,
    /// Withholding base membership.
    pub taxable_basis: TaxableBasisPolicy,
}
