//! Settlement result models for the Settlement Engine.
//!
//! This module contains the [`SettlementResult`] type and its associated
//! structures that capture all outputs of a termination settlement: the
//! ordered line items, the withholding breakdown, totals and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a settlement line item.
///
/// Categories are listed in display order; [`LineItemCategory::ALL`] is the
/// order in which the calculator emits line items.
///
/// # Example
///
/// ```
/// use settlement_engine::models::LineItemCategory;
///
/// let category = LineItemCategory::ThirteenthSalary;
/// assert_eq!(category.label(), "13th salary (prorated)");
/// assert!(!category.is_vacation_related());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemCategory {
    /// Unpaid salary for the days worked in the final month.
    SalaryBalance,
    /// Prorated 13th salary.
    ThirteenthSalary,
    /// Prorated vacation for the incomplete acquisition period.
    ProportionalVacation,
    /// Constitutional one-third bonus on the prorated vacation.
    ProportionalVacationBonus,
    /// Overdue vacation periods owed at the simple rate.
    OverdueVacation,
    /// One-third bonus on the overdue vacation.
    OverdueVacationBonus,
    /// Overdue vacation periods owed in double.
    DoubledVacation,
    /// One-third bonus on the doubled vacation.
    DoubledVacationBonus,
    /// Notice period paid in lieu of worked notice.
    IndemnifiedNotice,
    /// Severance-fund deposits over the service period (informational).
    SeveranceFundDeposit,
    /// 40% penalty on the severance-fund balance.
    SeveranceFundPenalty,
}

impl LineItemCategory {
    /// Every category, in emission order.
    pub const ALL: [LineItemCategory; 11] = [
        LineItemCategory::SalaryBalance,
        LineItemCategory::ThirteenthSalary,
        LineItemCategory::ProportionalVacation,
        LineItemCategory::ProportionalVacationBonus,
        LineItemCategory::OverdueVacation,
        LineItemCategory::OverdueVacationBonus,
        LineItemCategory::DoubledVacation,
        LineItemCategory::DoubledVacationBonus,
        LineItemCategory::IndemnifiedNotice,
        LineItemCategory::SeveranceFundDeposit,
        LineItemCategory::SeveranceFundPenalty,
    ];

    /// Human-readable label used for display and CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            LineItemCategory::SalaryBalance => "Salary balance",
            LineItemCategory::ThirteenthSalary => "13th salary (prorated)",
            LineItemCategory::ProportionalVacation => "Vacation (prorated)",
            LineItemCategory::ProportionalVacationBonus => "1/3 bonus on prorated vacation",
            LineItemCategory::OverdueVacation => "Overdue vacation",
            LineItemCategory::OverdueVacationBonus => "1/3 bonus on overdue vacation",
            LineItemCategory::DoubledVacation => "Overdue vacation (doubled)",
            LineItemCategory::DoubledVacationBonus => "1/3 bonus on doubled vacation",
            LineItemCategory::IndemnifiedNotice => "Indemnified notice",
            LineItemCategory::SeveranceFundDeposit => "Severance fund (8% deposits)",
            LineItemCategory::SeveranceFundPenalty => "Severance fund penalty (40%)",
        }
    }

    /// The statute that grounds this entitlement.
    pub fn legal_basis(&self) -> &'static str {
        match self {
            LineItemCategory::SalaryBalance => "CLT art. 459",
            LineItemCategory::ThirteenthSalary => "Lei 4.090/1962 art. 3",
            LineItemCategory::ProportionalVacation => "CLT art. 146, sole paragraph",
            LineItemCategory::OverdueVacation => "CLT art. 146",
            LineItemCategory::DoubledVacation => "CLT art. 137",
            LineItemCategory::ProportionalVacationBonus
            | LineItemCategory::OverdueVacationBonus
            | LineItemCategory::DoubledVacationBonus => "CF art. 7, XVII",
            LineItemCategory::IndemnifiedNotice => "CLT art. 487; Lei 12.506/2011",
            LineItemCategory::SeveranceFundDeposit => "Lei 8.036/1990 art. 15",
            LineItemCategory::SeveranceFundPenalty => "Lei 8.036/1990 art. 18, §1",
        }
    }

    /// Returns true for vacation pay and its one-third bonuses.
    pub fn is_vacation_related(&self) -> bool {
        matches!(
            self,
            LineItemCategory::ProportionalVacation
                | LineItemCategory::ProportionalVacationBonus
                | LineItemCategory::OverdueVacation
                | LineItemCategory::OverdueVacationBonus
                | LineItemCategory::DoubledVacation
                | LineItemCategory::DoubledVacationBonus
        )
    }

    /// Returns true for severance-fund deposits and penalty.
    pub fn is_severance_fund_related(&self) -> bool {
        matches!(
            self,
            LineItemCategory::SeveranceFundDeposit | LineItemCategory::SeveranceFundPenalty
        )
    }
}

/// A single entitlement in a settlement.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{LineItemCategory, SettlementLineItem};
/// use rust_decimal::Decimal;
///
/// let item = SettlementLineItem::new(
///     LineItemCategory::IndemnifiedNotice,
///     Decimal::new(360000, 2),
///     true,
/// );
/// assert_eq!(item.label, "Indemnified notice");
/// assert!(item.is_taxable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementLineItem {
    /// The entitlement category.
    pub category: LineItemCategory,
    /// Display label.
    pub label: String,
    /// Gross amount, rounded to cents.
    pub gross_amount: Decimal,
    /// Whether the item enters the withholding base.
    pub is_taxable: bool,
    /// Statute grounding the entitlement.
    pub legal_basis: String,
}

impl SettlementLineItem {
    /// Creates a line item with the category's label and legal basis.
    pub fn new(category: LineItemCategory, gross_amount: Decimal, is_taxable: bool) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            gross_amount,
            is_taxable,
            legal_basis: category.legal_basis().to_string(),
        }
    }
}

/// Whether a settlement could be computed from its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// The settlement was computed normally (possibly to zero).
    Computed,
    /// Termination was not after admission; every amount is zero.
    InvalidDateRange,
}

/// The service-time counts the entitlements were derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProrationSummary {
    /// Whole months of service, after the 15-day rule.
    pub whole_months: u32,
    /// Whole years of service.
    pub whole_years: u32,
    /// Days in the trailing partial month.
    pub trailing_days: u32,
    /// Vacation days for the current acquisition period.
    pub vacation_days_entitlement: u32,
    /// Vacation days per overdue acquisition period.
    pub accrued_vacation_days: u32,
    /// Indemnified notice days, zero unless dismissed without cause.
    pub notice_days: u32,
}

/// How the withholdings were derived.
///
/// The 13th salary is withheld separately from the other taxable items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingBreakdown {
    /// Taxable items other than the 13th salary.
    pub salary_base: Decimal,
    /// Social security on `salary_base`.
    pub social_security_on_salary: Decimal,
    /// Income-tax base for `salary_base` after deductions.
    pub income_tax_base_on_salary: Decimal,
    /// Income tax on `income_tax_base_on_salary`.
    pub income_tax_on_salary: Decimal,
    /// The taxable 13th salary.
    pub thirteenth_base: Decimal,
    /// Social security on `thirteenth_base`.
    pub social_security_on_thirteenth: Decimal,
    /// Income-tax base for `thirteenth_base` after deductions.
    pub income_tax_base_on_thirteenth: Decimal,
    /// Income tax on `income_tax_base_on_thirteenth`.
    pub income_tax_on_thirteenth: Decimal,
    /// Total dependent allowance subtracted from each income-tax base.
    pub dependent_deduction: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statute for this rule.
    pub legal_basis: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag degraded or clamped inputs that did not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a settlement calculation.
///
/// Invariant: `net_total == gross_total - social_security_withholding - income_tax_withholding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// Whether the dates allowed a calculation.
    pub status: SettlementStatus,
    /// Service-time counts behind the entitlements.
    pub proration: ProrationSummary,
    /// Entitlements in emission order.
    pub line_items: Vec<SettlementLineItem>,
    /// Derivation of the withholdings.
    pub withholding: WithholdingBreakdown,
    /// Total social-security withholding.
    pub social_security_withholding: Decimal,
    /// Total income-tax withholding.
    pub income_tax_withholding: Decimal,
    /// Sum of all line items.
    pub gross_total: Decimal,
    /// Amount payable after withholdings.
    pub net_total: Decimal,
    /// Audit trace of every rule applied.
    pub audit_trace: AuditTrace,
}

impl SettlementResult {
    /// Returns true if the settlement was computed from a valid date range.
    pub fn is_computed(&self) -> bool {
        self.status == SettlementStatus::Computed
    }

    /// Finds the line item for a category.
    pub fn line_item(&self, category: LineItemCategory) -> Option<&SettlementLineItem> {
        self.line_items.iter().find(|item| item.category == category)
    }

    /// Returns the gross amount for a category, zero if absent.
    pub fn amount(&self, category: LineItemCategory) -> Decimal {
        self.line_item(category)
            .map(|item| item.gross_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of social-security and income-tax withholdings.
    pub fn total_withholding(&self) -> Decimal {
        self.social_security_withholding + self.income_tax_withholding
    }
}
