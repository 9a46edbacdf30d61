//! Settlement pipeline.
//!
//! Composes proration, entitlements, withholding and aggregation into the
//! single entry point [`calculate_settlement`].

use rust_decimal::Decimal;

use crate::config::{CalculationPolicy, RateTableSet};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EmploymentFact, LineItemCategory, SettlementLineItem,
    SettlementResult, SettlementStatus,
};

use super::aggregation::aggregate;
use super::entitlements::compute_entitlements;
use super::proration::{Absences, prorate};
use super::withholding::calculate_withholdings;

/// Calculates the termination settlement for an employment fact.
///
/// The caller supplies the rate tables effective on the termination date
/// (see [`crate::config::RateSchedule::for_date`]) and the policies to
/// apply. The fact is expected to have passed
/// [`EmploymentFact::validate`].
///
/// A termination date on or before the admission date does not fail: the
/// result has status [`SettlementStatus::InvalidDateRange`], every line item
/// present with a zero amount, and zero withholdings and totals.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_settlement;
/// use settlement_engine::config::{CalculationPolicy, RateBracket, RateTable, RateTableSet};
/// use settlement_engine::models::{EmploymentFact, SettlementStatus, TerminationReason};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let tables = RateTableSet {
///     effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     social_security: RateTable::new("social_security", vec![
///         RateBracket::new(Decimal::new(778602, 2), Decimal::new(14, 2), Decimal::new(18118, 2)),
///     ]).unwrap(),
///     income_tax: RateTable::new("income_tax", vec![
///         RateBracket::unbounded(Decimal::ZERO, Decimal::ZERO),
///     ]).unwrap(),
///     income_tax_dependent_deduction: Decimal::new(18959, 2),
/// };
///
/// let fact = EmploymentFact {
///     monthly_salary: Decimal::new(300000, 2),
///     admission_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
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
///
/// let result = calculate_settlement(&fact, &tables, &CalculationPolicy::default());
/// assert_eq!(result.status, SettlementStatus::InvalidDateRange);
/// assert_eq!(result.line_items.len(), 11);
/// assert_eq!(result.net_total, Decimal::ZERO);
/// ```
pub fn calculate_settlement(
    fact: &EmploymentFact,
    tables: &RateTableSet,
    policy: &CalculationPolicy,
) -> SettlementResult {
    let absences = Absences {
        prorated: fact.unjustified_absences_prorated,
        accrued: fact.unjustified_absences_accrued,
    };

    let proration = prorate(
        fact.admission_date,
        fact.termination_date,
        absences,
        policy.proration,
        1,
    );

    if !proration.valid_range {
        return invalid_date_range(fact, proration.audit_steps, policy);
    }

    let mut step_number = 1 + proration.audit_steps.len() as u32;
    let mut audit_trace = AuditTrace {
        steps: proration.audit_steps,
        warnings: Vec::new(),
    };

    let entitlements = compute_entitlements(
        fact,
        &proration.summary,
        &policy.taxable_basis,
        step_number,
    );
    step_number += entitlements.audit_steps.len() as u32;
    audit_trace.steps.extend(entitlements.audit_steps);
    audit_trace.warnings.extend(entitlements.warnings);

    let withholding = calculate_withholdings(
        &entitlements.line_items,
        fact.dependents_count,
        tables,
        &policy.taxable_basis,
        step_number,
    );
    audit_trace.steps.extend(withholding.audit_steps);
    audit_trace.warnings.extend(withholding.warnings);

    let mut result = aggregate(
        entitlements.line_items,
        withholding.social_security,
        withholding.income_tax,
    );
    result.proration = proration.summary;
    result.proration.notice_days = entitlements.notice_days;
    result.withholding = withholding.breakdown;
    result.audit_trace = audit_trace;

    tracing::debug!(
        whole_months = result.proration.whole_months,
        gross_total = %result.gross_total,
        net_total = %result.net_total,
        rate_tables = %tables.effective_date,
        "Calculated settlement"
    );

    result
}

fn invalid_date_range(
    fact: &EmploymentFact,
    steps: Vec<AuditStep>,
    policy: &CalculationPolicy,
) -> SettlementResult {
    tracing::warn!(
        admission_date = %fact.admission_date,
        termination_date = %fact.termination_date,
        "Termination is not after admission"
    );

    let line_items = LineItemCategory::ALL
        .iter()
        .map(|&category| {
            SettlementLineItem::new(
                category,
                Decimal::ZERO,
                policy.taxable_basis.is_taxable(category),
            )
        })
        .collect();

    let mut result = aggregate(line_items, Decimal::ZERO, Decimal::ZERO);
    result.status = SettlementStatus::InvalidDateRange;
    result.audit_trace = AuditTrace {
        steps,
        warnings: vec![AuditWarning::new(
            "INVALID_DATE_RANGE",
            format!(
                "Termination date {} is not after admission date {}",
                fact.termination_date, fact.admission_date
            ),
            "high",
        )],
    };
    result
}
