//! Entitlement calculation.
//!
//! Runs every entitlement rule for an employment fact and its proration and
//! collects the line items in their fixed display order.

use crate::config::TaxableBasisPolicy;
use crate::models::{AuditStep, AuditWarning, EmploymentFact, ProrationSummary, SettlementLineItem};

use super::notice_period::calculate_notice_period;
use super::salary_balance::calculate_salary_balance;
use super::severance_fund::calculate_severance_fund;
use super::thirteenth_salary::calculate_thirteenth_salary;
use super::vacation::{VacationInput, calculate_vacation};

/// The result of computing all entitlements.
#[derive(Debug, Clone)]
pub struct EntitlementsResult {
    /// Line items in [`crate::models::LineItemCategory::ALL`] order.
    pub line_items: Vec<SettlementLineItem>,
    /// Notice days paid.
    pub notice_days: u32,
    /// Audit steps, one or more per rule.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised by the rules.
    pub warnings: Vec<AuditWarning>,
}

/// Computes every severance line item.
///
/// # Arguments
///
/// * `fact` - The employment facts
/// * `proration` - Whole months, whole years and vacation days
/// * `policy` - Which items are taxable
/// * `step_number` - The first step number for audit trail sequencing
pub fn compute_entitlements(
    fact: &EmploymentFact,
    proration: &ProrationSummary,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> EntitlementsResult {
    let mut step_number = step_number;
    let mut line_items = Vec::with_capacity(11);
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();

    let salary_balance = calculate_salary_balance(
        fact.monthly_salary,
        fact.worked_days_in_final_month,
        policy,
        step_number,
    );
    line_items.push(salary_balance.line_item);
    audit_steps.push(salary_balance.audit_step);
    step_number += 1;

    let thirteenth = calculate_thirteenth_salary(
        fact.monthly_salary,
        proration.whole_months,
        policy,
        step_number,
    );
    line_items.push(thirteenth.line_item);
    audit_steps.push(thirteenth.audit_step);
    step_number += 1;

    let vacation_input = VacationInput {
        monthly_salary: fact.monthly_salary,
        whole_months: proration.whole_months,
        vacation_days_entitlement: proration.vacation_days_entitlement,
        accrued_vacation_days: proration.accrued_vacation_days,
        simple_periods: fact.accrued_leave_periods_simple,
        doubled_periods: fact.accrued_leave_periods_doubled,
    };
    let vacation = calculate_vacation(&vacation_input, policy, step_number);
    line_items.extend(vacation.line_items);
    step_number += vacation.audit_steps.len() as u32;
    audit_steps.extend(vacation.audit_steps);

    let notice = calculate_notice_period(
        fact.monthly_salary,
        proration.whole_years,
        fact.termination_reason,
        policy,
        step_number,
    );
    line_items.push(notice.line_item);
    audit_steps.push(notice.audit_step);
    warnings.extend(notice.warning);
    step_number += 1;

    let fund = calculate_severance_fund(
        fact.monthly_salary,
        proration.whole_months,
        fact.severance_fund_balance,
        fact.termination_reason,
        policy,
        step_number,
    );
    line_items.push(fund.deposit);
    line_items.push(fund.penalty);
    audit_steps.push(fund.audit_step);

    tracing::debug!(
        line_items = line_items.len(),
        notice_days = notice.notice_days,
        "Computed entitlements"
    );

    EntitlementsResult {
        line_items,
        notice_days: notice.notice_days,
        audit_steps,
        warnings,
    }
}
