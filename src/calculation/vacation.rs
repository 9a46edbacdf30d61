//! Vacation pay calculation functionality.
//!
//! This module computes prorated vacation for the incomplete acquisition
//! period, overdue vacation owed at the simple rate, and overdue vacation
//! owed in double, each followed by its constitutional one-third bonus.

use rust_decimal::Decimal;

use crate::config::TaxableBasisPolicy;
use crate::models::{AuditStep, LineItemCategory, SettlementLineItem, round_currency};

use super::salary_balance::COMMERCIAL_MONTH_DAYS;
use super::thirteenth_salary::MONTHS_PER_YEAR;

/// Divisor of the constitutional one-third bonus.
pub const VACATION_BONUS_DIVISOR: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Multiplier for vacation periods granted late.
pub const DOUBLED_VACATION_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Inputs to the vacation calculation.
#[derive(Debug, Clone, Copy)]
pub struct VacationInput {
    /// Gross monthly salary.
    pub monthly_salary: Decimal,
    /// Whole months of service.
    pub whole_months: u32,
    /// Vacation days for the current period, after absences.
    pub vacation_days_entitlement: u32,
    /// Vacation days per overdue period, after absences.
    pub accrued_vacation_days: u32,
    /// Overdue periods at the simple rate.
    pub simple_periods: u32,
    /// Overdue periods owed in double.
    pub doubled_periods: u32,
}

/// The result of the vacation calculation.
#[derive(Debug, Clone)]
pub struct VacationResult {
    /// Six line items: prorated, overdue and doubled vacation, each followed
    /// by its bonus.
    pub line_items: Vec<SettlementLineItem>,
    /// One audit step per vacation kind.
    pub audit_steps: Vec<AuditStep>,
}

fn vacation_pair(
    pay_category: LineItemCategory,
    bonus_category: LineItemCategory,
    raw_pay: Decimal,
    policy: &TaxableBasisPolicy,
) -> (SettlementLineItem, SettlementLineItem) {
    let pay = round_currency(raw_pay);
    let bonus = round_currency(raw_pay / VACATION_BONUS_DIVISOR);
    (
        SettlementLineItem::new(pay_category, pay, policy.is_taxable(pay_category)),
        SettlementLineItem::new(bonus_category, bonus, policy.is_taxable(bonus_category)),
    )
}

/// Calculates all vacation entitlements.
///
/// - Prorated: `(salary / 30) * vacation_days / 12 * whole_months`
/// - Overdue: `vacation_days / 30 * salary` per simple period
/// - Doubled: twice the overdue value per doubled period
///
/// Each bonus is one third of its vacation pay.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::{calculate_vacation, VacationInput};
/// use settlement_engine::config::TaxableBasisPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = VacationInput {
///     monthly_salary: Decimal::from_str("3000.00").unwrap(),
///     whole_months: 6,
///     vacation_days_entitlement: 30,
///     accrued_vacation_days: 30,
///     simple_periods: 1,
///     doubled_periods: 0,
/// };
/// let result = calculate_vacation(&input, &TaxableBasisPolicy::default(), 1);
/// assert_eq!(result.line_items[0].gross_amount, Decimal::from_str("1500.00").unwrap());
/// assert_eq!(result.line_items[1].gross_amount, Decimal::from_str("500.00").unwrap());
/// assert_eq!(result.line_items[2].gross_amount, Decimal::from_str("3000.00").unwrap());
/// ```
pub fn calculate_vacation(
    input: &VacationInput,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> VacationResult {
    let salary = input.monthly_salary;

    let prorated_raw = salary
        * Decimal::from(input.vacation_days_entitlement)
        * Decimal::from(input.whole_months)
        / (COMMERCIAL_MONTH_DAYS * MONTHS_PER_YEAR);
    let (prorated, prorated_bonus) = vacation_pair(
        LineItemCategory::ProportionalVacation,
        LineItemCategory::ProportionalVacationBonus,
        prorated_raw,
        policy,
    );

    let period_value = salary * Decimal::from(input.accrued_vacation_days) / COMMERCIAL_MONTH_DAYS;
    let overdue_raw = period_value * Decimal::from(input.simple_periods);
    let (overdue, overdue_bonus) = vacation_pair(
        LineItemCategory::OverdueVacation,
        LineItemCategory::OverdueVacationBonus,
        overdue_raw,
        policy,
    );

    let doubled_raw =
        period_value * DOUBLED_VACATION_MULTIPLIER * Decimal::from(input.doubled_periods);
    let (doubled, doubled_bonus) = vacation_pair(
        LineItemCategory::DoubledVacation,
        LineItemCategory::DoubledVacationBonus,
        doubled_raw,
        policy,
    );

    let audit_steps = vec![
        AuditStep {
            step_number,
            rule_id: "proportional_vacation".to_string(),
            rule_name: "Proportional Vacation".to_string(),
            legal_basis: "CLT art. 146, sole paragraph; CF art. 7, XVII".to_string(),
            input: serde_json::json!({
                "monthly_salary": salary.to_string(),
                "vacation_days_entitlement": input.vacation_days_entitlement,
                "whole_months": input.whole_months
            }),
            output: serde_json::json!({
                "vacation": prorated.gross_amount.to_string(),
                "bonus": prorated_bonus.gross_amount.to_string()
            }),
            reasoning: format!(
                "R${} / 30 x {} days / 12 x {} months = R${}, plus 1/3 bonus R${}",
                salary.normalize(),
                input.vacation_days_entitlement,
                input.whole_months,
                prorated.gross_amount,
                prorated_bonus.gross_amount
            ),
        },
        AuditStep {
            step_number: step_number + 1,
            rule_id: "overdue_vacation".to_string(),
            rule_name: "Overdue Vacation".to_string(),
            legal_basis: "CLT art. 146; CF art. 7, XVII".to_string(),
            input: serde_json::json!({
                "monthly_salary": salary.to_string(),
                "accrued_vacation_days": input.accrued_vacation_days,
                "simple_periods": input.simple_periods
            }),
            output: serde_json::json!({
                "vacation": overdue.gross_amount.to_string(),
                "bonus": overdue_bonus.gross_amount.to_string()
            }),
            reasoning: format!(
                "{} period(s) x {} days of R${} / 30 = R${}, plus 1/3 bonus R${}",
                input.simple_periods,
                input.accrued_vacation_days,
                salary.normalize(),
                overdue.gross_amount,
                overdue_bonus.gross_amount
            ),
        },
        AuditStep {
            step_number: step_number + 2,
            rule_id: "doubled_vacation".to_string(),
            rule_name: "Doubled Vacation".to_string(),
            legal_basis: "CLT art. 137; CF art. 7, XVII".to_string(),
            input: serde_json::json!({
                "monthly_salary": salary.to_string(),
                "accrued_vacation_days": input.accrued_vacation_days,
                "doubled_periods": input.doubled_periods
            }),
            output: serde_json::json!({
                "vacation": doubled.gross_amount.to_string(),
                "bonus": doubled_bonus.gross_amount.to_string()
            }),
            reasoning: format!(
                "{} late period(s) x 2 x {} days of R${} / 30 = R${}, plus 1/3 bonus R${}",
                input.doubled_periods,
                input.accrued_vacation_days,
                salary.normalize(),
                doubled.gross_amount,
                doubled_bonus.gross_amount
            ),
        },
    ];

    VacationResult {
        line_items: vec![
            prorated,
            prorated_bonus,
            overdue,
            overdue_bonus,
            doubled,
            doubled_bonus,
        ],
        audit_steps,
    }
}
