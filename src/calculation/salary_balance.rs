//! Salary balance calculation functionality.
//!
//! This module computes the unpaid salary for the days worked in the final
//! month, using the 30-day commercial month.

use rust_decimal::Decimal;

use crate::config::TaxableBasisPolicy;
use crate::models::{AuditStep, LineItemCategory, SettlementLineItem, round_currency};

/// Days in the commercial month used to derive a daily rate.
pub const COMMERCIAL_MONTH_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Returns the daily rate for a monthly salary (salary / 30).
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::daily_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_rate(Decimal::new(3000, 0)), Decimal::new(100, 0));
/// ```
pub fn daily_rate(monthly_salary: Decimal) -> Decimal {
    monthly_salary / COMMERCIAL_MONTH_DAYS
}

/// The result of the salary balance calculation.
#[derive(Debug, Clone)]
pub struct SalaryBalanceResult {
    /// The salary balance line item.
    pub line_item: SettlementLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the salary owed for the days worked in the final month.
///
/// `(monthly_salary / 30) * worked_days`, rounded to cents.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_salary_balance;
/// use settlement_engine::config::TaxableBasisPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_salary_balance(
///     Decimal::from_str("2000.00").unwrap(),
///     25,
///     &TaxableBasisPolicy::default(),
///     1,
/// );
/// assert_eq!(result.line_item.gross_amount, Decimal::from_str("1666.67").unwrap());
/// assert!(result.line_item.is_taxable);
/// ```
pub fn calculate_salary_balance(
    monthly_salary: Decimal,
    worked_days: u32,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> SalaryBalanceResult {
    let category = LineItemCategory::SalaryBalance;
    let amount = round_currency(monthly_salary * Decimal::from(worked_days) / COMMERCIAL_MONTH_DAYS);

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_balance".to_string(),
        rule_name: "Salary Balance".to_string(),
        legal_basis: category.legal_basis().to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "worked_days": worked_days
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "R${} / 30 x {} days = R${}",
            monthly_salary.normalize(),
            worked_days,
            amount
        ),
    };

    SalaryBalanceResult {
        line_item: SettlementLineItem::new(category, amount, policy.is_taxable(category)),
        audit_step,
    }
}
