//! Prorated 13th salary calculation.
//!
//! One twelfth of the monthly salary per whole month of service. Absences do
//! not reduce it.

use rust_decimal::Decimal;

use crate::config::TaxableBasisPolicy;
use crate::models::{AuditStep, LineItemCategory, SettlementLineItem, round_currency};

/// Months in the 13th-salary year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of the 13th salary calculation.
#[derive(Debug, Clone)]
pub struct ThirteenthSalaryResult {
    /// The 13th salary line item.
    pub line_item: SettlementLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the prorated 13th salary: `(monthly_salary / 12) * whole_months`.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_thirteenth_salary;
/// use settlement_engine::config::TaxableBasisPolicy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_thirteenth_salary(
///     Decimal::from_str("3000.00").unwrap(),
///     24,
///     &TaxableBasisPolicy::default(),
///     1,
/// );
/// assert_eq!(result.line_item.gross_amount, Decimal::from_str("6000.00").unwrap());
/// ```
pub fn calculate_thirteenth_salary(
    monthly_salary: Decimal,
    whole_months: u32,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> ThirteenthSalaryResult {
    let category = LineItemCategory::ThirteenthSalary;
    let amount = round_currency(monthly_salary * Decimal::from(whole_months) / MONTHS_PER_YEAR);

    let audit_step = AuditStep {
        step_number,
        rule_id: "thirteenth_salary".to_string(),
        rule_name: "13th Salary (Prorated)".to_string(),
        legal_basis: category.legal_basis().to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "whole_months": whole_months
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "R${} / 12 x {} months = R${}",
            monthly_salary.normalize(),
            whole_months,
            amount
        ),
    };

    ThirteenthSalaryResult {
        line_item: SettlementLineItem::new(category, amount, policy.is_taxable(category)),
        audit_step,
    }
}
