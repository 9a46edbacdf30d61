//! Withholding calculation functionality.
//!
//! Social security (INSS) and income tax (IRRF) are withheld from the taxable
//! line items. The 13th salary is taxed exclusively: both withholdings are
//! computed on it with independent bracket lookups, never on a base shared
//! with the other taxable items.

use rust_decimal::Decimal;

use crate::config::{RateTable, RateTableSet, TaxableBasisPolicy};
use crate::models::{
    AuditStep, AuditWarning, LineItemCategory, SettlementLineItem, WithholdingBreakdown,
    round_currency,
};

use super::brackets::lookup_bracket;

/// The result of the withholding calculation.
#[derive(Debug, Clone)]
pub struct WithholdingResult {
    /// Bases and per-base withholdings.
    pub breakdown: WithholdingBreakdown,
    /// Total social-security withholding.
    pub social_security: Decimal,
    /// Total income-tax withholding.
    pub income_tax: Decimal,
    /// One audit step per bracket lookup.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings such as the social-security ceiling being applied.
    pub warnings: Vec<AuditWarning>,
}

/// Applies `table` to `base`, rounds to cents and records an audit step.
fn withhold(
    base: Decimal,
    table: &RateTable,
    rule_id: &str,
    rule_name: &str,
    legal_basis: &str,
    step_number: u32,
) -> (Decimal, AuditStep, bool) {
    let lookup = lookup_bracket(base, table);
    let amount = round_currency(lookup.map(|l| l.amount).unwrap_or(Decimal::ZERO));
    let clamped = lookup.is_some_and(|l| l.clamped);

    let (output, reasoning) = match lookup {
        Some(l) => (
            serde_json::json!({
                "bracket": l.bracket_index + 1,
                "clamped_base": l.clamped_base.to_string(),
                "rate": l.rate.normalize().to_string(),
                "deduction": l.deduction.to_string(),
                "amount": amount.to_string()
            }),
            format!(
                "R${} x {} - R${} = R${}{}",
                l.clamped_base,
                l.rate.normalize(),
                l.deduction,
                amount,
                if l.clamped { " (base clamped to ceiling)" } else { "" }
            ),
        ),
        None => (
            serde_json::json!({ "amount": amount.to_string() }),
            format!("Base R${} is not positive, nothing withheld", base),
        ),
    };

    let step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_basis: legal_basis.to_string(),
        input: serde_json::json!({ "base": base.to_string() }),
        output,
        reasoning,
    };

    (amount, step, clamped)
}

/// Calculates social-security and income-tax withholdings.
///
/// # Arguments
///
/// * `line_items` - The settlement line items, already tagged taxable or not
/// * `dependents_count` - Income-tax dependents
/// * `tables` - The rate tables effective on the termination date
/// * `policy` - Whether social security reduces the income-tax base
/// * `step_number` - The first step number for audit trail sequencing
///
/// # Algorithm
///
/// 1. Split the taxable items into the 13th salary and everything else.
/// 2. Social security on each base independently.
/// 3. Income-tax base = base - social security (per policy) - dependents
///    allowance, floored at zero; income tax on each base independently.
pub fn calculate_withholdings(
    line_items: &[SettlementLineItem],
    dependents_count: u32,
    tables: &RateTableSet,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> WithholdingResult {
    let (thirteenth_items, salary_items): (Vec<&SettlementLineItem>, Vec<&SettlementLineItem>) =
        line_items
            .iter()
            .filter(|item| item.is_taxable)
            .partition(|item| item.category == LineItemCategory::ThirteenthSalary);

    let salary_base: Decimal = salary_items.iter().map(|item| item.gross_amount).sum();
    let thirteenth_base: Decimal = thirteenth_items.iter().map(|item| item.gross_amount).sum();

    let (social_security_on_salary, ss_salary_step, ss_clamped) = withhold(
        salary_base,
        &tables.social_security,
        "social_security_salary",
        "Social Security (Salary Items)",
        "Lei 8.212/1991 art. 28",
        step_number,
    );
    let (social_security_on_thirteenth, ss_thirteenth_step, _) = withhold(
        thirteenth_base,
        &tables.social_security,
        "social_security_thirteenth",
        "Social Security (13th Salary)",
        "Lei 8.212/1991 art. 28, §7",
        step_number + 1,
    );

    let dependent_deduction =
        tables.income_tax_dependent_deduction * Decimal::from(dependents_count);

    let income_tax_base = |base: Decimal, social_security: Decimal| {
        let social_security = if policy.deduct_social_security_from_income_tax {
            social_security
        } else {
            Decimal::ZERO
        };
        (base - social_security - dependent_deduction).max(Decimal::ZERO)
    };

    let income_tax_base_on_salary = income_tax_base(salary_base, social_security_on_salary);
    let income_tax_base_on_thirteenth =
        income_tax_base(thirteenth_base, social_security_on_thirteenth);

    let (income_tax_on_salary, ir_salary_step, _) = withhold(
        income_tax_base_on_salary,
        &tables.income_tax,
        "income_tax_salary",
        "Income Tax (Salary Items)",
        "Lei 7.713/1988 art. 7",
        step_number + 2,
    );
    let (income_tax_on_thirteenth, ir_thirteenth_step, _) = withhold(
        income_tax_base_on_thirteenth,
        &tables.income_tax,
        "income_tax_thirteenth",
        "Income Tax (13th Salary)",
        "Lei 7.713/1988 art. 26",
        step_number + 3,
    );

    let mut warnings = Vec::new();
    if ss_clamped {
        warnings.push(AuditWarning::new(
            "SALARY_ABOVE_SOCIAL_SECURITY_CEILING",
            format!(
                "Salary base R${} exceeds the social-security ceiling; contribution capped",
                salary_base
            ),
            "low",
        ));
    }

    tracing::debug!(
        salary_base = %salary_base,
        thirteenth_base = %thirteenth_base,
        social_security = %(social_security_on_salary + social_security_on_thirteenth),
        income_tax = %(income_tax_on_salary + income_tax_on_thirteenth),
        "Computed withholdings"
    );

    WithholdingResult {
        breakdown: WithholdingBreakdown {
            salary_base,
            social_security_on_salary,
            income_tax_base_on_salary,
            income_tax_on_salary,
            thirteenth_base,
            social_security_on_thirteenth,
            income_tax_base_on_thirteenth,
            income_tax_on_thirteenth,
            dependent_deduction,
        },
        social_security: social_security_on_salary + social_security_on_thirteenth,
        income_tax: income_tax_on_salary + income_tax_on_thirteenth,
        audit_steps: vec![
            ss_salary_step,
            ss_thirteenth_step,
            ir_salary_step,
            ir_thirteenth_step,
        ],
        warnings,
    }
}
