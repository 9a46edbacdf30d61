//! Severance fund (FGTS) calculation functionality.
//!
//! Produces the informational 8% monthly deposit total over the service
//! period and the 40% penalty on the fund balance owed on dismissal without
//! cause.

use rust_decimal::Decimal;

use crate::config::TaxableBasisPolicy;
use crate::models::{
    AuditStep, LineItemCategory, SettlementLineItem, TerminationReason, round_currency,
};

/// Monthly employer deposit rate (8%).
pub const SEVERANCE_FUND_DEPOSIT_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Penalty rate on the fund balance for dismissal without cause (40%).
pub const SEVERANCE_FUND_PENALTY_RATE: Decimal = Decimal::from_parts(40, 0, 0, false, 2);

/// The result of the severance fund calculation.
#[derive(Debug, Clone)]
pub struct SeveranceFundResult {
    /// Deposit line item.
    pub deposit: SettlementLineItem,
    /// Penalty line item.
    pub penalty: SettlementLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the severance fund deposit and penalty.
///
/// - Deposit: `monthly_salary * 0.08 * whole_months`
/// - Penalty: `severance_fund_balance * 0.40`, only without cause
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_severance_fund;
/// use settlement_engine::config::TaxableBasisPolicy;
/// use settlement_engine::models::TerminationReason;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_severance_fund(
///     Decimal::from_str("3000.00").unwrap(),
///     24,
///     Decimal::from_str("5760.00").unwrap(),
///     TerminationReason::WithoutCause,
///     &TaxableBasisPolicy::default(),
///     1,
/// );
/// assert_eq!(result.deposit.gross_amount, Decimal::from_str("5760.00").unwrap());
/// assert_eq!(result.penalty.gross_amount, Decimal::from_str("2304.00").unwrap());
/// ```
pub fn calculate_severance_fund(
    monthly_salary: Decimal,
    whole_months: u32,
    fund_balance: Decimal,
    reason: TerminationReason,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> SeveranceFundResult {
    let deposit_amount = round_currency(
        monthly_salary * SEVERANCE_FUND_DEPOSIT_RATE * Decimal::from(whole_months),
    );

    let penalty_amount = if reason.is_without_cause() {
        round_currency(fund_balance * SEVERANCE_FUND_PENALTY_RATE)
    } else {
        Decimal::ZERO
    };

    let reasoning = if reason.is_without_cause() {
        format!(
            "Deposits R${} x 8% x {} months = R${}; penalty 40% of balance R${} = R${}",
            monthly_salary.normalize(),
            whole_months,
            deposit_amount,
            fund_balance.normalize(),
            penalty_amount
        )
    } else {
        format!(
            "Deposits R${} x 8% x {} months = R${}; no penalty for '{}'",
            monthly_salary.normalize(),
            whole_months,
            deposit_amount,
            reason.as_str()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "severance_fund".to_string(),
        rule_name: "Severance Fund".to_string(),
        legal_basis: "Lei 8.036/1990 arts. 15 and 18".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "whole_months": whole_months,
            "severance_fund_balance": fund_balance.to_string(),
            "termination_reason": reason.as_str()
        }),
        output: serde_json::json!({
            "deposit": deposit_amount.to_string(),
            "penalty": penalty_amount.to_string()
        }),
        reasoning,
    };

    let deposit_category = LineItemCategory::SeveranceFundDeposit;
    let penalty_category = LineItemCategory::SeveranceFundPenalty;

    SeveranceFundResult {
        deposit: SettlementLineItem::new(
            deposit_category,
            deposit_amount,
            policy.is_taxable(deposit_category),
        ),
        penalty: SettlementLineItem::new(
            penalty_category,
            penalty_amount,
            policy.is_taxable(penalty_category),
        ),
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rates() {
        assert_eq!(SEVERANCE_FUND_DEPOSIT_RATE, dec("0.08"));
        assert_eq!(SEVERANCE_FUND_PENALTY_RATE, dec("0.40"));
    }

    #[test]
    fn test_with_cause_has_no_penalty() {
        let result = calculate_severance_fund(
            dec("3000.00"),
            24,
            dec("10000.00"),
            TerminationReason::WithCause,
            &TaxableBasisPolicy::default(),
            1,
        );
        assert_eq!(result.deposit.gross_amount, dec("5760.00"));
        assert_eq!(result.penalty.gross_amount, Decimal::ZERO);
        assert!(result.audit_step.reasoning.contains("no penalty"));
    }

    #[test]
    fn test_resignation_has_no_penalty() {
        let result = calculate_severance_fund(
            dec("3000.00"),
            24,
            dec("10000.00"),
            TerminationReason::Resignation,
            &TaxableBasisPolicy::default(),
            1,
        );
        assert_eq!(result.penalty.gross_amount, Decimal::ZERO);
    }

    #[test]
    fn test_penalty_uses_balance_not_deposits() {
        let result = calculate_severance_fund(
            dec("3000.00"),
            1,
            dec("12345.67"),
            TerminationReason::WithoutCause,
            &TaxableBasisPolicy::legacy_inclusive(),
            1,
        );
        assert_eq!(result.deposit.gross_amount, dec("240.00"));
        // 12345.67 * 0.4 = 4938.268
        assert_eq!(result.penalty.gross_amount, dec("4938.27"));
    }

    #[test]
    fn test_never_taxable() {
        let result = calculate_severance_fund(
            dec("3000.00"),
            12,
            dec("2880.00"),
            TerminationReason::WithoutCause,
            &TaxableBasisPolicy::legacy_inclusive(),
            1,
        );
        assert!(!result.deposit.is_taxable);
        assert!(!result.penalty.is_taxable);
    }
}
