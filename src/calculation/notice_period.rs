//! Indemnified notice period calculation.
//!
//! Owed only on dismissal without cause: 30 days plus 3 days per whole year
//! of service, with the additional days capped at 60 (90 days in total).

use rust_decimal::Decimal;

use crate::config::TaxableBasisPolicy;
use crate::models::{
    AuditStep, AuditWarning, LineItemCategory, SettlementLineItem, TerminationReason,
    round_currency,
};

use super::salary_balance::COMMERCIAL_MONTH_DAYS;

/// Notice days owed regardless of tenure.
pub const BASE_NOTICE_DAYS: u32 = 30;

/// Additional notice days per whole year of service.
pub const NOTICE_DAYS_PER_YEAR: u32 = 3;

/// Ceiling on the additional notice days.
pub const MAX_ADDITIONAL_NOTICE_DAYS: u32 = 60;

/// Ceiling on the total notice days.
pub const MAX_NOTICE_DAYS: u32 = BASE_NOTICE_DAYS + MAX_ADDITIONAL_NOTICE_DAYS;

/// Returns the notice days owed for `whole_years` of service.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::notice_days_for_tenure;
///
/// assert_eq!(notice_days_for_tenure(0), 30);
/// assert_eq!(notice_days_for_tenure(2), 36);
/// assert_eq!(notice_days_for_tenure(25), 90);
/// ```
pub fn notice_days_for_tenure(whole_years: u32) -> u32 {
    BASE_NOTICE_DAYS
        + whole_years
            .saturating_mul(NOTICE_DAYS_PER_YEAR)
            .min(MAX_ADDITIONAL_NOTICE_DAYS)
}

/// The result of the notice period calculation.
#[derive(Debug, Clone)]
pub struct NoticePeriodResult {
    /// Notice days paid; zero unless dismissed without cause.
    pub notice_days: u32,
    /// The indemnified notice line item.
    pub line_item: SettlementLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when tenure would have exceeded the 90-day ceiling.
    pub warning: Option<AuditWarning>,
}

/// Calculates the indemnified notice period.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::calculate_notice_period;
/// use settlement_engine::config::TaxableBasisPolicy;
/// use settlement_engine::models::TerminationReason;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_notice_period(
///     Decimal::from_str("3000.00").unwrap(),
///     2,
///     TerminationReason::WithoutCause,
///     &TaxableBasisPolicy::default(),
///     1,
/// );
/// assert_eq!(result.notice_days, 36);
/// assert_eq!(result.line_item.gross_amount, Decimal::from_str("3600.00").unwrap());
/// ```
pub fn calculate_notice_period(
    monthly_salary: Decimal,
    whole_years: u32,
    reason: TerminationReason,
    policy: &TaxableBasisPolicy,
    step_number: u32,
) -> NoticePeriodResult {
    let category = LineItemCategory::IndemnifiedNotice;

    let (notice_days, reasoning) = if reason.is_without_cause() {
        let days = notice_days_for_tenure(whole_years);
        (
            days,
            format!(
                "Dismissed without cause: 30 + 3 x {} years = {} days (capped at {})",
                whole_years, days, MAX_NOTICE_DAYS
            ),
        )
    } else {
        (
            0,
            format!("Termination reason '{}' owes no indemnified notice", reason.as_str()),
        )
    };

    let amount =
        round_currency(monthly_salary * Decimal::from(notice_days) / COMMERCIAL_MONTH_DAYS);

    let uncapped_additional = whole_years.saturating_mul(NOTICE_DAYS_PER_YEAR);
    let warning = (reason.is_without_cause() && uncapped_additional > MAX_ADDITIONAL_NOTICE_DAYS)
        .then(|| {
            AuditWarning::new(
                "NOTICE_DAYS_CAPPED",
                format!(
                    "{} years of service would add {} days; notice capped at {} days",
                    whole_years, uncapped_additional, MAX_NOTICE_DAYS
                ),
                "low",
            )
        });

    let audit_step = AuditStep {
        step_number,
        rule_id: "indemnified_notice".to_string(),
        rule_name: "Indemnified Notice Period".to_string(),
        legal_basis: category.legal_basis().to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.to_string(),
            "whole_years": whole_years,
            "termination_reason": reason.as_str()
        }),
        output: serde_json::json!({
            "notice_days": notice_days,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    NoticePeriodResult {
        notice_days,
        line_item: SettlementLineItem::new(category, amount, policy.is_taxable(category)),
        audit_step,
        warning,
    }
}
