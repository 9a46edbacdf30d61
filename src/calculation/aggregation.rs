//! Settlement aggregation.

use rust_decimal::Decimal;

use crate::models::{
    AuditTrace, ProrationSummary, SettlementLineItem, SettlementResult, SettlementStatus,
    WithholdingBreakdown,
};

/// Totals the line items and subtracts the withholdings.
///
/// Line items keep their computation order. The returned result carries an
/// empty proration summary, breakdown and audit trace for the caller to fill.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::aggregate;
/// use settlement_engine::models::{LineItemCategory, SettlementLineItem};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     SettlementLineItem::new(LineItemCategory::SalaryBalance, Decimal::new(100000, 2), true),
///     SettlementLineItem::new(LineItemCategory::ThirteenthSalary, Decimal::new(50000, 2), true),
/// ];
/// let result = aggregate(items, Decimal::new(11250, 2), Decimal::ZERO);
/// assert_eq!(result.gross_total, Decimal::new(150000, 2));
/// assert_eq!(result.net_total, Decimal::new(138750, 2));
/// ```
pub fn aggregate(
    line_items: Vec<SettlementLineItem>,
    social_security_withholding: Decimal,
    income_tax_withholding: Decimal,
) -> SettlementResult {
    let gross_total: Decimal = line_items.iter().map(|item| item.gross_amount).sum();
    let net_total = gross_total - social_security_withholding - income_tax_withholding;

    SettlementResult {
        status: SettlementStatus::Computed,
        proration: ProrationSummary::default(),
        line_items,
        withholding: WithholdingBreakdown::default(),
        social_security_withholding,
        income_tax_withholding,
        gross_total,
        net_total,
        audit_trace: AuditTrace::default(),
    }
}
