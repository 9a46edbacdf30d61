//! CSV export of a settlement.
//!
//! A flat `label,gross_amount` table: one row per line item followed by the
//! withholdings and the totals.

use csv::Writer;

use crate::error::{EngineError, EngineResult};
use crate::models::SettlementResult;

/// Header row of the exported table.
pub const CSV_HEADER: [&str; 2] = ["label", "gross_amount"];

/// Label of the social-security withholding row.
pub const SOCIAL_SECURITY_LABEL: &str = "Social security withholding";
/// Label of the income-tax withholding row.
pub const INCOME_TAX_LABEL: &str = "Income tax withholding";
/// Label of the gross total row.
pub const GROSS_TOTAL_LABEL: &str = "Gross total";
/// Label of the net total row.
pub const NET_TOTAL_LABEL: &str = "Net total";

fn export_error(err: impl std::fmt::Display) -> EngineError {
    EngineError::CalculationError {
        message: format!("CSV export failed: {}", err),
    }
}

/// Renders a settlement as CSV.
pub fn settlement_to_csv(result: &SettlementResult) -> EngineResult<String> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(CSV_HEADER).map_err(export_error)?;

    for item in &result.line_items {
        let amount = item.gross_amount.to_string();
        wtr.write_record([item.label.as_str(), amount.as_str()])
            .map_err(export_error)?;
    }

    let summary = [
        (SOCIAL_SECURITY_LABEL, result.social_security_withholding),
        (INCOME_TAX_LABEL, result.income_tax_withholding),
        (GROSS_TOTAL_LABEL, result.gross_total),
        (NET_TOTAL_LABEL, result.net_total),
    ];
    for (label, amount) in summary {
        let amount = amount.to_string();
        wtr.write_record([label, amount.as_str()])
            .map_err(export_error)?;
    }

    let bytes = wtr.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}
