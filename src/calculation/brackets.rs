//! Progressive bracket lookup.
//!
//! Applies a rate table with the shortcut formula `base * rate - deduction`,
//! which equals the band-by-band progressive sum when the deductions are
//! consistent with the thresholds.

use rust_decimal::Decimal;

use crate::config::RateTable;

/// Where a base landed in a rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketLookup {
    /// Zero-based index of the matching bracket.
    pub bracket_index: usize,
    /// The base after clamping to the table ceiling.
    pub clamped_base: Decimal,
    /// True when the base exceeded the table ceiling.
    pub clamped: bool,
    /// The rate of the matching bracket.
    pub rate: Decimal,
    /// The deduction of the matching bracket.
    pub deduction: Decimal,
    /// `clamped_base * rate - deduction`, floored at zero.
    pub amount: Decimal,
}

/// Finds the bracket for `base` and computes the withholding.
///
/// Returns `None` for a non-positive base.
pub fn lookup_bracket(base: Decimal, table: &RateTable) -> Option<BracketLookup> {
    if base <= Decimal::ZERO {
        return None;
    }

    let (clamped_base, clamped) = match table.ceiling() {
        Some(ceiling) if base > ceiling => (ceiling, true),
        _ => (base, false),
    };

    table
        .brackets()
        .iter()
        .enumerate()
        .find(|(_, bracket)| {
            bracket
                .upper_threshold
                .is_none_or(|threshold| clamped_base <= threshold)
        })
        .map(|(bracket_index, bracket)| BracketLookup {
            bracket_index,
            clamped_base,
            clamped,
            rate: bracket.rate,
            deduction: bracket.deduction,
            amount: (clamped_base * bracket.rate - bracket.deduction).max(Decimal::ZERO),
        })
}

/// Applies a progressive rate table to `base`.
///
/// 1. A non-positive base yields zero.
/// 2. A base above the final bracket's ceiling is clamped to it.
/// 3. The first bracket whose threshold covers the base gives
///    `base * rate - deduction`, floored at zero.
///
/// The result is not rounded.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::apply_brackets;
/// use settlement_engine::config::{RateBracket, RateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let table = RateTable::new("social_security", vec![
///     RateBracket::new(dec("1412.00"), dec("0.075"), dec("0")),
///     RateBracket::new(dec("2666.68"), dec("0.09"), dec("21.18")),
///     RateBracket::new(dec("4000.03"), dec("0.12"), dec("101.18")),
///     RateBracket::new(dec("7786.02"), dec("0.14"), dec("181.18")),
/// ]).unwrap();
///
/// assert_eq!(apply_brackets(dec("3600.00"), &table), dec("330.82"));
/// assert_eq!(apply_brackets(dec("0"), &table), Decimal::ZERO);
/// ```
pub fn apply_brackets(base: Decimal, table: &RateTable) -> Decimal {
    lookup_bracket(base, table)
        .map(|lookup| lookup.amount)
        .unwrap_or(Decimal::ZERO)
}
