//! Currency helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents, half away from zero.
///
/// # Example
///
/// ```
/// use settlement_engine::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("119.975").unwrap()), Decimal::from_str("119.98").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("66.6666").unwrap()), Decimal::from_str("66.67").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
