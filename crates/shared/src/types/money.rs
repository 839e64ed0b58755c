//! Currency amount helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places amounts are reported with.
pub const CURRENCY_DP: u32 = 2;

/// Rounds an amount to cents, half away from zero (`1.005` becomes `1.01`).
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums optional amounts, treating missing values as zero.
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    amounts.into_iter().flatten().sum()
}
