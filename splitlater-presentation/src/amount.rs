use rust_decimal::{Decimal, RoundingStrategy};
use splitlater_domain::Money;

/// Rounds half away from zero to cents.
pub fn round_to_cents(amount: Money) -> Decimal {
    amount
        .as_decimal()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn format_amount(amount: Money) -> String {
    format!("{:.2}", round_to_cents(amount))
}
