//! Rounding and display helpers for currency amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Round to cents, halves away from zero.
pub fn round_money(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Plain two-decimal rendering (`1610.46`), as used in CSV cells.
pub fn format_plain(amount: Money) -> String {
    format!("{:.2}", round_money(amount))
}

/// Dollar rendering with thousands separators (`$1,610.46`).
pub fn format_money(amount: Money) -> String {
    let rounded = round_money(amount);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}
