//! Level periodic payment for a fixed-rate loan.

use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use crate::types::{Money, Rate};

/// Fixed payment that fully amortizes `loan_amount` over `total_periods`.
///
/// Uses the annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`, evaluated as
/// `P·r / (1 − (1+r)^−n)`. Degenerate terms (no principal, no periods) yield
/// zero and a zero rate yields straight-line principal. If `(1+r)^n` leaves
/// the decimal range the payment converges to the interest-only limit `P·r`.
/// A payment that itself falls outside the decimal range is reported as zero.
pub fn compute_periodic_payment(loan_amount: Money, rate_per_period: Rate, total_periods: u32) -> Money {
    if loan_amount <= Decimal::ZERO || total_periods == 0 {
        return Decimal::ZERO;
    }

    if rate_per_period.is_zero() {
        return loan_amount / Decimal::from(total_periods);
    }

    let growth = Decimal::ONE
        .checked_add(rate_per_period)
        .and_then(|base| base.checked_powu(u64::from(total_periods)));
    let growth = match growth {
        Some(g) => g,
        None => {
            debug!(
                "(1 + {rate_per_period})^{total_periods} overflows; using interest-only limit"
            );
            return out_of_range_as_zero(loan_amount.checked_mul(rate_per_period), loan_amount);
        }
    };

    let denom = Decimal::ONE - Decimal::ONE / growth;
    if denom <= Decimal::ZERO {
        // Rate too small to register at 28 digits of precision.
        return loan_amount / Decimal::from(total_periods);
    }

    out_of_range_as_zero(
        loan_amount
            .checked_mul(rate_per_period)
            .and_then(|interest| interest.checked_div(denom)),
        loan_amount,
    )
}

fn out_of_range_as_zero(payment: Option<Money>, loan_amount: Money) -> Money {
    payment.unwrap_or_else(|| {
        debug!("payment on {loan_amount} exceeds the decimal range; reporting zero");
        Decimal::ZERO
    })
}
