//! Period-by-period amortization with early payoff and yearly roll-up.
//!
//! Interest accrues on the balance at the start of each period. Every period
//! applies the level payment plus any extra principal; the payment that would
//! overshoot the balance is cut down to exactly retire the loan. Periods are
//! bucketed into years by `ceil(period / periods_per_year)` and the buckets
//! live in an array preallocated for the full term, indexed by `year - 1`.

use log::{debug, trace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{AmortizationRow, Money, PeriodRow, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Balance at or below which the loan is considered fully paid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Hard ceiling on simulated periods: 100 years of weekly payments.
pub const MAX_TOTAL_PERIODS: u32 = 5_200;

// ---------------------------------------------------------------------------
// Period step
// ---------------------------------------------------------------------------

/// Outcome of applying one payment to the running balance.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PeriodStep {
    principal: Money,
    interest: Money,
    balance: Money,
}

/// Apply one payment. `None` when the period's interest falls outside the
/// Decimal range; the caller ends the schedule there.
fn amortize_period(
    balance: Money,
    rate_per_period: Rate,
    periodic_payment: Money,
    extra_per_period: Money,
) -> Option<PeriodStep> {
    let interest = if rate_per_period.is_zero() {
        Decimal::ZERO
    } else {
        balance.checked_mul(rate_per_period)?
    };

    // Saturates at the decimal range; clamped to the balance below.
    let mut principal = periodic_payment
        .saturating_sub(interest)
        .saturating_add(extra_per_period);
    if principal > balance {
        principal = balance;
    }
    if principal < Decimal::ZERO {
        principal = Decimal::ZERO;
    }

    let mut remaining = balance - principal;
    if remaining < Decimal::ZERO {
        remaining = Decimal::ZERO;
    }

    Some(PeriodStep {
        principal,
        interest,
        balance: remaining,
    })
}

/// Number of periods actually simulated for a requested term.
pub fn effective_periods(total_periods: u32) -> u32 {
    total_periods.min(MAX_TOTAL_PERIODS)
}

/// Drive the simulation, handing each completed period to `on_period`.
/// Returns the number of periods simulated.
fn simulate<F>(
    loan_amount: Money,
    rate_per_period: Rate,
    total_periods: u32,
    periodic_payment: Money,
    extra_per_period: Money,
    mut on_period: F,
) -> u32
where
    F: FnMut(u32, &PeriodStep),
{
    let periods = effective_periods(total_periods);
    let mut balance = loan_amount;
    let mut simulated = 0;
    // Running principal + interest; every total derived from the rows is
    // bounded by it, so it staying in range keeps the roll-ups in range.
    let mut applied = Decimal::ZERO;

    for period in 1..=periods {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let Some(step) =
            amortize_period(balance, rate_per_period, periodic_payment, extra_per_period)
        else {
            debug!("period {period}: interest on {balance} exceeds the decimal range, schedule stops");
            break;
        };
        let Some(total) = applied
            .checked_add(step.principal)
            .and_then(|sum| sum.checked_add(step.interest))
        else {
            debug!("period {period}: cumulative payments exceed the decimal range, schedule stops");
            break;
        };
        applied = total;

        trace!(
            "period {period}: interest={} principal={} balance={}",
            step.interest,
            step.principal,
            step.balance
        );
        balance = step.balance;
        simulated = period;
        on_period(period, &step);

        if balance <= BALANCE_EPSILON {
            if period < periods {
                debug!("loan paid off at period {period} of {periods}");
            }
            break;
        }
    }

    simulated
}

fn is_degenerate(loan_amount: Money, total_periods: u32, periods_per_year: u32) -> bool {
    loan_amount <= Decimal::ZERO || total_periods == 0 || periods_per_year == 0
}

fn bucket_year(period: u32, periods_per_year: u32) -> u32 {
    period.div_ceil(periods_per_year)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct YearBucket {
    principal: Money,
    interest: Money,
    remaining: Money,
}

/// Yearly amortization rows for a loan.
///
/// Returns an empty vector for a non-positive amount, zero periods or zero
/// periods per year. The schedule stops early once the balance falls to
/// `BALANCE_EPSILON`, so it can hold fewer rows than the nominal term.
pub fn generate_schedule(
    loan_amount: Money,
    rate_per_period: Rate,
    total_periods: u32,
    periods_per_year: u32,
    periodic_payment: Money,
    extra_per_period: Money,
) -> Vec<AmortizationRow> {
    generate_schedule_with_count(
        loan_amount,
        rate_per_period,
        total_periods,
        periods_per_year,
        periodic_payment,
        extra_per_period,
    )
    .0
}

/// Yearly rows plus the number of payments made before the loan was retired
/// or the term ran out, from a single simulation.
pub fn generate_schedule_with_count(
    loan_amount: Money,
    rate_per_period: Rate,
    total_periods: u32,
    periods_per_year: u32,
    periodic_payment: Money,
    extra_per_period: Money,
) -> (Vec<AmortizationRow>, u32) {
    if is_degenerate(loan_amount, total_periods, periods_per_year) {
        return (Vec::new(), 0);
    }

    let year_slots = effective_periods(total_periods).div_ceil(periods_per_year);
    let mut buckets = vec![YearBucket::default(); year_slots as usize];
    let mut years_used: usize = 0;

    let payments = simulate(
        loan_amount,
        rate_per_period,
        total_periods,
        periodic_payment,
        extra_per_period,
        |period, step| {
            let idx = (bucket_year(period, periods_per_year) - 1) as usize;
            let bucket = &mut buckets[idx];
            bucket.principal += step.principal;
            bucket.interest += step.interest;
            bucket.remaining = step.balance;
            years_used = years_used.max(idx + 1);
        },
    );

    let mut cumulative_principal = Decimal::ZERO;
    let mut cumulative_interest = Decimal::ZERO;

    let rows = buckets
        .into_iter()
        .take(years_used)
        .enumerate()
        .map(|(idx, bucket)| {
            cumulative_principal += bucket.principal;
            cumulative_interest += bucket.interest;
            AmortizationRow {
                year: idx as u32 + 1,
                principal: bucket.principal,
                interest: bucket.interest,
                remaining: bucket.remaining,
                cumulative_principal,
                cumulative_interest,
            }
        })
        .collect();

    (rows, payments)
}

/// Per-payment amortization rows, using the same step as `generate_schedule`.
pub fn generate_period_schedule(
    loan_amount: Money,
    rate_per_period: Rate,
    total_periods: u32,
    periods_per_year: u32,
    periodic_payment: Money,
    extra_per_period: Money,
) -> Vec<PeriodRow> {
    if is_degenerate(loan_amount, total_periods, periods_per_year) {
        return Vec::new();
    }

    let mut rows = Vec::with_capacity(effective_periods(total_periods) as usize);
    simulate(
        loan_amount,
        rate_per_period,
        total_periods,
        periodic_payment,
        extra_per_period,
        |period, step| {
            rows.push(PeriodRow {
                period,
                year: bucket_year(period, periods_per_year),
                payment: step.principal + step.interest,
                principal: step.principal,
                interest: step.interest,
                remaining: step.balance,
            });
        },
    );
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::compute_periodic_payment;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn thirty_year(extra: Money) -> Vec<AmortizationRow> {
        let rate = dec!(0.05) / dec!(12);
        let pmt = compute_periodic_payment(dec!(300_000), rate, 360);
        generate_schedule(dec!(300_000), rate, 360, 12, pmt, extra)
    }

    #[test]
    fn test_thirty_year_schedule_shape() {
        let rows = thirty_year(Decimal::ZERO);
        assert_eq!(rows.len(), 30);

        let first = &rows[0];
        assert_eq!(first.year, 1);
        assert_close(first.interest, dec!(14899.48), dec!(0.05), "year 1 interest");
        assert_close(first.principal, dec!(4426.10), dec!(0.05), "year 1 principal");
        assert_close(first.remaining, dec!(295573.90), dec!(0.05), "year 1 remaining");

        let last = rows.last().unwrap();
        assert_close(last.remaining, Decimal::ZERO, TOL, "final remaining");
        assert_close(last.cumulative_principal, dec!(300_000), TOL, "cumulative principal");
        assert_close(last.cumulative_interest, dec!(279767.35), dec!(0.05), "total interest");
    }

    #[test]
    fn test_extra_payment_pays_off_early() {
        let base = thirty_year(Decimal::ZERO);
        let extra = thirty_year(dec!(500));

        assert_eq!(extra.len(), 18);
        assert!(extra.len() < base.len());

        let base_interest = base.last().unwrap().cumulative_interest;
        let extra_interest = extra.last().unwrap().cumulative_interest;
        assert!(extra_interest < base_interest);
        assert_close(extra_interest, dec!(155384.34), dec!(0.05), "interest with extra");

        let last = extra.last().unwrap();
        assert_eq!(last.remaining, Decimal::ZERO);
        assert_close(last.cumulative_principal, dec!(300_000), TOL, "principal with extra");
    }

    #[test]
    fn test_years_are_contiguous_from_one() {
        let rows = thirty_year(dec!(250));
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.year, i as u32 + 1);
        }
    }

    #[test]
    fn test_monotonic_invariants() {
        let rows = thirty_year(dec!(100));
        for pair in rows.windows(2) {
            assert!(pair[1].cumulative_principal >= pair[0].cumulative_principal);
            assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
            assert!(pair[1].remaining <= pair[0].remaining);
        }
        for row in &rows {
            assert!(row.remaining >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_zero_rate_schedule_is_straight_line() {
        let pmt = compute_periodic_payment(dec!(12_000), Decimal::ZERO, 24);
        let rows = generate_schedule(dec!(12_000), Decimal::ZERO, 24, 12, pmt, Decimal::ZERO);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.interest, Decimal::ZERO);
            assert_eq!(row.principal, dec!(6000));
        }
        assert_eq!(rows[1].remaining, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_schedule() {
        let rate = dec!(0.004);
        assert!(generate_schedule(Decimal::ZERO, rate, 360, 12, dec!(100), Decimal::ZERO).is_empty());
        assert!(generate_schedule(dec!(-1), rate, 360, 12, dec!(100), Decimal::ZERO).is_empty());
        assert!(generate_schedule(dec!(1000), rate, 0, 12, dec!(100), Decimal::ZERO).is_empty());
        assert!(generate_schedule(dec!(1000), rate, 12, 0, dec!(100), Decimal::ZERO).is_empty());
        assert!(generate_period_schedule(Decimal::ZERO, rate, 360, 12, dec!(100), Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_final_payment_is_clamped_to_balance() {
        // Payment far larger than the loan: one period retires it.
        let rows = generate_period_schedule(dec!(1000), dec!(0.01), 12, 12, dec!(5000), Decimal::ZERO);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal, dec!(1000));
        assert_eq!(rows[0].interest, dec!(10));
        assert_eq!(rows[0].payment, dec!(1010));
        assert_eq!(rows[0].remaining, Decimal::ZERO);
    }

    #[test]
    fn test_overpay_within_interest_is_clamped_to_balance() {
        // Principal share 1005 sits between the balance (1000) and
        // balance + interest (1010); it is still cut to the balance.
        let rows = generate_period_schedule(dec!(1000), dec!(0.01), 12, 12, dec!(1015), Decimal::ZERO);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal, dec!(1000));
        assert_eq!(rows[0].interest, dec!(10));
        assert_eq!(rows[0].payment, dec!(1010));
        assert_eq!(rows[0].remaining, Decimal::ZERO);

        // Same window reached through the extra payment.
        let yearly = generate_schedule(dec!(1000), dec!(0.01), 12, 12, dec!(20), dec!(995));
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].cumulative_principal, dec!(1000));
        assert_eq!(yearly[0].remaining, Decimal::ZERO);
    }

    #[test]
    fn test_insufficient_payment_never_grows_balance() {
        // Payment below the period's interest: principal floors at zero.
        let rows = generate_period_schedule(dec!(10_000), dec!(0.01), 6, 12, dec!(50), Decimal::ZERO);
        assert_eq!(rows.len(), 6);
        for row in &rows {
            assert_eq!(row.principal, Decimal::ZERO);
            assert_eq!(row.remaining, dec!(10_000));
        }
    }

    #[test]
    fn test_period_rows_roll_up_to_yearly_rows() {
        let rate = dec!(0.065) / dec!(26);
        let pmt = compute_periodic_payment(dec!(180_000), rate, 520);
        let yearly = generate_schedule(dec!(180_000), rate, 520, 26, pmt, dec!(40));
        let periods = generate_period_schedule(dec!(180_000), rate, 520, 26, pmt, dec!(40));

        for row in &yearly {
            let in_year: Vec<&PeriodRow> = periods.iter().filter(|p| p.year == row.year).collect();
            let principal: Decimal = in_year.iter().map(|p| p.principal).sum();
            let interest: Decimal = in_year.iter().map(|p| p.interest).sum();
            assert_eq!(principal, row.principal);
            assert_eq!(interest, row.interest);
            assert_eq!(in_year.last().unwrap().remaining, row.remaining);
        }
        assert_eq!(periods.last().unwrap().year, yearly.last().unwrap().year);
    }

    #[test]
    fn test_weekly_buckets_hold_fifty_two_periods() {
        let rate = dec!(0.04) / dec!(52);
        let pmt = compute_periodic_payment(dec!(50_000), rate, 520);
        let periods = generate_period_schedule(dec!(50_000), rate, 520, 52, pmt, Decimal::ZERO);
        assert_eq!(periods[51].year, 1);
        assert_eq!(periods[52].year, 2);
        assert_eq!(periods.last().unwrap().year, 10);
    }

    #[test]
    fn test_schedule_with_count_matches_payments_made() {
        let rate = dec!(0.05) / dec!(12);
        let pmt = compute_periodic_payment(dec!(300_000), rate, 360);

        let (rows, payments) =
            generate_schedule_with_count(dec!(300_000), rate, 360, 12, pmt, Decimal::ZERO);
        assert_eq!(payments, 360);
        assert_eq!(rows.len(), 30);

        let (rows, payments) =
            generate_schedule_with_count(dec!(300_000), rate, 360, 12, pmt, dec!(500));
        assert_eq!(payments, 216);
        assert_eq!(rows, generate_schedule(dec!(300_000), rate, 360, 12, pmt, dec!(500)));
        let periods = generate_period_schedule(dec!(300_000), rate, 360, 12, pmt, dec!(500));
        assert_eq!(periods.len(), payments as usize);

        let (rows, payments) =
            generate_schedule_with_count(Decimal::ZERO, rate, 360, 12, pmt, Decimal::ZERO);
        assert!(rows.is_empty());
        assert_eq!(payments, 0);
    }

    #[test]
    fn test_iteration_ceiling() {
        assert_eq!(effective_periods(360), 360);
        assert_eq!(effective_periods(u32::MAX), MAX_TOTAL_PERIODS);

        // Zero-rate loan with an absurd term: only MAX_TOTAL_PERIODS are simulated.
        let periods = generate_period_schedule(
            dec!(1_000_000),
            Decimal::ZERO,
            u32::MAX,
            52,
            dec!(1),
            Decimal::ZERO,
        );
        assert_eq!(periods.len(), MAX_TOTAL_PERIODS as usize);
    }

    #[test]
    fn test_maximal_extra_payment_retires_loan_in_one_period() {
        let rate = dec!(0.05) / dec!(52);
        let pmt = compute_periodic_payment(dec!(300_000), rate, 1560);
        let (rows, payments) =
            generate_schedule_with_count(dec!(300_000), rate, 1560, 52, pmt, Decimal::MAX);
        assert_eq!(payments, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].principal, dec!(300_000));
        assert_eq!(rows[0].remaining, Decimal::ZERO);
    }

    #[test]
    fn test_interest_beyond_decimal_range_ends_schedule() {
        // The very first period's interest overflows: nothing is simulated.
        let huge = dec!(10_000_000_000_000_000_000_000_000);
        let (rows, payments) =
            generate_schedule_with_count(huge, huge, 1560, 52, Decimal::ZERO, Decimal::ZERO);
        assert!(rows.is_empty());
        assert_eq!(payments, 0);
        assert!(generate_period_schedule(huge, huge, 1560, 52, Decimal::ZERO, Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_accumulated_interest_beyond_decimal_range_ends_schedule() {
        // Interest-only payments whose running total outgrows Decimal::MAX
        // after a handful of periods; the schedule stops short, in range.
        let loan = dec!(10_000_000_000_000_000_000_000_000);
        let rate = dec!(2);
        let pmt = dec!(20_000_000_000_000_000_000_000_000);
        let periods = generate_period_schedule(loan, rate, 360, 12, pmt, Decimal::ZERO);
        assert!(!periods.is_empty());
        assert!(periods.len() < 360);
        for row in &periods {
            assert_eq!(row.principal, Decimal::ZERO);
            assert_eq!(row.remaining, loan);
        }
        let yearly = generate_schedule(loan, rate, 360, 12, pmt, Decimal::ZERO);
        let total: Decimal = periods.iter().map(|p| p.interest).sum();
        assert_eq!(yearly.last().unwrap().cumulative_interest, total);
    }
}
