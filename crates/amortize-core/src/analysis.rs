//! End-to-end loan analysis: payment, yearly schedule, monthly PITI
//! breakdown and lifetime totals from a single `LoanParameters` value.
//!
//! Inputs are normalized rather than rejected. A negative amount, rate or
//! cost is read as zero and an implausibly large one is capped, both
//! reported in the envelope's warnings, so a half-typed form value still
//! produces a (degenerate) result.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::payment::compute_periodic_payment;
use crate::piti::{compute_monthly_breakdown, monthly_equivalent, MonthlyBreakdown};
use crate::schedule::{
    generate_period_schedule, generate_schedule, generate_schedule_with_count, MAX_TOTAL_PERIODS,
};
use crate::summary::{compare_extra_payment, summarize, LoanSummary};
use crate::types::{
    with_metadata, AmortizationRow, ComputationOutput, LoanParameters, Money, PaymentFrequency,
    PeriodRow, Rate,
};

/// Complete result of `analyze_loan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub periodic_payment: Money,
    pub periods_per_year: u32,
    pub rate_per_period: Rate,
    pub total_periods: u32,
    pub schedule: Vec<AmortizationRow>,
    pub monthly_breakdown: MonthlyBreakdown,
    pub summary: LoanSummary,
}

/// Level payment and the scalars it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub periodic_payment: Money,
    pub payment_frequency: PaymentFrequency,
    pub periods_per_year: u32,
    pub rate_per_period: Rate,
    pub total_periods: u32,
    /// Scheduled payment expressed per month (approximation for
    /// non-monthly frequencies).
    pub monthly_equivalent: Money,
}

/// Loan parameters after normalization, with the warnings it produced.
#[derive(Debug, Clone)]
pub struct NormalizedParameters {
    pub params: LoanParameters,
    pub warnings: Vec<String>,
}

/// Largest money amount accepted as input (one quadrillion).
pub const MAX_INPUT_AMOUNT: Money = dec!(1_000_000_000_000_000);

/// Largest annual percentage accepted for the interest and property tax rates.
pub const MAX_INPUT_RATE: Rate = dec!(1000);

fn record(msg: String, warnings: &mut Vec<String>) {
    warn!("{msg}");
    warnings.push(msg);
}

/// Clamp `value` into `[0, max]`, recording a warning when it moves.
fn within_range(value: Decimal, max: Decimal, field: &str, warnings: &mut Vec<String>) -> Decimal {
    if value < Decimal::ZERO {
        record(format!("{field} of {value} is negative; treated as 0"), warnings);
        Decimal::ZERO
    } else if value > max {
        record(format!("{field} of {value} exceeds {max}; capped"), warnings);
        max
    } else {
        value
    }
}

/// Clamp fields into their accepted ranges and flag terms longer than the
/// simulator will run.
pub fn normalize_parameters(params: &LoanParameters) -> NormalizedParameters {
    let mut warnings = Vec::new();
    let mut p = params.clone();
    let w = &mut warnings;

    p.loan_amount = within_range(p.loan_amount, MAX_INPUT_AMOUNT, "loan_amount", w);
    p.interest_rate = within_range(p.interest_rate, MAX_INPUT_RATE, "interest_rate", w);
    p.extra_payment_per_period = within_range(
        p.extra_payment_per_period,
        MAX_INPUT_AMOUNT,
        "extra_payment_per_period",
        w,
    );
    p.home_value = within_range(p.home_value, MAX_INPUT_AMOUNT, "home_value", w);
    p.property_tax_rate = within_range(p.property_tax_rate, MAX_INPUT_RATE, "property_tax_rate", w);
    p.yearly_insurance = within_range(p.yearly_insurance, MAX_INPUT_AMOUNT, "yearly_insurance", w);
    p.monthly_hoa = within_range(p.monthly_hoa, MAX_INPUT_AMOUNT, "monthly_hoa", w);

    if p.total_periods() > MAX_TOTAL_PERIODS {
        let msg = format!(
            "{} {} payments exceed the {} period limit; schedule truncated",
            p.total_periods(),
            p.payment_frequency,
            MAX_TOTAL_PERIODS
        );
        record(msg, &mut warnings);
    }

    NormalizedParameters {
        params: p,
        warnings,
    }
}

/// Fixed periodic payment for the loan.
pub fn periodic_payment(params: &LoanParameters) -> Money {
    compute_periodic_payment(
        params.loan_amount,
        params.rate_per_period(),
        params.total_periods(),
    )
}

/// Yearly schedule for the loan, extra payments included.
pub fn amortization_schedule(params: &LoanParameters) -> Vec<AmortizationRow> {
    generate_schedule(
        params.loan_amount,
        params.rate_per_period(),
        params.total_periods(),
        params.periods_per_year(),
        periodic_payment(params),
        params.extra_payment_per_period,
    )
}

/// Per-payment schedule for the loan, extra payments included.
pub fn period_schedule(params: &LoanParameters) -> Vec<PeriodRow> {
    generate_period_schedule(
        params.loan_amount,
        params.rate_per_period(),
        params.total_periods(),
        params.periods_per_year(),
        periodic_payment(params),
        params.extra_payment_per_period,
    )
}

/// Monthly-equivalent PITI breakdown for the loan.
pub fn monthly_breakdown(params: &LoanParameters) -> MonthlyBreakdown {
    compute_monthly_breakdown(
        periodic_payment(params),
        params.periods_per_year(),
        params.extra_payment_per_period,
        params.home_value,
        params.property_tax_rate,
        params.yearly_insurance,
        params.monthly_hoa,
    )
}

/// Quote the periodic payment inside the standard envelope.
pub fn quote_payment(input: &LoanParameters) -> ComputationOutput<PaymentQuote> {
    let start = Instant::now();
    let NormalizedParameters { params, warnings } = normalize_parameters(input);

    let payment = periodic_payment(&params);
    let quote = PaymentQuote {
        periodic_payment: payment,
        payment_frequency: params.payment_frequency,
        periods_per_year: params.periods_per_year(),
        rate_per_period: params.rate_per_period(),
        total_periods: params.total_periods(),
        monthly_equivalent: monthly_equivalent(payment, params.periods_per_year()),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata("Level annuity payment", input, warnings, elapsed, quote)
}

/// Yearly schedule for the normalized loan inside the standard envelope.
pub fn schedule_report(input: &LoanParameters) -> ComputationOutput<Vec<AmortizationRow>> {
    let start = Instant::now();
    let NormalizedParameters { params, warnings } = normalize_parameters(input);
    let rows = amortization_schedule(&params);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata("Fixed-rate annuity amortization, yearly roll-up", input, warnings, elapsed, rows)
}

/// Per-payment schedule for the normalized loan inside the standard envelope.
pub fn period_schedule_report(input: &LoanParameters) -> ComputationOutput<Vec<PeriodRow>> {
    let start = Instant::now();
    let NormalizedParameters { params, warnings } = normalize_parameters(input);
    let rows = period_schedule(&params);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata("Fixed-rate annuity amortization, per payment", input, warnings, elapsed, rows)
}

/// Monthly PITI breakdown for the normalized loan inside the standard envelope.
pub fn breakdown_report(input: &LoanParameters) -> ComputationOutput<MonthlyBreakdown> {
    let start = Instant::now();
    let NormalizedParameters { params, warnings } = normalize_parameters(input);
    let breakdown = monthly_breakdown(&params);
    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata("Monthly-equivalent PITI breakdown", input, warnings, elapsed, breakdown)
}

fn summary_with_extra(params: &LoanParameters, payment: Money, extra: Money) -> (Vec<AmortizationRow>, LoanSummary) {
    let rate = params.rate_per_period();
    let total = params.total_periods();
    let ppy = params.periods_per_year();

    let (rows, payments) =
        generate_schedule_with_count(params.loan_amount, rate, total, ppy, payment, extra);
    let summary = summarize(&rows, params.loan_amount, payment, payments);
    (rows, summary)
}

/// Run the full analysis for one set of loan parameters.
///
/// Never fails: degenerate terms produce a zero payment and an empty
/// schedule, and out-of-range inputs are reported as warnings.
pub fn analyze_loan(input: &LoanParameters) -> ComputationOutput<LoanAnalysis> {
    let start = Instant::now();

    let NormalizedParameters { params, warnings } = normalize_parameters(input);

    let payment = periodic_payment(&params);
    debug!(
        "{} loan of {} at {}% over {} years: payment {}",
        params.payment_frequency,
        params.loan_amount,
        params.interest_rate,
        params.loan_term_years,
        payment
    );

    let (schedule, mut summary) =
        summary_with_extra(&params, payment, params.extra_payment_per_period);

    if params.extra_payment_per_period > Decimal::ZERO {
        let (_, baseline) = summary_with_extra(&params, payment, Decimal::ZERO);
        summary.extra_payment_savings = Some(compare_extra_payment(&baseline, &summary));
    }

    let output = LoanAnalysis {
        periodic_payment: payment,
        periods_per_year: params.periods_per_year(),
        rate_per_period: params.rate_per_period(),
        total_periods: params.total_periods(),
        monthly_breakdown: monthly_breakdown(&params),
        schedule,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Fixed-rate annuity amortization with yearly roll-up and monthly PITI",
        input,
        warnings,
        elapsed,
        output,
    )
}
