//! Lifetime totals of an amortization schedule and the payoff comparison
//! against the same loan without extra principal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AmortizationRow, Money};

/// Lifetime totals for a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub periodic_payment: Money,
    pub total_principal: Money,
    pub total_interest: Money,
    /// Principal plus interest over the life of the loan.
    pub total_payment: Money,
    /// Payments made before the balance reached zero.
    pub number_of_payments: u32,
    /// Yearly rows in the schedule.
    pub payoff_years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_payment_savings: Option<ExtraPaymentSavings>,
}

/// What extra principal saves relative to the scheduled payment alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentSavings {
    pub baseline_total_interest: Money,
    pub interest_saved: Money,
    pub baseline_number_of_payments: u32,
    pub payments_saved: u32,
    pub baseline_payoff_years: u32,
    pub years_saved: u32,
}

/// Totals derived from the final schedule row.
///
/// An empty schedule reports the original `loan_amount` as principal owed
/// with no interest, which covers zero-term and zero-amount loans.
pub fn summarize(
    rows: &[AmortizationRow],
    loan_amount: Money,
    periodic_payment: Money,
    number_of_payments: u32,
) -> LoanSummary {
    let (total_principal, total_interest) = match rows.last() {
        Some(last) => (last.cumulative_principal, last.cumulative_interest),
        None => (loan_amount, Decimal::ZERO),
    };

    LoanSummary {
        periodic_payment,
        total_principal,
        total_interest,
        total_payment: total_principal + total_interest,
        number_of_payments,
        payoff_years: rows.len() as u32,
        extra_payment_savings: None,
    }
}

/// Compare a summary that includes extra payments with its baseline.
pub fn compare_extra_payment(baseline: &LoanSummary, with_extra: &LoanSummary) -> ExtraPaymentSavings {
    ExtraPaymentSavings {
        baseline_total_interest: baseline.total_interest,
        interest_saved: baseline.total_interest - with_extra.total_interest,
        baseline_number_of_payments: baseline.number_of_payments,
        payments_saved: baseline
            .number_of_payments
            .saturating_sub(with_extra.number_of_payments),
        baseline_payoff_years: baseline.payoff_years,
        years_saved: baseline.payoff_years.saturating_sub(with_extra.payoff_years),
    }
}
