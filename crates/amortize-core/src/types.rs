use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AmortizeError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%) unless a field says "percent".
pub type Rate = Decimal;

/// How often an installment is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Biweekly,
    Weekly,
    Semimonthly,
}

impl PaymentFrequency {
    /// Fixed number of payment periods in a year.
    ///
    /// Semimonthly is always 24; calendar-aware scheduling is not modelled.
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Semimonthly => 24,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Biweekly => "biweekly",
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Semimonthly => "semimonthly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentFrequency {
    type Err = AmortizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "biweekly" => Ok(PaymentFrequency::Biweekly),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "semimonthly" => Ok(PaymentFrequency::Semimonthly),
            _ => Err(AmortizeError::InvalidInput {
                field: "payment_frequency".into(),
                reason: format!(
                    "'{s}' is not one of monthly, biweekly, weekly, semimonthly"
                ),
            }),
        }
    }
}

/// Terms of a fixed-rate installment loan plus the ancillary housing costs
/// that make up a PITI estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub loan_amount: Money,
    /// Annual interest rate as a percentage (e.g., 5 for 5%).
    pub interest_rate: Decimal,
    /// Loan term in whole years.
    pub loan_term_years: u32,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    /// Voluntary principal paid on top of every scheduled payment.
    #[serde(default)]
    pub extra_payment_per_period: Money,
    #[serde(default)]
    pub home_value: Money,
    /// Annual property tax as a percentage of home value.
    #[serde(default)]
    pub property_tax_rate: Decimal,
    #[serde(default)]
    pub yearly_insurance: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
}

impl LoanParameters {
    pub fn periods_per_year(&self) -> u32 {
        self.payment_frequency.periods_per_year()
    }

    /// Periodic rate as a decimal: annual percent / 100 / periods per year.
    pub fn rate_per_period(&self) -> Rate {
        self.interest_rate / dec!(100) / Decimal::from(self.periods_per_year())
    }

    pub fn total_periods(&self) -> u32 {
        self.loan_term_years.saturating_mul(self.periods_per_year())
    }
}

/// One year bucket of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based year index, not a calendar year.
    pub year: u32,
    /// Principal repaid during the year, extra payments included.
    pub principal: Money,
    /// Interest paid during the year.
    pub interest: Money,
    /// Outstanding balance after the year's last payment.
    pub remaining: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

/// A single simulated payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    /// 1-based payment number.
    pub period: u32,
    /// Year bucket the payment falls into.
    pub year: u32,
    /// Total applied this period (principal + interest).
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining: Money,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(frequency: PaymentFrequency) -> LoanParameters {
        LoanParameters {
            loan_amount: dec!(300_000),
            interest_rate: dec!(5),
            loan_term_years: 30,
            payment_frequency: frequency,
            extra_payment_per_period: Decimal::ZERO,
            home_value: Decimal::ZERO,
            property_tax_rate: Decimal::ZERO,
            yearly_insurance: Decimal::ZERO,
            monthly_hoa: Decimal::ZERO,
        }
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PaymentFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PaymentFrequency::Biweekly.periods_per_year(), 26);
        assert_eq!(PaymentFrequency::Weekly.periods_per_year(), 52);
        assert_eq!(PaymentFrequency::Semimonthly.periods_per_year(), 24);
    }

    #[test]
    fn test_derived_scalars_monthly() {
        let p = params(PaymentFrequency::Monthly);
        assert_eq!(p.total_periods(), 360);
        assert_eq!(p.rate_per_period(), dec!(5) / dec!(100) / dec!(12));
    }

    #[test]
    fn test_derived_scalars_biweekly() {
        let p = params(PaymentFrequency::Biweekly);
        assert_eq!(p.total_periods(), 780);
        assert_eq!(p.rate_per_period(), dec!(0.05) / dec!(26));
    }

    #[test]
    fn test_total_periods_saturates() {
        let mut p = params(PaymentFrequency::Weekly);
        p.loan_term_years = u32::MAX;
        assert_eq!(p.total_periods(), u32::MAX);
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!(
            "Semi-Monthly".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::Semimonthly
        );
        assert_eq!(
            "bi_weekly".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::Biweekly
        );
        assert!("fortnightly".parse::<PaymentFrequency>().is_err());
    }

    #[test]
    fn test_deserialize_defaults_ancillary_fields() {
        let p: LoanParameters = serde_json::from_str(
            r#"{"loan_amount": "200000", "interest_rate": "4.5", "loan_term_years": 15}"#,
        )
        .unwrap();
        assert_eq!(p.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(p.extra_payment_per_period, Decimal::ZERO);
        assert_eq!(p.monthly_hoa, Decimal::ZERO);
    }

    #[test]
    fn test_frequency_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentFrequency::Semimonthly).unwrap();
        assert_eq!(json, "\"semimonthly\"");
    }
}
