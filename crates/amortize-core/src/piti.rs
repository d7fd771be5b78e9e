//! Monthly PITI (principal, interest, taxes, insurance) cost breakdown.
//!
//! Payments made on a non-monthly frequency are normalized to a
//! monthly-equivalent rate: `periodic × periods_per_year / 12`. This is an
//! average cash-flow figure, not an actual monthly schedule. A biweekly
//! borrower pays 26 installments a year, so some calendar months carry three
//! payments while the breakdown shows the same amount every month.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly-equivalent housing cost components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Scheduled loan payment, normalized to a monthly rate.
    pub principal_and_interest: Money,
    /// Voluntary extra principal, normalized to a monthly rate.
    pub extra_payment: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    /// Sum of all components.
    pub total: Money,
}

/// Convert a per-period amount to its monthly-equivalent rate.
pub fn monthly_equivalent(per_period: Money, periods_per_year: u32) -> Money {
    annual_share(per_period, Decimal::from(periods_per_year))
}

/// `amount × factor / 12`, saturating at the edge of the decimal range.
fn annual_share(amount: Money, factor: Decimal) -> Money {
    match amount.checked_mul(factor) {
        Some(scaled) => scaled / MONTHS_PER_YEAR,
        None => (amount / MONTHS_PER_YEAR).saturating_mul(factor),
    }
}

/// Compose the monthly PITI breakdown. `property_tax_rate` is an annual
/// percentage of `home_value`.
pub fn compute_monthly_breakdown(
    periodic_payment: Money,
    periods_per_year: u32,
    extra_per_period: Money,
    home_value: Money,
    property_tax_rate: Rate,
    yearly_insurance: Money,
    monthly_hoa: Money,
) -> MonthlyBreakdown {
    let principal_and_interest = monthly_equivalent(periodic_payment, periods_per_year);
    let extra_payment = monthly_equivalent(extra_per_period, periods_per_year);
    let property_tax = annual_share(home_value, property_tax_rate / dec!(100));
    let insurance = yearly_insurance / MONTHS_PER_YEAR;

    let total = principal_and_interest
        .saturating_add(property_tax)
        .saturating_add(insurance)
        .saturating_add(monthly_hoa)
        .saturating_add(extra_payment);

    MonthlyBreakdown {
        principal_and_interest,
        extra_payment,
        property_tax,
        insurance,
        hoa: monthly_hoa,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_inputs() {
        let b = compute_monthly_breakdown(
            Decimal::ZERO,
            12,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(b.total, Decimal::ZERO);
        assert_eq!(b.principal_and_interest, Decimal::ZERO);
        assert_eq!(b.property_tax, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_components() {
        let b = compute_monthly_breakdown(
            dec!(1610.46),
            12,
            dec!(100),
            dec!(400_000),
            dec!(1.2),
            dec!(1800),
            dec!(250),
        );
        assert_eq!(b.principal_and_interest, dec!(1610.46));
        assert_eq!(b.extra_payment, dec!(100));
        assert_eq!(b.property_tax, dec!(400));
        assert_eq!(b.insurance, dec!(150));
        assert_eq!(b.hoa, dec!(250));
        assert_eq!(b.total, dec!(2510.46));
    }

    #[test]
    fn test_biweekly_normalization() {
        // 26 payments of 600 a year = 1300 per month on average.
        let b = compute_monthly_breakdown(
            dec!(600),
            26,
            dec!(60),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(b.principal_and_interest, dec!(1300));
        assert_eq!(b.extra_payment, dec!(130));
        assert_eq!(b.total, dec!(1430));
    }

    #[test]
    fn test_weekly_equivalent() {
        assert_eq!(monthly_equivalent(dec!(300), 52), dec!(1300));
        assert_eq!(monthly_equivalent(dec!(500), 24), dec!(1000));
    }

    #[test]
    fn test_components_at_decimal_range_saturate() {
        let b = compute_monthly_breakdown(
            Decimal::MAX,
            52,
            Decimal::MAX,
            Decimal::MAX,
            dec!(200),
            Decimal::MAX,
            Decimal::MAX,
        );
        assert_eq!(b.property_tax, (Decimal::MAX / dec!(12)) * dec!(2));
        assert_eq!(b.total, Decimal::MAX);
        assert_eq!(b.hoa, Decimal::MAX);

        // In-range values take the exact path.
        assert_eq!(monthly_equivalent(dec!(1200), 26), dec!(2600));
    }
}
