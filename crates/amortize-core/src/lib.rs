//! Fixed-rate loan amortization and monthly PITI breakdown.
//!
//! The engine is three pure stages: [`payment`] derives the level periodic
//! payment, [`schedule`] simulates the loan period by period and rolls the
//! result into yearly rows, and [`piti`] turns the payment and housing costs
//! into a monthly-equivalent breakdown. [`analysis::analyze_loan`] runs all
//! of them for one [`LoanParameters`] value.

pub mod analysis;
pub mod error;
pub mod format;
pub mod payment;
pub mod piti;
pub mod schedule;
pub mod summary;
pub mod types;

#[cfg(feature = "export")]
pub mod export;

pub use error::AmortizeError;
pub use types::*;

/// Standard result type for fallible amortize operations
pub type AmortizeResult<T> = Result<T, AmortizeError>;
