pub mod export;
pub mod loan;
