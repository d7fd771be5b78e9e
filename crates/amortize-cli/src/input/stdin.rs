use amortize_core::LoanParameters;
use std::io::{self, Read};

/// Loan parameters piped on stdin as JSON.
/// Returns None when stdin is a terminal or carries nothing.
pub fn read_loan_stdin() -> Result<Option<LoanParameters>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let params: LoanParameters = serde_json::from_str(trimmed)
        .map_err(|e| format!("Invalid loan parameters on stdin: {}", e))?;
    Ok(Some(params))
}
