use amortize_core::LoanParameters;
use std::fs;
use std::path::{Path, PathBuf};

/// Read loan parameters from a JSON file.
pub fn read_loan_file(path: &str) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let params: LoanParameters = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid loan parameters in '{}': {}", resolved.display(), e))?;
    Ok(params)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        return Err(format!("Loan file not found: {}", resolved.display()).into());
    }

    Ok(resolved)
}
