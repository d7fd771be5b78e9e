//! Node bindings for the amortization engine.
//!
//! Every export takes `LoanParameters` as a JSON string and returns the
//! JSON envelope (result, warnings, methodology, assumptions, metadata), or
//! bare CSV for `schedule_csv`. The UI calls these on each form change; the
//! engine is pure, so repeated calls with the same input return the same
//! output.

use amortize_core::analysis;
use amortize_core::LoanParameters;
use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_loan(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = analysis::analyze_loan(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn periodic_payment(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = analysis::quote_payment(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = analysis::schedule_report(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn period_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = analysis::period_schedule_report(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn monthly_breakdown(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let output = analysis::breakdown_report(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Yearly schedule as CSV. CSV has no room for warnings; callers that need
/// them read the `amortization_schedule` envelope.
#[napi]
pub fn schedule_csv(input_json: String) -> NapiResult<String> {
    let input = parse_loan(&input_json)?;
    let rows = analysis::schedule_report(&input).result;
    amortize_core::export::schedule_to_csv(&rows).map_err(to_napi_error)
}
