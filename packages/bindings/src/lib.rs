use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::repayment::{self, CalculationState, LoanForm, LoanInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Repayment
// ---------------------------------------------------------------------------

/// Typed inputs in, full computation envelope out. Throws on invalid input.
#[napi]
pub fn calculate_repayment(input_json: String) -> NapiResult<String> {
    let input: LoanInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repayment::calculate_repayment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Raw form fields in, result-panel state out.
///
/// Invalid input comes back as a `failed` state rather than an exception;
/// only malformed JSON throws.
#[napi]
pub fn calculate_form(form_json: String) -> NapiResult<String> {
    let form: LoanForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let state = CalculationState::from_form(&form);
    serde_json::to_string(&state).map_err(to_napi_error)
}

/// Initial field values for a fresh form.
#[napi]
pub fn default_form() -> NapiResult<String> {
    serde_json::to_string(&LoanForm::default()).map_err(to_napi_error)
}
