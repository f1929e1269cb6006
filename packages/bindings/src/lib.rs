use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
///
/// Validation failures pass their fixed messages through verbatim so the
/// presentation layer decides how to render them.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Equity
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_equity(input_json: String) -> NapiResult<String> {
    let input: screener_core::equity::EquityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        screener_core::equity::calculate_equity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Screen an equity form of raw text fields: validates the whole form as a
/// batch, then calculates.
#[napi]
pub fn screen_equity_form(form_json: String) -> NapiResult<String> {
    let form: screener_core::equity::EquityForm =
        serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let input = form.parse().map_err(to_napi_error)?;
    let output =
        screener_core::equity::calculate_equity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Bond
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_bond(input_json: String) -> NapiResult<String> {
    let input: screener_core::bond::BondInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = screener_core::bond::calculate_bond(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Screen a bond form of raw text fields: the coupon frequency is vetted
/// first, then the rest of the form is validated as a batch.
#[napi]
pub fn screen_bond_form(form_json: String) -> NapiResult<String> {
    let form: screener_core::bond::BondForm =
        serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let input = form.parse().map_err(to_napi_error)?;
    let output = screener_core::bond::calculate_bond(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
