//! Calorie Calculator WASM Module
//!
//! WebAssembly bindings so the browser form runs the calculation
//! client-side. All values cross the boundary as JSON strings.

use calorie_calculator_shared::{
    calculate_from_form, validate_form, ActivityLevel, CalculatorError, CalculatorForm,
    CalculatorResponse, ValidationError,
};
use wasm_bindgen::prelude::*;

/// Fallback body if a response cannot be encoded
const ENCODE_FAILURE: &str = r#"{"status":"error","message":"Failed to encode response"}"#;

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| ENCODE_FAILURE.to_string())
}

/// Validate a submitted form and calculate the calorie plan
///
/// Returns a JSON `CalculatorResponse` with status `ok`, `invalid`
/// (one error per field) or `error` (malformed JSON).
#[wasm_bindgen]
pub fn calculate(form_json: &str) -> String {
    let outcome = CalculatorForm::from_json(form_json).and_then(|form| calculate_from_form(&form));
    to_json(&CalculatorResponse::from(outcome))
}

/// Activity selector options as JSON
#[wasm_bindgen]
pub fn activity_levels() -> String {
    to_json(&ActivityLevel::options())
}

/// Initial form values as JSON
#[wasm_bindgen]
pub fn default_form() -> String {
    to_json(&CalculatorForm::default())
}

/// Check a form without calculating, returning the field errors as JSON
///
/// Always a JSON array; malformed JSON is reported against the `form` field.
#[wasm_bindgen]
pub fn validate(form_json: &str) -> String {
    let errors = match CalculatorForm::from_json(form_json).and_then(|form| validate_form(&form)) {
        Ok(_) => Vec::new(),
        Err(CalculatorError::Validation(errors)) => errors,
        Err(err) => vec![ValidationError::new("form", &err.to_string())],
    };
    to_json(&errors)
}
