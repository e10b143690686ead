//! Error types for the calorie calculator

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while turning a submitted form into a calorie plan
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Validation failed: {}", format_field_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Plan duration must be non-zero, got {0} weeks")]
    InvalidDuration(f64),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),
}

impl CalculatorError {
    /// Field errors, empty unless this is a validation failure
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            CalculatorError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for CalculatorError {
    fn from(err: serde_json::Error) -> Self {
        CalculatorError::InvalidForm(err.to_string())
    }
}

fn format_field_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::user_message)
        .collect::<Vec<_>>()
        .join("; ")
}
