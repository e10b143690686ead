//! Calorie Calculator Shared Library
//!
//! The calorie engine, form validation and the types exchanged with the
//! WASM and CLI presentation layers.

pub mod calculator;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use calculator::{
    activity_multiplier, calculate_calories, ActivityLevel, CalculationInput, CalculationResult, Gender,
    SafetyConcern,
};
pub use errors::CalculatorError;
pub use types::{build_report, calculate_from_form, CalculatorForm, CalculatorResponse, CalorieReport};
pub use validation::{validate_form, ValidationError};
