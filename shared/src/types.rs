//! Form and response types exchanged with presentation layers

use serde::{Deserialize, Deserializer, Serialize};

use crate::calculator::{self, CalculationInput, CalculationResult, SafetyConcern};
use crate::errors::CalculatorError;
use crate::validation::{self, ValidationError};

/// Calculator form as submitted, before validation
///
/// Numeric fields accept JSON numbers or numeric strings. An empty string
/// counts as zero, text that is not a number becomes NaN and is rejected
/// by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorForm {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "coerce_number")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "coerce_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "coerce_number")]
    pub height: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default, deserialize_with = "coerce_number")]
    pub goal_weight_loss: Option<f64>,
    #[serde(default, deserialize_with = "coerce_number")]
    pub weeks: Option<f64>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self {
            gender: Some("male".to_string()),
            age: Some(30.0),
            weight: Some(80.0),
            height: Some(175.0),
            activity_level: Some("1.375".to_string()),
            goal_weight_loss: Some(5.0),
            weeks: Some(12.0),
        }
    }
}

impl CalculatorForm {
    /// Parse a form from JSON
    pub fn from_json(json: &str) -> Result<Self, CalculatorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill every field missing here from `defaults`
    pub fn or(self, defaults: CalculatorForm) -> Self {
        Self {
            gender: self.gender.or(defaults.gender),
            age: self.age.or(defaults.age),
            weight: self.weight.or(defaults.weight),
            height: self.height.or(defaults.height),
            activity_level: self.activity_level.or(defaults.activity_level),
            goal_weight_loss: self.goal_weight_loss.or(defaults.goal_weight_loss),
            weeks: self.weeks.or(defaults.weeks),
        }
    }
}

fn coerce_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawNumber::Number(value) => value,
        RawNumber::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                0.0
            } else {
                text.parse().unwrap_or(f64::NAN)
            }
        }
    }))
}

/// Calculated plan together with the safety rules it triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieReport {
    pub result: CalculationResult,
    pub concerns: Vec<SafetyConcern>,
}

/// Response for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculatorResponse {
    Ok {
        result: CalculationResult,
        concerns: Vec<SafetyConcern>,
    },
    Invalid {
        errors: Vec<ValidationError>,
    },
    Error {
        message: String,
    },
}

impl From<Result<CalorieReport, CalculatorError>> for CalculatorResponse {
    fn from(outcome: Result<CalorieReport, CalculatorError>) -> Self {
        match outcome {
            Ok(report) => CalculatorResponse::Ok {
                result: report.result,
                concerns: report.concerns,
            },
            Err(CalculatorError::Validation(errors)) => CalculatorResponse::Invalid { errors },
            Err(err) => CalculatorResponse::Error {
                message: err.to_string(),
            },
        }
    }
}

/// Calculate the plan and its safety breakdown for a validated input
pub fn build_report(input: &CalculationInput) -> Result<CalorieReport, CalculatorError> {
    let result = calculator::calculate_calories(input)?;
    let concerns = calculator::safety_concerns(input)?;
    Ok(CalorieReport { result, concerns })
}

/// Validate a form, then calculate the plan and its safety breakdown
pub fn calculate_from_form(form: &CalculatorForm) -> Result<CalorieReport, CalculatorError> {
    build_report(&validation::validate_form(form)?)
}
