//! Input validation functions
//!
//! Range checks for the calculator form. The engine in [`crate::calculator`]
//! trusts its input, so every submitted form goes through [`validate_form`]
//! first. Each violated field produces exactly one message.

use serde::{Deserialize, Serialize};

use crate::calculator::{ActivityLevel, CalculationInput, Gender};
use crate::errors::CalculatorError;
use crate::types::CalculatorForm;

/// Age range in years
pub const AGE_RANGE: (f64, f64) = (14.0, 100.0);
/// Weight range in kg
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 300.0);
/// Height range in cm
pub const HEIGHT_RANGE_CM: (f64, f64) = (120.0, 230.0);
/// Weight-loss goal range in kg
pub const GOAL_RANGE_KG: (f64, f64) = (0.0, 100.0);
/// Plan duration range in weeks
pub const WEEKS_RANGE: (f64, f64) = (1.0, 104.0);

/// Valid gender values
pub const VALID_GENDERS: &[&str] = &["male", "female"];

fn ensure_finite(value: f64, label: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", label));
    }
    Ok(())
}

/// Validate age (in years)
pub fn validate_age(age: f64) -> Result<(), String> {
    ensure_finite(age, "Age")?;
    if age < AGE_RANGE.0 {
        return Err("Age must be at least 14 years".to_string());
    }
    if age > AGE_RANGE.1 {
        return Err("Age must be at most 100 years".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    ensure_finite(weight_kg, "Weight")?;
    if weight_kg < WEIGHT_RANGE_KG.0 {
        return Err("Weight must be at least 30 kg".to_string());
    }
    if weight_kg > WEIGHT_RANGE_KG.1 {
        return Err("Weight must be at most 300 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    ensure_finite(height_cm, "Height")?;
    if height_cm < HEIGHT_RANGE_CM.0 {
        return Err("Height must be at least 120 cm".to_string());
    }
    if height_cm > HEIGHT_RANGE_CM.1 {
        return Err("Height must be at most 230 cm".to_string());
    }
    Ok(())
}

/// Validate weight-loss goal (in kg)
pub fn validate_goal_weight_loss(goal_kg: f64) -> Result<(), String> {
    ensure_finite(goal_kg, "Goal")?;
    if goal_kg < GOAL_RANGE_KG.0 {
        return Err("Goal must not be negative".to_string());
    }
    if goal_kg > GOAL_RANGE_KG.1 {
        return Err("No more than 100 kg at a time".to_string());
    }
    Ok(())
}

/// Validate plan duration (in weeks)
pub fn validate_weeks(weeks: f64) -> Result<(), String> {
    ensure_finite(weeks, "Duration")?;
    if weeks < WEEKS_RANGE.0 {
        return Err("Duration must be at least 1 week".to_string());
    }
    if weeks > WEEKS_RANGE.1 {
        return Err("Duration must be at most 104 weeks (2 years)".to_string());
    }
    Ok(())
}

/// Validate gender, exact lowercase tag only
pub fn validate_gender(gender: &str) -> Result<Gender, String> {
    gender.parse().map_err(|_| {
        format!("Gender must be one of: {}", VALID_GENDERS.join(", "))
    })
}

/// Validate activity level key, exact match only
pub fn validate_activity_level(key: &str) -> Result<ActivityLevel, String> {
    ActivityLevel::from_key(key).ok_or_else(|| {
        let keys: Vec<_> = ActivityLevel::ALL.iter().map(|level| level.key()).collect();
        format!("Activity level must be one of: {}", keys.join(", "))
    })
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map form field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "gender" => "Gender",
        "age" => "Age",
        "weight" => "Weight",
        "height" => "Height",
        "activityLevel" => "Activity Level",
        "goalWeightLoss" => "Goal",
        "weeks" => "Duration",
        "form" => "Form",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(rename = "label")]
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

// ============================================================================
// Form Validation
// ============================================================================

/// Collects one error per field while keeping the parsed values
#[derive(Default)]
struct FormChecker {
    errors: Vec<ValidationError>,
}

impl FormChecker {
    fn number(&mut self, field: &str, value: Option<f64>, check: fn(f64) -> Result<(), String>) -> Option<f64> {
        let Some(value) = value else {
            self.fail(field, &format!("{} is required", get_field_display_label(field)));
            return None;
        };
        match check(value) {
            Ok(()) => Some(value),
            Err(message) => {
                self.fail(field, &message);
                None
            }
        }
    }

    fn choice<T>(
        &mut self,
        field: &str,
        value: Option<&str>,
        missing: &str,
        check: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let Some(value) = value else {
            self.fail(field, missing);
            return None;
        };
        match check(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.fail(field, &message);
                None
            }
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError::new(field, message));
    }
}

/// Validate a submitted form and build the engine input
///
/// Reports every violated field, in form order, before rejecting.
pub fn validate_form(form: &CalculatorForm) -> Result<CalculationInput, CalculatorError> {
    let mut checker = FormChecker::default();

    let gender = checker.choice("gender", form.gender.as_deref(), "Select a gender", validate_gender);
    let age = checker.number("age", form.age, validate_age);
    let weight = checker.number("weight", form.weight, validate_weight_kg);
    let height = checker.number("height", form.height, validate_height_cm);
    let activity = checker.choice(
        "activityLevel",
        form.activity_level.as_deref(),
        "Select an activity level",
        validate_activity_level,
    );
    let goal = checker.number("goalWeightLoss", form.goal_weight_loss, validate_goal_weight_loss);
    let weeks = checker.number("weeks", form.weeks, validate_weeks);

    match (gender, age, weight, height, activity, goal, weeks) {
        (Some(gender), Some(age), Some(weight), Some(height), Some(activity), Some(goal), Some(weeks)) => {
            Ok(CalculationInput {
                gender,
                age,
                weight,
                height,
                activity_level: activity.key().to_string(),
                goal_weight_loss: goal,
                weeks,
            })
        }
        _ => Err(CalculatorError::Validation(checker.errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn fields(err: &CalculatorError) -> Vec<&str> {
        err.field_errors().iter().map(|e| e.field.as_str()).collect()
    }

    #[rstest]
    #[case(14.0, true)]
    #[case(100.0, true)]
    #[case(13.9, false)]
    #[case(100.5, false)]
    #[case(f64::NAN, false)]
    fn test_validate_age(#[case] age: f64, #[case] ok: bool) {
        assert_eq!(validate_age(age).is_ok(), ok);
    }

    #[test]
    fn test_validate_weight_kg() {
        assert!(validate_weight_kg(30.0).is_ok());
        assert!(validate_weight_kg(300.0).is_ok());
        assert_eq!(validate_weight_kg(29.9).unwrap_err(), "Weight must be at least 30 kg");
        assert_eq!(validate_weight_kg(301.0).unwrap_err(), "Weight must be at most 300 kg");
        assert!(validate_weight_kg(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(120.0).is_ok());
        assert!(validate_height_cm(230.0).is_ok());
        assert!(validate_height_cm(119.0).is_err());
        assert!(validate_height_cm(231.0).is_err());
    }

    #[test]
    fn test_validate_goal_and_weeks() {
        assert!(validate_goal_weight_loss(0.0).is_ok());
        assert!(validate_goal_weight_loss(100.0).is_ok());
        assert_eq!(validate_goal_weight_loss(-1.0).unwrap_err(), "Goal must not be negative");
        assert!(validate_goal_weight_loss(100.1).is_err());

        assert!(validate_weeks(1.0).is_ok());
        assert!(validate_weeks(104.0).is_ok());
        assert_eq!(validate_weeks(0.0).unwrap_err(), "Duration must be at least 1 week");
        assert!(validate_weeks(105.0).is_err());
        assert_eq!(validate_weeks(f64::NAN).unwrap_err(), "Duration must be a valid number");
    }

    #[test]
    fn test_validate_gender() {
        assert_eq!(validate_gender("male"), Ok(Gender::Male));
        assert_eq!(validate_gender("female"), Ok(Gender::Female));
        assert!(validate_gender("Female").is_err());
        assert_eq!(validate_gender("other").unwrap_err(), "Gender must be one of: male, female");
    }

    #[test]
    fn test_validate_activity_level() {
        assert_eq!(validate_activity_level("1.55"), Ok(ActivityLevel::ModeratelyActive));
        assert_eq!(
            validate_activity_level("2").unwrap_err(),
            "Activity level must be one of: 1.2, 1.375, 1.55, 1.725, 1.9"
        );
    }

    #[test]
    fn test_default_form_is_valid() {
        let input = validate_form(&CalculatorForm::default()).unwrap();
        assert_eq!(input.gender, Gender::Male);
        assert_eq!(input.activity_level, "1.375");
        assert_eq!(input.weeks, 12.0);
    }

    #[test]
    fn test_one_error_per_violated_field() {
        let form = CalculatorForm {
            gender: Some("robot".to_string()),
            age: Some(5.0),
            weight: Some(80.0),
            height: None,
            activity_level: None,
            goal_weight_loss: Some(150.0),
            weeks: Some(0.0),
        };
        let err = validate_form(&form).unwrap_err();
        assert_eq!(
            fields(&err),
            vec!["gender", "age", "height", "activityLevel", "goalWeightLoss", "weeks"]
        );
        assert_eq!(err.field_errors()[2].message, "Height is required");
        assert_eq!(err.field_errors()[3].message, "Select an activity level");
    }

    #[test]
    fn test_padded_uppercase_gender_rejected() {
        let form = CalculatorForm {
            gender: Some("  MALE ".to_string()),
            ..CalculatorForm::default()
        };
        let err = validate_form(&form).unwrap_err();
        assert_eq!(fields(&err), vec!["gender"]);
        assert_eq!(err.field_errors()[0].message, "Gender must be one of: male, female");
    }

    #[test]
    fn test_missing_gender() {
        let form = CalculatorForm {
            gender: None,
            ..CalculatorForm::default()
        };
        let err = validate_form(&form).unwrap_err();
        assert_eq!(fields(&err), vec!["gender"]);
        assert_eq!(err.field_errors()[0].message, "Select a gender");
    }

    #[test]
    fn test_validation_error_label() {
        let err = ValidationError::new("goalWeightLoss", "No more than 100 kg at a time");
        assert_eq!(err.display_label, "Goal");
        assert_eq!(err.user_message(), "Goal: No more than 100 kg at a time");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_ranges_accepted(
            age in 14.0f64..=100.0,
            weight in 30.0f64..=300.0,
            height in 120.0f64..=230.0,
            goal in 0.0f64..=100.0,
            weeks in 1.0f64..=104.0
        ) {
            let form = CalculatorForm {
                age: Some(age),
                weight: Some(weight),
                height: Some(height),
                goal_weight_loss: Some(goal),
                weeks: Some(weeks),
                ..CalculatorForm::default()
            };
            prop_assert!(validate_form(&form).is_ok());
        }

        #[test]
        fn prop_invalid_weight_reported_once(weight in 300.1f64..1000.0) {
            let form = CalculatorForm {
                weight: Some(weight),
                ..CalculatorForm::default()
            };
            let err = validate_form(&form).unwrap_err();
            prop_assert_eq!(fields(&err), vec!["weight"]);
        }

        #[test]
        fn prop_short_plans_rejected(weeks in -10.0f64..1.0) {
            prop_assert!(validate_weeks(weeks).is_err());
        }
    }
}
