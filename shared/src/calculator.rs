//! Calorie target calculations
//!
//! Derives BMR, TDEE, the daily deficit required to reach a weight-loss goal,
//! the resulting calorie target and a safety flag for aggressive plans.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O, no hidden state; identical input gives identical output
//! 2. **Permissive**: Range checks live in [`crate::validation`], the engine computes for any numbers
//! 3. **Evidence-Based**: Mifflin-St Jeor for BMR, ~7700 kcal per kg of body fat

use serde::{Deserialize, Serialize};

use crate::errors::CalculatorError;

/// Approximate energy content of one kilogram of body fat (kcal)
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Daily deficit above which a plan is considered aggressive (kcal/day)
pub const MAX_SAFE_DAILY_DEFICIT: f64 = 1000.0;

/// Minimum daily intake for men (kcal/day)
pub const MALE_CALORIE_FLOOR: f64 = 1500.0;

/// Minimum daily intake for women (kcal/day)
pub const FEMALE_CALORIE_FLOOR: f64 = 1200.0;

/// Multiplier used when the activity key is not recognized (sedentary)
pub const FALLBACK_ACTIVITY_MULTIPLIER: f64 = 1.2;

const DAYS_PER_WEEK: f64 = 7.0;

// ============================================================================
// Input Types
// ============================================================================

/// Gender used by the BMR equation and the safe calorie floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Activity level, keyed by the multiplier string the form submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 times/week
    LightlyActive,
    /// Moderate exercise 3-5 times/week
    ModeratelyActive,
    /// Hard exercise 6-7 times/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Form key for this level
    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "1.2",
            ActivityLevel::LightlyActive => "1.375",
            ActivityLevel::ModeratelyActive => "1.55",
            ActivityLevel::VeryActive => "1.725",
            ActivityLevel::ExtraActive => "1.9",
        }
    }

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Light exercise 1-3 times/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 times/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 times/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }

    /// Look up a level by its exact form key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.key() == key)
    }

    /// Options for rendering an activity selector
    pub fn options() -> Vec<ActivityOption> {
        Self::ALL
            .iter()
            .map(|level| ActivityOption {
                key: level.key(),
                multiplier: level.multiplier(),
                description: level.description(),
            })
            .collect()
    }
}

/// One entry of the activity selector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityOption {
    pub key: &'static str,
    pub multiplier: f64,
    pub description: &'static str,
}

/// Multiplier for a form key, falling back to sedentary for unknown keys
pub fn activity_multiplier(key: &str) -> f64 {
    ActivityLevel::from_key(key)
        .map(|level| level.multiplier())
        .unwrap_or(FALLBACK_ACTIVITY_MULTIPLIER)
}

/// Validated calculator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub gender: Gender,
    /// Age in years
    pub age: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Activity key, e.g. "1.55"
    pub activity_level: String,
    /// Kilograms to lose
    pub goal_weight_loss: f64,
    /// Plan duration in weeks
    pub weeks: f64,
}

// ============================================================================
// Result Types
// ============================================================================

/// Calorie plan derived from a [`CalculationInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: i32,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: i32,
    /// Required daily deficit (kcal/day)
    pub daily_deficit: i32,
    /// Daily intake target, always `tdee - daily_deficit`
    pub target_calories: i32,
    /// Projected loss in kg/week, two decimals
    pub kg_per_week: f64,
    /// Plan is aggressive or below the safe floor
    pub is_unsafe: bool,
}

/// A safety rule triggered by a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SafetyConcern {
    /// Daily deficit above [`MAX_SAFE_DAILY_DEFICIT`]
    AggressiveDeficit { daily_deficit: f64 },
    /// Target intake below the floor for the gender
    BelowCalorieFloor { target_calories: f64, floor: f64 },
}

impl SafetyConcern {
    /// Get a human-readable description
    pub fn description(&self) -> String {
        match self {
            SafetyConcern::AggressiveDeficit { daily_deficit } => format!(
                "Daily deficit of {:.1} kcal exceeds the {:.0} kcal limit",
                daily_deficit, MAX_SAFE_DAILY_DEFICIT
            ),
            SafetyConcern::BelowCalorieFloor {
                target_calories,
                floor,
            } => format!(
                "Target of {:.1} kcal is below the safe minimum of {:.0} kcal",
                target_calories, floor
            ),
        }
    }
}

// ============================================================================
// BMR and TDEE
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Daily deficit needed to lose `goal_kg` over `weeks`
///
/// Returns `None` when the duration is zero or NaN.
pub fn calculate_daily_deficit(goal_kg: f64, weeks: f64) -> Option<f64> {
    if weeks == 0.0 || weeks.is_nan() {
        return None;
    }
    Some(goal_kg * KCAL_PER_KG_FAT / (weeks * DAYS_PER_WEEK))
}

/// Minimum safe daily intake for a gender
pub fn calorie_floor(gender: Gender) -> f64 {
    match gender {
        Gender::Male => MALE_CALORIE_FLOOR,
        Gender::Female => FEMALE_CALORIE_FLOOR,
    }
}

/// List every safety rule the plan triggers
pub fn assess_safety(gender: Gender, daily_deficit: f64, target_calories: f64) -> Vec<SafetyConcern> {
    let mut concerns = Vec::new();
    if daily_deficit > MAX_SAFE_DAILY_DEFICIT {
        concerns.push(SafetyConcern::AggressiveDeficit { daily_deficit });
    }
    let floor = calorie_floor(gender);
    if target_calories < floor {
        concerns.push(SafetyConcern::BelowCalorieFloor {
            target_calories,
            floor,
        });
    }
    concerns
}

// ============================================================================
// Calorie Plan
// ============================================================================

/// Round to the nearest kcal, half away from zero
fn round_kcal(value: f64) -> i32 {
    value.round() as i32
}

/// Round to two decimal places
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unrounded BMR, TDEE and daily deficit for an input
fn energy_balance(input: &CalculationInput) -> Result<(f64, f64, f64), CalculatorError> {
    let bmr = calculate_bmr_mifflin(input.weight, input.height, input.age, input.gender);
    let tdee = bmr * activity_multiplier(&input.activity_level);
    let daily_deficit = calculate_daily_deficit(input.goal_weight_loss, input.weeks)
        .ok_or(CalculatorError::InvalidDuration(input.weeks))?;
    Ok((bmr, tdee, daily_deficit))
}

/// Calculate the full calorie plan
///
/// No range checks are applied; out-of-range values are computed as given.
/// The only rejected input is a zero (or NaN) duration, which leaves the
/// daily deficit undefined.
pub fn calculate_calories(input: &CalculationInput) -> Result<CalculationResult, CalculatorError> {
    let (bmr, tdee, daily_deficit) = energy_balance(input)?;

    let target_calories = tdee - daily_deficit;
    let kg_per_week = daily_deficit * DAYS_PER_WEEK / KCAL_PER_KG_FAT;
    let is_unsafe = !assess_safety(input.gender, daily_deficit, target_calories).is_empty();

    let tdee = round_kcal(tdee);
    let daily_deficit = round_kcal(daily_deficit);

    Ok(CalculationResult {
        bmr: round_kcal(bmr),
        tdee,
        daily_deficit,
        // Difference of the rounded values, not a rounded difference
        target_calories: tdee - daily_deficit,
        kg_per_week: round_2dp(kg_per_week),
        is_unsafe,
    })
}

/// Safety breakdown for an input, from the same unrounded values as [`calculate_calories`]
pub fn safety_concerns(input: &CalculationInput) -> Result<Vec<SafetyConcern>, CalculatorError> {
    let (_, tdee, daily_deficit) = energy_balance(input)?;
    Ok(assess_safety(input.gender, daily_deficit, tdee - daily_deficit))
}
