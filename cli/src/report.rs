//! Text rendering of calculator outcomes

use calorie_calculator_shared::{CalorieReport, CalculationInput, ValidationError};

const UNSAFE_ADVICE: &str = "Your calorie deficit is too large (>1000 kcal) or your intake is below \
the safe minimum. This can harm your metabolism. Please extend the plan duration.";

const METHOD_NOTE: &str = "How it works: basal metabolic rate is estimated with the Mifflin-St Jeor \
equation, adjusted for activity, and reduced by the deficit needed to reach your goal.";

/// Render a calculated plan
pub fn render_report(input: &CalculationInput, report: &CalorieReport) -> String {
    let result = &report.result;
    let mut lines = vec![
        format!("Your daily target: {} kcal/day", result.target_calories),
        format!(
            "  to lose {} kg in {} weeks",
            input.goal_weight_loss, input.weeks
        ),
        String::new(),
        format!("  {:<20}{:>8} kcal", "BMR (basal):", result.bmr),
        format!("  {:<20}{:>8} kcal", "TDEE (maintenance):", result.tdee),
        format!("  {:<20}{:>8} kcal", "Daily deficit:", result.daily_deficit),
        format!("  {:<20}{:>8.2} kg/week", "Expected pace:", expected_pace(result.kg_per_week)),
    ];

    if result.is_unsafe {
        lines.push(String::new());
        lines.push("Warning: aggressive plan!".to_string());
        lines.extend(
            report
                .concerns
                .iter()
                .map(|concern| format!("  - {}", concern.description())),
        );
        lines.push(format!("  {}", UNSAFE_ADVICE));
    }

    lines.push(String::new());
    lines.push(METHOD_NOTE.to_string());
    join_lines(lines)
}

/// Weekly weight change shown as a loss; zero stays unsigned
fn expected_pace(kg_per_week: f64) -> f64 {
    if kg_per_week == 0.0 {
        0.0
    } else {
        -kg_per_week
    }
}

fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Render field errors, one line per field
pub fn render_validation_errors(errors: &[ValidationError]) -> String {
    let mut lines = vec!["Please fix the following fields:".to_string()];
    lines.extend(errors.iter().map(|error| format!("  - {}", error.user_message())));
    join_lines(lines)
}

/// Render the activity selector options
pub fn render_activity_levels() -> String {
    join_lines(
        calorie_calculator_shared::ActivityLevel::options()
            .iter()
            .map(|option| format!("{:<6} {}", option.key, option.description))
            .collect(),
    )
}
