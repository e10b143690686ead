//! Command-line arguments

use calorie_calculator_shared::CalculatorForm;
use clap::Parser;
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Calculate a daily calorie target for a weight-loss goal
#[derive(Parser, Debug, Default)]
#[command(name = "calorie-calc")]
#[command(version)]
#[command(about = "Calculate a daily calorie target for a weight-loss goal", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Gender (male or female)
    #[arg(long)]
    pub gender: Option<String>,

    /// Age in years (14-100)
    #[arg(long)]
    pub age: Option<f64>,

    /// Weight in kg (30-300)
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in cm (120-230)
    #[arg(long)]
    pub height: Option<f64>,

    /// Activity multiplier key: 1.2, 1.375, 1.55, 1.725 or 1.9
    #[arg(long = "activity")]
    pub activity_level: Option<String>,

    /// Kilograms to lose (0-100)
    #[arg(long = "goal")]
    pub goal_weight_loss: Option<f64>,

    /// Plan duration in weeks (1-104)
    #[arg(long)]
    pub weeks: Option<f64>,

    /// Read the form from a JSON file (flags override its fields)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the activity levels and exit
    #[arg(long)]
    pub list_activity_levels: bool,
}

impl Cli {
    /// Form fields given as flags; unset flags stay `None`
    pub fn flag_form(&self) -> CalculatorForm {
        CalculatorForm {
            gender: self.gender.clone(),
            age: self.age,
            weight: self.weight,
            height: self.height,
            activity_level: self.activity_level.clone(),
            goal_weight_loss: self.goal_weight_loss,
            weeks: self.weeks,
        }
    }
}
