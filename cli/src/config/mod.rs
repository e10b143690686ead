//! Configuration management for the calorie calculator CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: CALC__)

use anyhow::Result;
use calorie_calculator_shared::CalculatorForm;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub defaults: DefaultsConfig,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Form values used when neither a flag nor the input file sets a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub gender: String,
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub activity_level: String,
    pub goal_weight_loss: f64,
    pub weeks: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self::from(&CalculatorForm::default())
    }
}

impl From<&CalculatorForm> for DefaultsConfig {
    fn from(form: &CalculatorForm) -> Self {
        Self {
            gender: form.gender.clone().unwrap_or_default(),
            age: form.age.unwrap_or_default(),
            weight: form.weight.unwrap_or_default(),
            height: form.height.unwrap_or_default(),
            activity_level: form.activity_level.clone().unwrap_or_default(),
            goal_weight_loss: form.goal_weight_loss.unwrap_or_default(),
            weeks: form.weeks.unwrap_or_default(),
        }
    }
}

impl From<&DefaultsConfig> for CalculatorForm {
    fn from(defaults: &DefaultsConfig) -> Self {
        Self {
            gender: Some(defaults.gender.clone()),
            age: Some(defaults.age),
            weight: Some(defaults.weight),
            height: Some(defaults.height),
            activity_level: Some(defaults.activity_level.clone()),
            goal_weight_loss: Some(defaults.goal_weight_loss),
            weeks: Some(defaults.weeks),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                format: OutputFormat::Text,
            },
            defaults: DefaultsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with CALC__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        Self::load_from(&format!("config/{}.toml", env))
    }

    /// Load configuration with an explicit config file path
    pub fn load_from(config_file: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(config_file).required(false))
            // e.g., CALC__DEFAULTS__WEEKS=16 sets defaults.weeks
            .add_source(config::Environment::with_prefix("CALC").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.defaults.gender, "male");
        assert_eq!(config.defaults.activity_level, "1.375");
        assert_eq!(config.defaults.weeks, 12.0);
    }

    #[test]
    fn test_defaults_round_trip_form() {
        let form = CalculatorForm::from(&DefaultsConfig::default());
        assert_eq!(form, CalculatorForm::default());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nformat = \"json\"\n\n[defaults]\ngender = \"female\"\nweeks = 20.0").unwrap();

        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.defaults.gender, "female");
        assert_eq!(config.defaults.weeks, 20.0);
        // Untouched keys keep code defaults
        assert_eq!(config.defaults.height, 175.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_from("config/does-not-exist.toml").unwrap();
        assert_eq!(config.defaults.age, 30.0);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
