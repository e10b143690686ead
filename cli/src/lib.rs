//! Calorie Calculator CLI Library
//!
//! Terminal presentation layer: resolves the form from flags, an optional
//! JSON file and configured defaults, runs the shared calculator and renders
//! the outcome. Exposed as a library for integration tests.

pub mod args;
pub mod config;
pub mod report;

use anyhow::{Context, Result};
use calorie_calculator_shared::{
    build_report, validate_form, ActivityLevel, CalculatorError, CalculatorForm, CalculatorResponse,
};
use std::fs;
use tracing::{debug, info, warn};

use crate::args::Cli;
use crate::config::{AppConfig, OutputFormat};

/// Exit code for a form that failed validation
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Rendered output and process exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: u8,
    pub output: String,
}

impl Outcome {
    fn success(output: String) -> Self {
        Self { exit_code: 0, output }
    }
}

/// Resolve the form: flags first, then the input file, then configured defaults
pub fn resolve_form(cli: &Cli, config: &AppConfig) -> Result<CalculatorForm> {
    let mut form = cli.flag_form();

    if let Some(path) = &cli.input {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        let from_file = CalculatorForm::from_json(&json)
            .with_context(|| format!("Failed to parse input file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded form from input file");
        form = form.or(from_file);
    }

    Ok(form.or(CalculatorForm::from(&config.defaults)))
}

/// Run the calculator for parsed arguments
pub fn run(cli: &Cli, config: &AppConfig) -> Result<Outcome> {
    let format = cli.format.unwrap_or(config.output.format);

    if cli.list_activity_levels {
        let output = match format {
            OutputFormat::Text => report::render_activity_levels(),
            OutputFormat::Json => serde_json::to_string_pretty(&ActivityLevel::options())?,
        };
        return Ok(Outcome::success(output));
    }

    let form = resolve_form(cli, config)?;
    debug!(?form, "Resolved calculator form");

    let outcome = validate_form(&form).and_then(|input| {
        let report = build_report(&input)?;
        Ok((input, report))
    });

    let exit_code = match &outcome {
        Ok((_, report)) => {
            info!(
                target_calories = report.result.target_calories,
                daily_deficit = report.result.daily_deficit,
                is_unsafe = report.result.is_unsafe,
                "Calculated calorie plan"
            );
            for concern in &report.concerns {
                warn!(concern = %concern.description(), "Plan flagged as unsafe");
            }
            0
        }
        Err(CalculatorError::Validation(errors)) => {
            warn!(fields = errors.len(), "Form failed validation");
            EXIT_INVALID_INPUT
        }
        Err(_) => 1,
    };

    let output = match format {
        OutputFormat::Json => {
            let response = CalculatorResponse::from(outcome.map(|(_, report)| report));
            serde_json::to_string_pretty(&response)?
        }
        OutputFormat::Text => match outcome {
            Ok((input, report)) => report::render_report(&input, &report),
            Err(CalculatorError::Validation(errors)) => report::render_validation_errors(&errors),
            Err(err) => return Err(err.into()),
        },
    };

    Ok(Outcome { exit_code, output })
}
