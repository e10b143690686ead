//! Calorie Calculator CLI
//!
//! Prints a daily calorie target for a weight-loss goal.
//!
//! Reports go to stdout, logs to stderr.

use anyhow::Result;
use calorie_calculator_cli::{args::Cli, config::AppConfig, run};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("Calculation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<u8> {
    let config = AppConfig::load()?;
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Configuration loaded"
    );

    let outcome = run(cli, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(outcome.output.as_bytes())?;
    if !outcome.output.ends_with('\n') {
        writeln!(stdout)?;
    }

    Ok(outcome.exit_code)
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "calorie_calc=warn,calorie_calculator_cli=warn".into()
        } else {
            "calorie_calc=info,calorie_calculator_cli=info".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
