//! Habit Heroes CLI - subscription entitlement inspector

use anyhow::Result;
use clap::Parser;
use habit_heroes_core::{Clock, HeroesConfig, SystemClock};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use habit_heroes_cli::{commands, Cli, Commands, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = match &cli.config {
        Some(path) => HeroesConfig::from_file(path)?,
        None => HeroesConfig::find_and_load(Path::new("."))?,
    };
    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    // One instant for everything this invocation prints
    let now = cli.now.unwrap_or_else(|| SystemClock.now());

    match &cli.command {
        Commands::Status { user } => {
            commands::status::run(user, now, format, &config)?;
        }
        Commands::Check {
            feature,
            user,
            habits,
        } => {
            let granted = commands::check::run(feature, user, *habits, now, format, &config)?;
            if !granted {
                std::process::exit(1);
            }
        }
        Commands::Init { path } => {
            commands::init::run(path.as_deref())?;
        }
    }

    Ok(())
}
