//! Habit Heroes CLI library — exposed for integration tests

pub mod commands;
pub mod output;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "habit-heroes")]
#[command(about = "Inspect Habit Heroes subscriptions and premium gates", long_about = None)]
#[command(version = habit_heroes_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (default: from config, else terminal)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (default: nearest .habit-heroes.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate at this instant instead of the system clock (RFC 3339)
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the resolved entitlement for a user snapshot
    Status {
        /// User JSON file, or `-` for stdin
        #[arg(long)]
        user: PathBuf,
    },

    /// Check whether a premium feature is unlocked (exit 1 when denied)
    Check {
        /// `unlimited-habits`, `mini-game:<id>`, or any premium feature name
        feature: String,

        /// User JSON file, or `-` for stdin
        #[arg(long)]
        user: PathBuf,

        /// Habits the family already has; checks the free-tier cap instead.
        /// Only valid with `unlimited-habits`.
        #[arg(long)]
        habits: Option<usize>,
    },

    /// Initialize .habit-heroes.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    /// Format named in config; unknown names fall back to terminal.
    pub fn from_config(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Terminal,
        }
    }
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    habit_heroes_core::parse_timestamp(&serde_json::Value::String(s.to_string()))
        .ok_or_else(|| format!("invalid timestamp '{s}' (expected RFC 3339)"))
}
