//! Configuration file parsing for .habit-heroes.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILENAME: &str = ".habit-heroes.toml";

/// Main configuration structure for .habit-heroes.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroesConfig {
    #[serde(default)]
    pub gating: GatingConfig,

    #[serde(default)]
    pub notice: NoticeConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatingConfig {
    /// Habits a family may create without premium access
    #[serde(default = "default_free_habit_limit")]
    pub free_habit_limit: usize,

    /// Mini-games labelled premium in the game picker (display only)
    #[serde(default = "default_premium_games")]
    pub premium_games: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    /// `days_left` at or below which the trial banner turns urgent
    #[serde(default = "default_trial_warning_days")]
    pub trial_warning_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_free_habit_limit() -> usize {
    3
}

fn default_premium_games() -> Vec<String> {
    vec![
        "memory-match".to_string(),
        "word-scramble".to_string(),
        "habit-quest".to_string(),
    ]
}

fn default_trial_warning_days() -> u32 {
    3
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for HeroesConfig {
    fn default() -> Self {
        Self {
            gating: GatingConfig::default(),
            notice: NoticeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for GatingConfig {
    fn default() -> Self {
        Self {
            free_habit_limit: default_free_habit_limit(),
            premium_games: default_premium_games(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            trial_warning_days: default_trial_warning_days(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl GatingConfig {
    pub fn is_premium_game(&self, game_id: &str) -> bool {
        self.premium_games.iter().any(|g| g == game_id)
    }
}

impl HeroesConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: HeroesConfig = toml::from_str(&contents)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Find and load .habit-heroes.toml from `start_dir` or its ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading config");
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        tracing::debug!("no {CONFIG_FILENAME} found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("write config {}", path.display()))?;
        Ok(())
    }
}
