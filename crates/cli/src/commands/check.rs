//! Check command — run a feature gate for a user snapshot

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use habit_heroes_core::{Access, Feature, FeatureGate, HeroesConfig, SubscriptionRecord};
use std::path::Path;

use crate::output::{json, terminal};
use crate::OutputFormat;

/// Returns `true` when access is granted.
pub fn run(
    feature: &str,
    user_path: &Path,
    habits: Option<usize>,
    now: DateTime<Utc>,
    format: OutputFormat,
    config: &HeroesConfig,
) -> Result<bool> {
    let feature = Feature::parse(feature);
    validate_habits(&feature, habits)?;
    let user = super::load_user(user_path)?;
    let access = evaluate(&feature, user.as_ref(), habits, now, config);

    match format {
        OutputFormat::Json => {
            let report = json::JsonCheck::new(&feature, &access);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Terminal => {
            println!("{}", terminal::format_access(&feature, &access, config));
        }
    }

    Ok(access.is_granted())
}

/// `--habits` only means something for `unlimited-habits`.
pub fn validate_habits(feature: &Feature, habits: Option<usize>) -> Result<()> {
    if habits.is_some() && *feature != Feature::UnlimitedHabits {
        bail!("--habits only applies to unlimited-habits, not {feature}");
    }
    Ok(())
}

/// Habit creation is capped by count; every other feature is a plain gate.
pub fn evaluate(
    feature: &Feature,
    user: Option<&SubscriptionRecord>,
    habits: Option<usize>,
    now: DateTime<Utc>,
    config: &HeroesConfig,
) -> Access {
    let gate = FeatureGate::new(config.gating.clone());
    match (feature, habits) {
        (Feature::UnlimitedHabits, Some(current)) => gate.check_new_habit(user, now, current),
        _ => gate.check(feature, user, now),
    }
}
