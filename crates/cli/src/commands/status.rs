//! Status command — resolve and print a user's entitlement

use anyhow::Result;
use chrono::{DateTime, Utc};
use habit_heroes_core::{
    expiry_notice, resolve, trial_notice, HeroesConfig, SubscriptionRecord, SubscriptionStatus,
};
use std::path::Path;

use crate::output::{json, terminal};
use crate::OutputFormat;

pub fn run(
    user_path: &Path,
    now: DateTime<Utc>,
    format: OutputFormat,
    config: &HeroesConfig,
) -> Result<()> {
    let user = super::load_user(user_path)?;
    let rendered = render(user.as_ref(), now, format, config)?;
    println!("{rendered}");
    Ok(())
}

/// Stored as paid or cancelled but missing the end date that would back it.
/// Ordinary expiry is not reported.
pub fn is_paid_without_end_date(user: &SubscriptionRecord) -> bool {
    matches!(
        user.status,
        SubscriptionStatus::Active | SubscriptionStatus::Cancelled
    ) && user.subscription_end_date.is_none()
}

/// Builds the status report for `user` at `now`.
pub fn render(
    user: Option<&SubscriptionRecord>,
    now: DateTime<Utc>,
    format: OutputFormat,
    config: &HeroesConfig,
) -> Result<String> {
    let entitlement = resolve(user, now);
    let trial = trial_notice(&entitlement, config.notice.trial_warning_days);
    let expiry = user.and_then(|u| expiry_notice(&entitlement, u));

    if let Some(u) = user.filter(|u| is_paid_without_end_date(u)) {
        tracing::warn!(
            stored = %u.status,
            derived = %entitlement.status,
            "paid subscription has no end date; access denied"
        );
    }

    match format {
        OutputFormat::Json => {
            let report = json::JsonStatus {
                now,
                entitlement,
                plan: user.and_then(|u| u.plan),
                trial_notice: trial,
                expiry_notice: expiry,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Terminal => Ok(terminal::format_status(
            user,
            &entitlement,
            trial.as_ref(),
            expiry.as_ref(),
        )),
    }
}
