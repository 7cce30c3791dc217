//! Terminal output formatting

use colored::Colorize;
use habit_heroes_core::{
    Access, Entitlement, ExpiryNotice, Feature, HeroesConfig, SubscriptionRecord,
    SubscriptionStatus, TrialNotice, Urgency,
};

pub fn status_label(status: SubscriptionStatus) -> String {
    match status {
        SubscriptionStatus::Trial => "Trial".cyan().to_string(),
        SubscriptionStatus::Active => "Active".green().to_string(),
        SubscriptionStatus::Cancelled => "Cancelled".yellow().to_string(),
        SubscriptionStatus::Expired => "Expired".red().to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}

pub fn format_status(
    user: Option<&SubscriptionRecord>,
    entitlement: &Entitlement,
    trial: Option<&TrialNotice>,
    expiry: Option<&ExpiryNotice>,
) -> String {
    let mut lines = Vec::new();

    if user.is_none() {
        lines.push(format!("  {}", "Not signed in".dimmed()));
    }

    lines.push(format!(
        "  {}: {}",
        "Status".bold(),
        status_label(entitlement.status)
    ));

    if let Some(plan) = user.and_then(|u| u.plan) {
        lines.push(format!("  {}: {}", "Plan".bold(), plan));
    }

    lines.push(format!(
        "  {}: {}",
        "Premium features".bold(),
        yes_no(entitlement.can_access_premium_features)
    ));
    lines.push(format!(
        "  {}: {}",
        "Trial active".bold(),
        yes_no(entitlement.is_trial_active)
    ));
    lines.push(format!(
        "  {}: {}",
        "Paid period".bold(),
        yes_no(entitlement.is_premium_active)
    ));
    if entitlement.days_left > 0 {
        lines.push(format!(
            "  {}: {}",
            "Trial days left".bold(),
            entitlement.days_left
        ));
    }

    if let Some(notice) = trial {
        let msg = notice.message();
        let msg = match notice.urgency {
            Urgency::Urgent => msg.yellow().bold().to_string(),
            Urgency::Info => msg.cyan().to_string(),
        };
        lines.push(String::new());
        lines.push(format!("  {} {}", "\u{23f3}", msg));
    }

    if let Some(notice) = expiry {
        lines.push(String::new());
        lines.push(format!("  {} {}", "\u{26a1}".yellow(), notice.message()));
    }

    lines.join("\n")
}

pub fn format_access(feature: &Feature, access: &Access, config: &HeroesConfig) -> String {
    let label = match feature {
        Feature::MiniGame(game) if config.gating.is_premium_game(game) => {
            format!("{feature} (premium game)")
        }
        _ => feature.to_string(),
    };

    match access {
        Access::Granted => format!("  {} {} unlocked", "\u{2713}".green(), label.bold()),
        Access::Denied(denial) => format!(
            "  {} {} locked: {}",
            "\u{26a1}".yellow(),
            label.bold(),
            denial.reason
        ),
    }
}
