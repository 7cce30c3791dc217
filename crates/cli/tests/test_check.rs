use chrono::{DateTime, Duration, TimeZone, Utc};
use habit_heroes_cli::commands::check::{evaluate, validate_habits};
use habit_heroes_cli::output::json::JsonCheck;
use habit_heroes_cli::output::terminal::format_access;
use habit_heroes_core::{
    Access, DenialReason, Feature, HeroesConfig, SubscriptionRecord, SubscriptionStatus,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 20, 8, 0, 0).unwrap()
}

fn expired_user() -> SubscriptionRecord {
    SubscriptionRecord::new(SubscriptionStatus::Expired)
}

fn active_user() -> SubscriptionRecord {
    SubscriptionRecord::new(SubscriptionStatus::Active)
        .with_subscription_end_date(now() + Duration::days(90))
}

#[test]
fn test_evaluate_habit_cap_uses_config_limit() {
    let mut config = HeroesConfig::default();
    config.gating.free_habit_limit = 2;
    let user = expired_user();

    let under = evaluate(&Feature::UnlimitedHabits, Some(&user), Some(1), now(), &config);
    assert!(under.is_granted());

    let at = evaluate(&Feature::UnlimitedHabits, Some(&user), Some(2), now(), &config);
    match at {
        Access::Denied(d) => assert_eq!(d.reason, DenialReason::HabitLimitReached { limit: 2 }),
        Access::Granted => panic!("expected habit cap denial"),
    }
}

#[test]
fn test_evaluate_without_count_is_plain_gate() {
    let config = HeroesConfig::default();
    let access = evaluate(&Feature::UnlimitedHabits, Some(&expired_user()), None, now(), &config);
    assert!(!access.is_granted());

    let access = evaluate(&Feature::UnlimitedHabits, Some(&active_user()), None, now(), &config);
    assert!(access.is_granted());
}

#[test]
fn test_evaluate_mini_game() {
    let config = HeroesConfig::default();
    let game = Feature::parse("mini-game:memory-match");
    assert!(evaluate(&game, Some(&active_user()), None, now(), &config).is_granted());
    assert!(!evaluate(&game, None, None, now(), &config).is_granted());
}

#[test]
fn test_json_check_report() {
    let config = HeroesConfig::default();
    let feature = Feature::parse("weekly-report");

    let denied = evaluate(&feature, Some(&expired_user()), None, now(), &config);
    let report = JsonCheck::new(&feature, &denied);
    assert_eq!(report.feature, "weekly-report");
    assert!(!report.granted);
    assert_eq!(report.reason, Some(DenialReason::NoSubscription));
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["reason"], "no_subscription");
    assert!(report.message.unwrap().contains("weekly-report"));

    let granted = evaluate(&feature, Some(&active_user()), None, now(), &config);
    let json = serde_json::to_string(&JsonCheck::new(&feature, &granted)).unwrap();
    assert!(json.contains("\"granted\":true"));
    assert!(!json.contains("reason"));
}

#[test]
fn test_format_access_labels_premium_games() {
    let config = HeroesConfig::default();
    let game = Feature::parse("mini-game:habit-quest");
    let out = format_access(&game, &Access::Granted, &config);
    assert!(out.contains("premium game"), "{out}");
    assert!(out.contains("unlocked"), "{out}");

    let other = Feature::parse("mini-game:tic-tac-toe");
    let denied = evaluate(&other, None, None, now(), &config);
    let out = format_access(&other, &denied, &config);
    assert!(!out.contains("premium game"), "{out}");
    assert!(out.contains("sign in"), "{out}");
}

#[test]
fn test_habits_count_only_with_unlimited_habits() {
    assert!(validate_habits(&Feature::UnlimitedHabits, Some(3)).is_ok());
    assert!(validate_habits(&Feature::UnlimitedHabits, None).is_ok());
    assert!(validate_habits(&Feature::parse("weekly-report"), None).is_ok());

    let err = validate_habits(&Feature::parse("mini-game:habit-quest"), Some(3)).unwrap_err();
    assert!(err.to_string().contains("--habits"), "{err}");
}
