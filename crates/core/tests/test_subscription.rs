//! Tests for parsing backend user records

use chrono::{TimeZone, Utc};
use habit_heroes_core::{
    has_access, resolve, RawSubscriptionRecord, SubscriptionPlan, SubscriptionRecord, SubscriptionStatus,
};

// --- SubscriptionStatus ---

#[test]
fn test_status_from_raw_known_values() {
    assert_eq!(SubscriptionStatus::from_raw(Some("trial")), SubscriptionStatus::Trial);
    assert_eq!(SubscriptionStatus::from_raw(Some("active")), SubscriptionStatus::Active);
    assert_eq!(
        SubscriptionStatus::from_raw(Some("cancelled")),
        SubscriptionStatus::Cancelled
    );
    assert_eq!(
        SubscriptionStatus::from_raw(Some("expired")),
        SubscriptionStatus::Expired
    );
}

#[test]
fn test_status_from_raw_normalizes() {
    assert_eq!(SubscriptionStatus::from_raw(Some(" Trial ")), SubscriptionStatus::Trial);
    assert_eq!(SubscriptionStatus::from_raw(Some("ACTIVE")), SubscriptionStatus::Active);
    assert_eq!(
        SubscriptionStatus::from_raw(Some("canceled")),
        SubscriptionStatus::Cancelled
    );
}

#[test]
fn test_status_from_raw_unknown_is_expired() {
    for raw in [None, Some(""), Some("past_due"), Some("premium"), Some("trialing")] {
        assert_eq!(
            SubscriptionStatus::from_raw(raw),
            SubscriptionStatus::Expired,
            "{raw:?}"
        );
    }
}

#[test]
fn test_status_display_and_serde() {
    assert_eq!(SubscriptionStatus::Cancelled.to_string(), "cancelled");
    assert_eq!(
        serde_json::to_string(&SubscriptionStatus::Trial).unwrap(),
        "\"trial\""
    );
    assert_eq!(SubscriptionStatus::default(), SubscriptionStatus::Expired);
}

// --- SubscriptionPlan ---

#[test]
fn test_plan_from_raw() {
    assert_eq!(
        SubscriptionPlan::from_raw(Some("monthly")),
        Some(SubscriptionPlan::Monthly)
    );
    assert_eq!(
        SubscriptionPlan::from_raw(Some("Quarterly")),
        Some(SubscriptionPlan::Quarterly)
    );
    assert_eq!(
        SubscriptionPlan::from_raw(Some("yearly")),
        Some(SubscriptionPlan::Yearly)
    );
    assert_eq!(SubscriptionPlan::from_raw(Some("weekly")), None);
    assert_eq!(SubscriptionPlan::from_raw(None), None);
}

// --- from_json ---

#[test]
fn test_from_json_full_record() {
    let json = r#"{
        "id": 42,
        "username": "parent@example.com",
        "subscriptionStatus": "active",
        "subscriptionPlan": "yearly",
        "trialEndsAt": null,
        "subscriptionEndDate": "2027-01-01T00:00:00.000Z"
    }"#;
    let record = SubscriptionRecord::from_json(json).unwrap().unwrap();
    assert_eq!(record.status, SubscriptionStatus::Active);
    assert_eq!(record.plan, Some(SubscriptionPlan::Yearly));
    assert!(record.trial_ends_at.is_none());
    assert_eq!(
        record.subscription_end_date,
        Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_from_json_null_is_absent_user() {
    assert_eq!(SubscriptionRecord::from_json("null").unwrap(), None);
}

#[test]
fn test_from_json_empty_object_is_expired() {
    let record = SubscriptionRecord::from_json("{}").unwrap().unwrap();
    assert_eq!(record, SubscriptionRecord::new(SubscriptionStatus::Expired));
}

#[test]
fn test_from_json_ill_typed_fields_are_dropped() {
    let json = r#"{
        "subscriptionStatus": 7,
        "trialEndsAt": "soon",
        "subscriptionEndDate": false,
        "subscriptionPlan": ["monthly"]
    }"#;
    let record = SubscriptionRecord::from_json(json).unwrap().unwrap();
    assert_eq!(record.status, SubscriptionStatus::Expired);
    assert!(record.trial_ends_at.is_none());
    assert!(record.subscription_end_date.is_none());
    assert!(record.plan.is_none());
}

#[test]
fn test_from_json_epoch_millis_dates() {
    let json = r#"{"subscriptionStatus": "trial", "trialEndsAt": 1772323200000}"#;
    let record = SubscriptionRecord::from_json(json).unwrap().unwrap();
    assert_eq!(
        record.trial_ends_at,
        Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_from_json_malformed_is_error() {
    assert!(SubscriptionRecord::from_json("{not json").is_err());
    assert!(SubscriptionRecord::from_json("42").is_err());
    assert!(SubscriptionRecord::from_json("\"trial\"").is_err());
}

#[test]
fn test_from_json_non_object_is_error() {
    for text in [
        r#"["trial", "2099-01-01"]"#,
        "[]",
        r#""active""#,
        "5",
        "true",
    ] {
        let err = SubscriptionRecord::from_json(text).unwrap_err();
        assert!(err.to_string().contains("a user object or null"), "{text}: {err}");
    }
}

#[test]
fn test_positional_array_never_grants_access() {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let parsed = SubscriptionRecord::from_json(r#"["trial", "2099-01-01"]"#)
        .ok()
        .flatten();
    assert!(parsed.is_none());
    assert!(!has_access(parsed.as_ref(), now));
}

#[test]
fn test_unparseable_date_denies_access() {
    let json = r#"{"subscriptionStatus": "active", "subscriptionEndDate": "31/12/2099"}"#;
    let record = SubscriptionRecord::from_json(json).unwrap().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let ent = resolve(Some(&record), now);
    assert!(!ent.can_access_premium_features);
    assert_eq!(ent.status, SubscriptionStatus::Expired);
}

#[test]
fn test_from_raw_matches_from_impl() {
    let raw = RawSubscriptionRecord {
        subscription_status: Some(serde_json::json!("cancelled")),
        subscription_end_date: Some(serde_json::json!("2026-09-30")),
        ..Default::default()
    };
    let a = SubscriptionRecord::from_raw(raw.clone());
    let b: SubscriptionRecord = raw.into();
    assert_eq!(a, b);
    assert_eq!(a.status, SubscriptionStatus::Cancelled);
}

// --- Builders ---

#[test]
fn test_builder_helpers() {
    let at = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let record = SubscriptionRecord::new(SubscriptionStatus::Active)
        .with_subscription_end_date(at)
        .with_plan(SubscriptionPlan::Monthly);
    assert_eq!(record.subscription_end_date, Some(at));
    assert_eq!(record.plan, Some(SubscriptionPlan::Monthly));
    assert!(record.trial_ends_at.is_none());

    let trial = SubscriptionRecord::new(SubscriptionStatus::Trial).with_trial_ends_at(at);
    assert_eq!(trial.trial_ends_at, Some(at));
}

#[test]
fn test_typed_record_serializes_with_backend_keys() {
    let at = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let record = SubscriptionRecord::new(SubscriptionStatus::Trial).with_trial_ends_at(at);
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"subscriptionStatus\":\"trial\""));
    assert!(json.contains("\"trialEndsAt\""));
    assert!(!json.contains("subscriptionEndDate"));
    assert!(!json.contains("subscriptionPlan"));
}
