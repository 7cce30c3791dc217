//! Subscription record types and the boundary parser for backend snapshots
//!
//! The backend stores `subscriptionStatus` as a free-form string and the two
//! dates as whatever the serializer produced. Everything loose is normalized
//! here, once, so the resolver only ever sees closed enums and `Option`s.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Subscription lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Cancelled,
    #[default]
    Expired,
}

impl SubscriptionStatus {
    /// Normalizes a stored status string. Unknown or missing values are `Expired`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return SubscriptionStatus::Expired;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "trial" => SubscriptionStatus::Trial,
            "active" => SubscriptionStatus::Active,
            "cancelled" | "canceled" => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Expired,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing period label. Informational; gating never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly,
    Quarterly,
    Yearly,
}

impl SubscriptionPlan {
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        match raw?.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(SubscriptionPlan::Monthly),
            "quarterly" => Some(SubscriptionPlan::Quarterly),
            "yearly" => Some(SubscriptionPlan::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionPlan::Monthly => write!(f, "monthly"),
            SubscriptionPlan::Quarterly => write!(f, "quarterly"),
            SubscriptionPlan::Yearly => write!(f, "yearly"),
        }
    }
}

/// User record as the backend sends it. Every field is optional and untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubscriptionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<Value>,
}

/// Typed subscription snapshot of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(rename = "subscriptionStatus")]
    pub status: SubscriptionStatus,

    /// When the free trial lapses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_ends_at: Option<DateTime<Utc>>,

    /// When a paid (or cancelled but still paid-up) period ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_end_date: Option<DateTime<Utc>>,

    #[serde(
        rename = "subscriptionPlan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plan: Option<SubscriptionPlan>,
}

impl SubscriptionRecord {
    pub fn new(status: SubscriptionStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_trial_ends_at(mut self, at: DateTime<Utc>) -> Self {
        self.trial_ends_at = Some(at);
        self
    }

    pub fn with_subscription_end_date(mut self, at: DateTime<Utc>) -> Self {
        self.subscription_end_date = Some(at);
        self
    }

    pub fn with_plan(mut self, plan: SubscriptionPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Converts a loose backend record. Never fails: bad values become
    /// `Expired` / `None`.
    pub fn from_raw(raw: RawSubscriptionRecord) -> Self {
        Self {
            status: SubscriptionStatus::from_raw(
                raw.subscription_status.as_ref().and_then(Value::as_str),
            ),
            trial_ends_at: raw.trial_ends_at.as_ref().and_then(parse_timestamp),
            subscription_end_date: raw.subscription_end_date.as_ref().and_then(parse_timestamp),
            plan: SubscriptionPlan::from_raw(
                raw.subscription_plan.as_ref().and_then(Value::as_str),
            ),
        }
    }

    /// Parses a user snapshot from JSON text.
    ///
    /// `null` is an absent (signed-out) user and yields `Ok(None)`. Only
    /// malformed JSON or a non-object value is an error; missing or
    /// ill-typed subscription fields are not.
    pub fn from_json(text: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        let unexpected = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => {
                let raw: RawSubscriptionRecord = serde_json::from_value(Value::Object(map))?;
                return Ok(Some(Self::from_raw(raw)));
            }
            // Derived struct impls also accept sequences; a positional array
            // must not be read as a user.
            Value::Array(_) => Unexpected::Seq,
            Value::Bool(b) => Unexpected::Bool(b),
            Value::Number(_) => Unexpected::Other("number"),
            Value::String(_) => Unexpected::Other("string"),
        };
        Err(de::Error::invalid_type(unexpected, &"a user object or null"))
    }
}

impl From<RawSubscriptionRecord> for SubscriptionRecord {
    fn from(raw: RawSubscriptionRecord) -> Self {
        Self::from_raw(raw)
    }
}

/// Reads a timestamp the way the front end would have produced it.
///
/// Accepts RFC 3339 strings, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` strings and
/// bare `YYYY-MM-DD` dates (both read as UTC), and numbers of epoch
/// milliseconds. Anything else is `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let f = n.as_f64()?;
                    if !f.is_finite() {
                        return None;
                    }
                    f.trunc() as i64
                }
            };
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
