//! Node.js bindings for Habit Heroes via NAPI-RS
//!
//! Exposes entitlement resolution to the web and mobile front ends. The JS
//! side passes the user object as JSON and `Date.now()` as `nowMs`.
//! Malformed input resolves to the signed-out entitlement instead of
//! throwing.

use chrono::{DateTime, Utc};
use habit_heroes_core::{resolve, Entitlement, SubscriptionRecord};
use napi_derive::napi;

fn resolve_json(user_json: Option<&str>, now_ms: i64) -> Entitlement {
    let Some(now) = DateTime::<Utc>::from_timestamp_millis(now_ms) else {
        return Entitlement::none();
    };
    let user = match user_json {
        Some(text) => SubscriptionRecord::from_json(text).ok().flatten(),
        None => None,
    };
    resolve(user.as_ref(), now)
}

/// Returns the entitlement as camelCase JSON.
#[napi]
pub fn resolve_entitlement(user_json: Option<String>, now_ms: i64) -> napi::Result<String> {
    let entitlement = resolve_json(user_json.as_deref(), now_ms);
    serde_json::to_string(&entitlement).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[napi]
pub fn has_access(user_json: Option<String>, now_ms: i64) -> bool {
    resolve_json(user_json.as_deref(), now_ms).can_access_premium_features
}

#[napi]
pub fn get_version() -> String {
    habit_heroes_core::VERSION.to_string()
}
