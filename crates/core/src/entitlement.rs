//! Entitlement resolution: subscription snapshot + `now` -> access rights
//!
//! `resolve` is pure and total. It never reads the clock, never performs I/O
//! and never fails. Missing or ambiguous data denies access.

use crate::subscription::{SubscriptionRecord, SubscriptionStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access rights derived from a subscription snapshot at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    pub is_trial_active: bool,

    /// Paid and within the paid period, whether or not renewal was cancelled
    pub is_premium_active: bool,

    pub is_expired: bool,
    pub can_access_premium_features: bool,

    /// Whole days until the trial ends, rounded up. Zero once it has passed.
    pub days_left: u32,

    pub status: SubscriptionStatus,
}

impl Entitlement {
    /// Entitlement of a signed-out user.
    pub const fn none() -> Self {
        Self {
            is_trial_active: false,
            is_premium_active: false,
            is_expired: true,
            can_access_premium_features: false,
            days_left: 0,
            status: SubscriptionStatus::Expired,
        }
    }

    /// True when the derived status differs from what the backend stored,
    /// e.g. an `active` record with no end date.
    pub fn stored_status_disagrees(&self, record: &SubscriptionRecord) -> bool {
        self.status != record.status
    }
}

impl Default for Entitlement {
    fn default() -> Self {
        Self::none()
    }
}

/// Resolves the entitlement of `user` at `now`.
///
/// Status precedence is trial > active > cancelled > expired.
pub fn resolve(user: Option<&SubscriptionRecord>, now: DateTime<Utc>) -> Entitlement {
    let Some(record) = user else {
        return Entitlement::none();
    };

    let days_left = record
        .trial_ends_at
        .map(|ends_at| days_until(ends_at, now))
        .unwrap_or(0);

    let is_trial_active =
        record.status == SubscriptionStatus::Trial && is_future(record.trial_ends_at, now);
    let is_paid_active = record.status == SubscriptionStatus::Active
        && is_future(record.subscription_end_date, now);
    let is_cancelled_but_valid = record.status == SubscriptionStatus::Cancelled
        && is_future(record.subscription_end_date, now);

    let can_access_premium_features = is_trial_active || is_paid_active || is_cancelled_but_valid;

    let status = if is_trial_active {
        SubscriptionStatus::Trial
    } else if is_paid_active {
        SubscriptionStatus::Active
    } else if is_cancelled_but_valid {
        SubscriptionStatus::Cancelled
    } else {
        SubscriptionStatus::Expired
    };

    if status != record.status {
        tracing::debug!(
            stored = %record.status,
            derived = %status,
            "subscription resolved to a different status than stored"
        );
    }

    Entitlement {
        is_trial_active,
        is_premium_active: is_paid_active || is_cancelled_but_valid,
        is_expired: !can_access_premium_features,
        can_access_premium_features,
        days_left,
        status,
    }
}

/// Shorthand for `resolve(Some(record), now)`.
pub fn resolve_record(record: &SubscriptionRecord, now: DateTime<Utc>) -> Entitlement {
    resolve(Some(record), now)
}

fn is_future(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(at, Some(at) if now < at)
}

/// `max(0, ceil((ends_at - now) / 1 day))`
fn days_until(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let remaining = ends_at.signed_duration_since(now);
    if remaining <= Duration::zero() {
        return 0;
    }
    let whole = remaining.num_days();
    let days = if remaining > Duration::days(whole) {
        whole + 1
    } else {
        whole
    };
    u32::try_from(days).unwrap_or(u32::MAX)
}
