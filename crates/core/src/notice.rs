//! Trial and expiry banners derived from an entitlement

use crate::entitlement::Entitlement;
use crate::subscription::{SubscriptionRecord, SubscriptionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Info,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialNotice {
    pub days_left: u32,
    pub urgency: Urgency,
}

impl TrialNotice {
    pub fn message(&self) -> String {
        match self.days_left {
            1 => "1 day left in your free trial".to_string(),
            n => format!("{n} days left in your free trial"),
        }
    }
}

/// Banner for a running trial. `None` unless the trial is active.
pub fn trial_notice(entitlement: &Entitlement, warn_within_days: u32) -> Option<TrialNotice> {
    if !entitlement.is_trial_active {
        return None;
    }
    let urgency = if entitlement.days_left <= warn_within_days {
        Urgency::Urgent
    } else {
        Urgency::Info
    };
    Some(TrialNotice {
        days_left: entitlement.days_left,
        urgency,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryNotice {
    pub ends_at: DateTime<Utc>,
}

impl ExpiryNotice {
    pub fn message(&self) -> String {
        format!("Premium ends on {}", self.ends_at.format("%B %-d, %Y"))
    }
}

/// Banner for a cancelled subscription that is still paid up.
pub fn expiry_notice(entitlement: &Entitlement, record: &SubscriptionRecord) -> Option<ExpiryNotice> {
    if entitlement.status != SubscriptionStatus::Cancelled {
        return None;
    }
    record
        .subscription_end_date
        .map(|ends_at| ExpiryNotice { ends_at })
}
