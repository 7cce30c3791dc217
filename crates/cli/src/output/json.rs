//! JSON output formatting

use chrono::{DateTime, Utc};
use habit_heroes_core::{
    Access, DenialReason, Entitlement, ExpiryNotice, Feature, SubscriptionPlan, TrialNotice,
};
use serde::{Deserialize, Serialize};

/// `status --format json`: the entitlement fields at top level plus banners.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStatus {
    pub now: DateTime<Utc>,

    #[serde(flatten)]
    pub entitlement: Entitlement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<SubscriptionPlan>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_notice: Option<TrialNotice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_notice: Option<ExpiryNotice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCheck {
    pub feature: String,
    pub granted: bool,
    #[serde(flatten)]
    pub reason: Option<DenialReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JsonCheck {
    pub fn new(feature: &Feature, access: &Access) -> Self {
        match access {
            Access::Granted => Self {
                feature: feature.to_string(),
                granted: true,
                reason: None,
                message: None,
            },
            Access::Denied(denial) => Self {
                feature: feature.to_string(),
                granted: false,
                reason: Some(denial.reason),
                message: Some(denial.to_string()),
            },
        }
    }
}
