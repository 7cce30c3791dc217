//! Feature gating built on entitlement resolution
//!
//! Every gate is a read-only decision over `(user, now)`. Nothing here
//! mutates subscription state.

use crate::config::GatingConfig;
use crate::entitlement::resolve;
use crate::subscription::{SubscriptionRecord, SubscriptionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns `true` if `user` may use premium features at `now`.
pub fn has_access(user: Option<&SubscriptionRecord>, now: DateTime<Utc>) -> bool {
    resolve(user, now).can_access_premium_features
}

/// Premium users create habits freely; everyone else stays under `free_limit`.
pub fn can_create_habit(
    user: Option<&SubscriptionRecord>,
    now: DateTime<Utc>,
    current_habits: usize,
    free_limit: usize,
) -> bool {
    has_access(user, now) || current_habits < free_limit
}

/// The game id is carried for display and analytics only.
pub fn can_play_mini_game(
    user: Option<&SubscriptionRecord>,
    now: DateTime<Utc>,
    _game_id: &str,
) -> bool {
    has_access(user, now)
}

/// Something a premium entitlement unlocks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Feature {
    UnlimitedHabits,
    MiniGame(String),
    Premium(String),
}

impl Feature {
    /// `unlimited-habits`, `mini-game:<id>`, or any other premium label.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name == "unlimited-habits" {
            return Feature::UnlimitedHabits;
        }
        match name.strip_prefix("mini-game:") {
            Some(game) => Feature::MiniGame(game.to_string()),
            None => Feature::Premium(name.to_string()),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::UnlimitedHabits => write!(f, "unlimited-habits"),
            Feature::MiniGame(game) => write!(f, "mini-game:{game}"),
            Feature::Premium(name) => write!(f, "{name}"),
        }
    }
}

/// Why a gate said no, worded for the upsell screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    NotSignedIn,
    HabitLimitReached { limit: usize },
    TrialEnded,
    SubscriptionEnded,
    NoSubscription,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotSignedIn => write!(f, "sign in to continue"),
            DenialReason::HabitLimitReached { limit } => {
                write!(f, "the free plan is limited to {limit} habits")
            }
            DenialReason::TrialEnded => write!(f, "the free trial has ended"),
            DenialReason::SubscriptionEnded => write!(f, "the subscription has ended"),
            DenialReason::NoSubscription => write!(f, "no active subscription"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub feature: Feature,
    #[serde(flatten)]
    pub reason: DenialReason,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} requires Habit Heroes Premium: {}", self.feature, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    Granted,
    Denied(Denial),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("\u{26a1} {0}")]
    Denied(Denial),
}

/// Gating policy configured with the caller's free-tier limits.
#[derive(Debug, Clone, Default)]
pub struct FeatureGate {
    config: GatingConfig,
}

impl FeatureGate {
    pub fn new(config: GatingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GatingConfig {
        &self.config
    }

    /// Decides whether `feature` is unlocked for `user` at `now`.
    pub fn check(
        &self,
        feature: &Feature,
        user: Option<&SubscriptionRecord>,
        now: DateTime<Utc>,
    ) -> Access {
        if has_access(user, now) {
            return Access::Granted;
        }
        Access::Denied(Denial {
            feature: feature.clone(),
            reason: lapsed_reason(user),
        })
    }

    /// Decides whether one more habit may be created on top of `current_habits`.
    pub fn check_new_habit(
        &self,
        user: Option<&SubscriptionRecord>,
        now: DateTime<Utc>,
        current_habits: usize,
    ) -> Access {
        let limit = self.config.free_habit_limit;
        if can_create_habit(user, now, current_habits, limit) {
            return Access::Granted;
        }
        let reason = match user {
            None => DenialReason::NotSignedIn,
            Some(_) => DenialReason::HabitLimitReached { limit },
        };
        Access::Denied(Denial {
            feature: Feature::UnlimitedHabits,
            reason,
        })
    }

    /// Like [`FeatureGate::check`] but as a `Result` for `?` call sites.
    pub fn require(
        &self,
        feature: &Feature,
        user: Option<&SubscriptionRecord>,
        now: DateTime<Utc>,
    ) -> Result<(), AccessError> {
        match self.check(feature, user, now) {
            Access::Granted => Ok(()),
            Access::Denied(denial) => Err(AccessError::Denied(denial)),
        }
    }
}

fn lapsed_reason(user: Option<&SubscriptionRecord>) -> DenialReason {
    match user.map(|u| u.status) {
        None => DenialReason::NotSignedIn,
        Some(SubscriptionStatus::Trial) => DenialReason::TrialEnded,
        Some(SubscriptionStatus::Active | SubscriptionStatus::Cancelled) => {
            DenialReason::SubscriptionEnded
        }
        Some(SubscriptionStatus::Expired) => DenialReason::NoSubscription,
    }
}
