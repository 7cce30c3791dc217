//! Habit Heroes Core - Subscription Entitlements
//!
//! This crate derives what a family may use from the subscription snapshot
//! the backend keeps for them:
//! - Boundary parsing of loosely typed user records
//! - Entitlement resolution (trial / active / cancelled / expired)
//! - Feature gating for habits, mini-games and other premium features
//! - Trial and expiry banners
//!
//! Resolution is pure. Callers supply `now`, usually from a [`Clock`].

pub mod clock;
pub mod config;
pub mod entitlement;
pub mod gate;
pub mod notice;
pub mod subscription;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{GatingConfig, HeroesConfig, NoticeConfig, OutputConfig};
pub use entitlement::{resolve, resolve_record, Entitlement};
pub use gate::{
    can_create_habit, can_play_mini_game, has_access, Access, AccessError, Denial, DenialReason,
    Feature, FeatureGate,
};
pub use notice::{expiry_notice, trial_notice, ExpiryNotice, TrialNotice, Urgency};
pub use subscription::{
    parse_timestamp, RawSubscriptionRecord, SubscriptionPlan, SubscriptionRecord,
    SubscriptionStatus,
};

/// Habit Heroes version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
