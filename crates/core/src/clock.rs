//! Injectable time source
//!
//! Resolution functions take `now` as a plain argument. A `Clock` is how a
//! caller obtains that value, once per render pass.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Freezes the current instant so several consumers share one `now`.
    fn snapshot(&self) -> FixedClock {
        FixedClock(self.now())
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for FixedClock {
    fn from(at: DateTime<Utc>) -> Self {
        FixedClock(at)
    }
}
