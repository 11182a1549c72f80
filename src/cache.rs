//! Caching of successful check outcomes.
//!
//! Only successes are ever cached. A cached success is reused until the
//! check's [`CachePolicy`] says it has expired, or until the probe fails.

use std::time::Duration;

use tokio::time::Instant;

/// How long a successful probe outcome may be reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Reuse a success until the probe fails.
    #[default]
    Indefinite,
    /// Reuse a success while less than the given duration has elapsed since
    /// it was recorded. A zero duration never reuses anything.
    ExpiresAfter(Duration),
}

impl CachePolicy {
    /// Builds a policy from a maximum age in milliseconds, where 0 means the
    /// success is kept until the next failure.
    pub fn from_max_age_millis(millis: u64) -> Self {
        if millis == 0 {
            CachePolicy::Indefinite
        } else {
            CachePolicy::ExpiresAfter(Duration::from_millis(millis))
        }
    }

    /// Whether a success recorded at `recorded_at` may still be used at `now`.
    pub fn is_fresh(&self, recorded_at: Instant, now: Instant) -> bool {
        match self {
            CachePolicy::Indefinite => true,
            CachePolicy::ExpiresAfter(max_age) => {
                now.saturating_duration_since(recorded_at) < *max_age
            }
        }
    }
}

/// The cache state of a single check.
#[derive(Debug, Default)]
pub struct CacheSlot {
    policy: CachePolicy,
    last_success: Option<Instant>,
}

impl CacheSlot {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            last_success: None,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn is_usable(&self, now: Instant) -> bool {
        self.last_success
            .is_some_and(|recorded_at| self.policy.is_fresh(recorded_at, now))
    }

    pub fn record_success(&mut self, now: Instant) {
        self.last_success = Some(now);
    }

    pub fn invalidate(&mut self) {
        self.last_success = None;
    }

    pub fn has_success(&self) -> bool {
        self.last_success.is_some()
    }
}
