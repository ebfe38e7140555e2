//! Retention policies for the in-memory session store.
//!
//! Eviction lives at the store boundary so it can be tuned without touching
//! the recommendation service. The baseline policy is [`NoEviction`]:
//! sessions live for the process lifetime.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Bookkeeping visible to an eviction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionMeta {
    pub turn_count: usize,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Decides whether a session should be dropped during a sweep.
pub trait EvictionPolicy: Send + Sync {
    fn should_evict(&self, meta: &SessionMeta, now: DateTime<Utc>) -> bool;
}

/// Keep every session forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEviction;

impl EvictionPolicy for NoEviction {
    fn should_evict(&self, _meta: &SessionMeta, _now: DateTime<Utc>) -> bool {
        false
    }
}

/// Drop sessions that have not committed a turn for longer than `ttl`.
#[derive(Debug, Clone, Copy)]
pub struct IdleTtl {
    ttl: Duration,
}

impl IdleTtl {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl EvictionPolicy for IdleTtl {
    fn should_evict(&self, meta: &SessionMeta, now: DateTime<Utc>) -> bool {
        // A clock step backwards yields a negative delta, which never evicts.
        (now - meta.last_active)
            .to_std()
            .map(|idle| idle >= self.ttl)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn meta_idle_for(secs: i64, now: DateTime<Utc>) -> SessionMeta {
        let last_active = now - TimeDelta::seconds(secs);
        SessionMeta {
            turn_count: 2,
            created_at: last_active,
            last_active,
        }
    }

    #[test]
    fn test_no_eviction_never_evicts() {
        let now = Utc::now();
        assert!(!NoEviction.should_evict(&meta_idle_for(10_000_000, now), now));
    }

    #[test]
    fn test_idle_ttl_threshold() {
        let now = Utc::now();
        let policy = IdleTtl::new(Duration::from_secs(60));
        assert!(!policy.should_evict(&meta_idle_for(59, now), now));
        assert!(policy.should_evict(&meta_idle_for(60, now), now));
        assert!(policy.should_evict(&meta_idle_for(3600, now), now));
    }

    #[test]
    fn test_idle_ttl_ignores_future_activity() {
        let now = Utc::now();
        let policy = IdleTtl::new(Duration::from_secs(1));
        assert!(!policy.should_evict(&meta_idle_for(-30, now), now));
    }
}
