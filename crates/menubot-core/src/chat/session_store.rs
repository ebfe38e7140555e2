//! Session store: maps an opaque session key to its ordered turn history.
//!
//! Sessions are created lazily by the first append and are never mutated
//! except by appending. Only commits allocate; reads of an unseen key return
//! an empty history and leave the store untouched.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use menubot_types::chat::{SessionKey, Turn};

use super::eviction::{EvictionPolicy, NoEviction, SessionMeta};

/// Storage for per-session conversation history.
///
/// Per-key operations are linearizable: concurrent commits on the same key
/// are ordered by commit time, and each commit stamps `sequence_number`
/// with the turn's position in the session. Operations on different keys
/// never wait on one another beyond a brief map-shard lock.
pub trait SessionStore: Send + Sync {
    /// Ordered history of `key`; empty if the key has never been committed to.
    fn get_history(&self, key: &SessionKey) -> Vec<Turn>;

    /// Append a single turn, creating the session if needed.
    fn append(&self, key: &SessionKey, turn: Turn);

    /// Atomically append a user turn followed by its assistant reply.
    ///
    /// No other commit on `key` can interleave between the two turns.
    fn append_pair(&self, key: &SessionKey, user: Turn, assistant: Turn);

    /// Number of live sessions.
    fn session_count(&self) -> usize;

    /// Apply the store's retention policy. Returns the number of evicted sessions.
    fn sweep(&self, now: DateTime<Utc>) -> usize;
}

/// Turns of one session plus the timestamps eviction policies look at.
#[derive(Debug)]
struct SessionLog {
    turns: Vec<Turn>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl SessionLog {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            turns: Vec::new(),
            created_at: now,
            last_active: now,
        }
    }

    fn push(&mut self, mut turn: Turn) {
        turn.sequence_number = self.turns.len() as u64;
        self.turns.push(turn);
        self.last_active = Utc::now();
    }

    fn meta(&self) -> SessionMeta {
        SessionMeta {
            turn_count: self.turns.len(),
            created_at: self.created_at,
            last_active: self.last_active,
        }
    }
}

/// Process-lifetime session store backed by a [`DashMap`].
///
/// Each commit runs under the owning shard's write lock, which makes the
/// sequence stamping and push atomic for that key. The lock is only held for
/// the in-memory push, never across I/O.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionKey, SessionLog>,
    policy: Box<dyn EvictionPolicy>,
    max_sessions: Option<usize>,
}

impl InMemorySessionStore {
    /// Store with no eviction and no capacity bound.
    pub fn new() -> Self {
        Self::with_policy(Box::new(NoEviction), None)
    }

    /// Store with a retention policy and an optional capacity bound.
    ///
    /// When `max_sessions` is set, a sweep also drops the least recently
    /// active sessions until the bound holds.
    pub fn with_policy(policy: Box<dyn EvictionPolicy>, max_sessions: Option<usize>) -> Self {
        Self {
            sessions: DashMap::new(),
            policy,
            max_sessions,
        }
    }

    fn enforce_capacity(&self, max: usize) -> usize {
        let live = self.sessions.len();
        if live <= max {
            return 0;
        }

        let mut by_activity: Vec<(SessionKey, DateTime<Utc>)> = self
            .sessions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().last_active))
            .collect();
        by_activity.sort_by_key(|(_, last_active)| *last_active);

        let mut evicted = 0;
        for (key, seen_active) in by_activity.into_iter().take(live - max) {
            // Skip sessions that committed after the snapshot was taken.
            if self
                .sessions
                .remove_if(&key, |_, log| log.last_active <= seen_active)
                .is_some()
            {
                evicted += 1;
            }
        }
        evicted
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_history(&self, key: &SessionKey) -> Vec<Turn> {
        self.sessions
            .get(key)
            .map(|log| log.turns.clone())
            .unwrap_or_default()
    }

    fn append(&self, key: &SessionKey, turn: Turn) {
        let mut log = self
            .sessions
            .entry(key.clone())
            .or_insert_with(SessionLog::new);
        log.push(turn);
    }

    fn append_pair(&self, key: &SessionKey, user: Turn, assistant: Turn) {
        let mut log = self
            .sessions
            .entry(key.clone())
            .or_insert_with(SessionLog::new);
        log.push(user);
        log.push(assistant);
        debug!(session = %key, turns = log.turns.len(), "Committed turn pair");
    }

    fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn sweep(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, log| !self.policy.should_evict(&log.meta(), now));
        let mut evicted = before.saturating_sub(self.sessions.len());

        if let Some(max) = self.max_sessions {
            evicted += self.enforce_capacity(max);
        }

        if evicted > 0 {
            info!(evicted, remaining = self.sessions.len(), "Evicted chat sessions");
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::TimeDelta;
    use menubot_types::chat::TurnRole;

    use crate::chat::eviction::IdleTtl;

    fn key(s: &str) -> SessionKey {
        SessionKey::new(s)
    }

    #[test]
    fn test_unseen_key_reads_empty_without_allocating() {
        let store = InMemorySessionStore::new();
        assert!(store.get_history(&key("nobody")).is_empty());
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_append_stamps_sequence_numbers() {
        let store = InMemorySessionStore::new();
        let k = key("a");
        store.append(&k, Turn::user("hi"));
        store.append_pair(&k, Turn::user("burger?"), Turn::assistant("yes"));

        let history = store.get_history(&k);
        let seqs: Vec<u64> = history.iter().map(|t| t.sequence_number).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(history[1].role, TurnRole::User);
        assert_eq!(history[2].role, TurnRole::Assistant);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_sessions_are_isolated_by_key() {
        let store = InMemorySessionStore::new();
        store.append_pair(&key("a"), Turn::user("1"), Turn::assistant("2"));
        store.append_pair(&key("b"), Turn::user("3"), Turn::assistant("4"));

        assert_eq!(store.get_history(&key("a"))[0].text, "1");
        assert_eq!(store.get_history(&key("b"))[0].text, "3");
        assert_eq!(store.get_history(&key("b"))[0].sequence_number, 0);
    }

    #[test]
    fn test_concurrent_pairs_never_interleave() {
        let store = Arc::new(InMemorySessionStore::new());
        let k = key("shared");

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                let k = k.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let tag = format!("{worker}-{i}");
                        store.append_pair(
                            &k,
                            Turn::user(format!("q{tag}")),
                            Turn::assistant(format!("a{tag}")),
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = store.get_history(&k);
        assert_eq!(history.len(), 8 * 50 * 2);
        for (index, turn) in history.iter().enumerate() {
            assert_eq!(turn.sequence_number, index as u64);
        }
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, TurnRole::User);
            assert_eq!(pair[1].role, TurnRole::Assistant);
            assert_eq!(&pair[0].text[1..], &pair[1].text[1..]);
        }
    }

    #[test]
    fn test_default_store_sweep_keeps_everything() {
        let store = InMemorySessionStore::new();
        store.append(&key("a"), Turn::user("hi"));
        let far_future = Utc::now() + TimeDelta::days(3650);
        assert_eq!(store.sweep(far_future), 0);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_idle_ttl_sweep_removes_only_idle_sessions() {
        let store =
            InMemorySessionStore::with_policy(Box::new(IdleTtl::new(Duration::from_secs(60))), None);
        store.append(&key("old"), Turn::user("hi"));
        store.append(&key("fresh"), Turn::user("hi"));

        // Sweep as if 30s have passed: nothing is idle yet.
        assert_eq!(store.sweep(Utc::now() + TimeDelta::seconds(30)), 0);

        // Sweep as if 2 minutes have passed: both idle.
        assert_eq!(store.sweep(Utc::now() + TimeDelta::seconds(120)), 2);
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn test_capacity_bound_drops_least_recently_active() {
        let store = InMemorySessionStore::with_policy(Box::new(NoEviction), Some(2));
        store.append(&key("first"), Turn::user("1"));
        std::thread::sleep(Duration::from_millis(5));
        store.append(&key("second"), Turn::user("2"));
        std::thread::sleep(Duration::from_millis(5));
        store.append(&key("third"), Turn::user("3"));

        assert_eq!(store.sweep(Utc::now()), 1);
        assert!(store.get_history(&key("first")).is_empty());
        assert_eq!(store.get_history(&key("second")).len(), 1);
        assert_eq!(store.get_history(&key("third")).len(), 1);
    }
}
