//! Per-session navigation contexts, keyed by an opaque cookie id.
//!
//! Each browser session owns an isolated [`NavigationState`]; nothing else
//! is kept between requests. The store lives on the server's request loop
//! and is only touched from that thread.
use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;

use super::{NavigationState, Page};

/// Default idle lifetime of a session (seconds).
const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 3600;

/// Default upper bound on concurrently tracked sessions.
const DEFAULT_MAX_SESSIONS: usize = 1024;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub navigation: NavigationState,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            navigation: NavigationState::default(),
            last_seen: now,
        }
    }

    pub fn page(&self) -> Page {
        self.navigation.current()
    }

    pub fn navigate(&mut self, page: Page) {
        self.navigation.navigate(page);
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

pub struct SessionStore {
    sessions: HashMap<String, Session>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(idle_timeout_secs: i64, max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            idle_timeout: Duration::seconds(idle_timeout_secs.max(1)),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Return the session for `id`, creating a fresh one (on the Dashboard)
    /// when the id is missing, unknown or expired.
    ///
    /// Callers detect a new session by comparing the returned id with the
    /// one they passed in.
    pub fn touch(&mut self, id: Option<&str>, now: DateTime<Utc>) -> &mut Session {
        self.expire(now);

        let key = match id {
            Some(id) if self.sessions.contains_key(id) => id.to_string(),
            _ => {
                self.evict_to_fit();
                new_session_id()
            }
        };

        let session = self
            .sessions
            .entry(key.clone())
            .or_insert_with(|| Session::new(key, now));
        session.last_seen = now;
        session
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than the configured timeout.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        let timeout = self.idle_timeout;
        self.sessions.retain(|_, s| now - s.last_seen <= timeout);
    }

    /// Make room for one more session by evicting the least recently seen.
    fn evict_to_fit(&mut self) {
        while self.sessions.len() >= self.max_sessions {
            let Some(oldest) = self
                .sessions
                .values()
                .min_by_key(|s| s.last_seen)
                .map(|s| s.id.clone())
            else {
                break;
            };
            self.sessions.remove(&oldest);
        }
    }
}

/// 128 random bits, hex encoded.
fn new_session_id() -> String {
    let bits: u128 = rand::thread_rng().r#gen();
    format!("{bits:032x}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_on_dashboard() {
        let mut store = SessionStore::default();
        let session = store.touch(None, Utc::now());
        assert_eq!(session.page(), Page::Dashboard);
        assert_eq!(session.id.len(), 32);
    }

    #[test]
    fn known_id_returns_same_session() {
        let mut store = SessionStore::default();
        let now = Utc::now();
        let id = {
            let s = store.touch(None, now);
            s.navigate(Page::AmlKyc);
            s.id.clone()
        };
        let again = store.touch(Some(&id), now);
        assert_eq!(again.id, id);
        assert_eq!(again.page(), Page::AmlKyc);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_id_gets_fresh_session() {
        let mut store = SessionStore::default();
        let session = store.touch(Some("not-a-session"), Utc::now());
        assert_ne!(session.id, "not-a-session");
        assert_eq!(session.page(), Page::Dashboard);
    }

    #[test]
    fn sessions_are_isolated() {
        let mut store = SessionStore::default();
        let now = Utc::now();
        let a = store.touch(None, now).id.clone();
        let b = store.touch(None, now).id.clone();
        store.touch(Some(&a), now).navigate(Page::FundOnboarding);
        assert_eq!(store.get(&a).unwrap().page(), Page::FundOnboarding);
        assert_eq!(store.get(&b).unwrap().page(), Page::Dashboard);
    }

    #[test]
    fn idle_sessions_expire() {
        let mut store = SessionStore::new(60, 10);
        let start = Utc::now();
        let id = store.touch(None, start).id.clone();
        let later = start + Duration::seconds(61);
        let session = store.touch(Some(&id), later);
        assert_ne!(session.id, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn oldest_session_is_evicted_at_capacity() {
        let mut store = SessionStore::new(3600, 2);
        let t0 = Utc::now();
        let first = store.touch(None, t0).id.clone();
        let second = store.touch(None, t0 + Duration::seconds(1)).id.clone();
        store.touch(None, t0 + Duration::seconds(2));
        assert_eq!(store.len(), 2);
        assert!(store.get(&first).is_none());
        assert!(store.get(&second).is_some());
    }
}
