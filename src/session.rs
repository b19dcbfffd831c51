//! Server-held per-client sessions, keyed by a cookie-carried token.
//!
//! The session is an explicit value handed to handlers, not ambient state:
//! the store resolves a token to a [`Session`] snapshot, and mutation goes
//! back through the store. Records live in-process (single-instance
//! deployments only), partitioned by token, last-write-wins per token.

use axum_extra::extract::cookie::{Cookie, SameSite};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "bitality_session";

/// Sessions idle longer than this behave as if they were never created.
const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Identity attached to a session by a successful login. Holding one of
/// these is what "logged in" means, so an authenticated session always has
/// both a user id and a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

/// Snapshot of one client's session for the current request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: String,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }
}

#[derive(Debug, Clone)]
struct SessionRecord {
    user: Option<SessionUser>,
    created_at: Instant,
}

impl SessionRecord {
    fn fresh() -> Self {
        Self {
            user: None,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > SESSION_TTL
    }
}

/// In-process session store shared across handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionRecord>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mint a fresh anonymous session and return its token.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.lock().insert(token.clone(), SessionRecord::fresh());
        token
    }

    /// Resolve a token to its session. Expired records count as absent and
    /// are dropped on the way out.
    pub fn find(&self, token: &str) -> Option<Session> {
        let mut records = self.lock();
        match records.get(token) {
            Some(record) if record.is_expired() => {
                records.remove(token);
                None
            }
            Some(record) => Some(Session {
                token: token.to_string(),
                user: record.user.clone(),
            }),
            None => None,
        }
    }

    /// Attach an identity to a session (login). The record's clock restarts,
    /// so the TTL counts from authentication.
    pub fn login(&self, token: &str, user: SessionUser) {
        let mut records = self.lock();
        let record = records
            .entry(token.to_string())
            .or_insert_with(SessionRecord::fresh);
        record.user = Some(user);
        record.created_at = Instant::now();
    }

    /// Destroy a session outright (logout).
    pub fn destroy(&self, token: &str) {
        self.lock().remove(token);
    }

    #[cfg(test)]
    fn backdate(&self, token: &str, age: Duration) {
        if let Some(record) = self.lock().get_mut(token) {
            record.created_at = Instant::now() - age;
        }
    }
}

/// Cookie carrying the session token; HTTP-only so scripts never see it.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Cookie to hand to `CookieJar::remove` on logout; the path must match the
/// one the session cookie was set with.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_session_is_anonymous() {
        let store = SessionStore::new();
        let token = store.create();
        let session = store.find(&token).expect("session should exist");
        assert!(!session.logged_in());
        assert_eq!(session.username(), None);
        assert_eq!(session.token, token);
    }

    #[test]
    fn test_login_attaches_identity() {
        let store = SessionStore::new();
        let token = store.create();
        store.login(
            &token,
            SessionUser {
                id: 7,
                username: "maria".into(),
            },
        );

        let session = store.find(&token).expect("session should exist");
        assert!(session.logged_in());
        // Logged-in sessions always carry a complete identity.
        let user = session.user.expect("identity");
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "maria");
    }

    #[test]
    fn test_login_twice_is_last_write_wins() {
        let store = SessionStore::new();
        let token = store.create();
        store.login(
            &token,
            SessionUser {
                id: 1,
                username: "first".into(),
            },
        );
        store.login(
            &token,
            SessionUser {
                id: 2,
                username: "second".into(),
            },
        );

        let session = store.find(&token).expect("session should exist");
        assert_eq!(session.username(), Some("second"));
    }

    #[test]
    fn test_destroy_removes_session() {
        let store = SessionStore::new();
        let token = store.create();
        store.destroy(&token);
        assert!(store.find(&token).is_none());
    }

    #[test]
    fn test_expired_session_behaves_absent() {
        let store = SessionStore::new();
        let token = store.create();
        store.backdate(&token, SESSION_TTL + Duration::from_secs(1));
        assert!(store.find(&token).is_none());
        // And the record is gone, not just hidden.
        assert!(store.find(&token).is_none());
    }

    #[test]
    fn test_unknown_token_is_absent() {
        let store = SessionStore::new();
        assert!(store.find("no-such-token").is_none());
    }
}
