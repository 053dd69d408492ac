//! In-memory cookie sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, thread_rng};
use sha2::{Digest, Sha256};

/// Default session lifetime.
const SESSION_TTL_DAYS: i64 = 2;

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Thread-safe session store keyed by opaque hex tokens.
///
/// Sessions live only in process memory; a restart logs everyone out,
/// which is acceptable for this application.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user and return its token.
    pub fn create(&self, username: &str) -> String {
        let token = new_token();
        let session = Session {
            username: username.to_string(),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        };
        let mut guard = self.inner.write().expect("session lock poisoned");
        guard.insert(token.clone(), session);
        token
    }

    /// Look up a live session; expired entries are pruned on access.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut guard = self.inner.write().expect("session lock poisoned");
        match guard.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.clone()),
            Some(_) => {
                guard.remove(token);
                None
            }
            None => None,
        }
    }

    /// Drop a session (logout). Unknown tokens are a no-op.
    pub fn remove(&self, token: &str) {
        let mut guard = self.inner.write().expect("session lock poisoned");
        guard.remove(token);
    }
}

/// Generate an opaque session token: hex(SHA-256(32 random bytes)).
fn new_token() -> String {
    let bytes: [u8; 32] = thread_rng().r#gen();
    let mut hasher: Sha256 = Digest::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
