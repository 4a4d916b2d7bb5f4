// ============================
// crates/gatehouse-lib/src/auth/session.rs
// ============================
//! Session token issuance, resolution and revocation.
use crate::auth::token::generate_token;
use metrics::{counter, gauge};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::sync::RwLock;

/// Interval between sweeps for expired sessions (when a TTL is configured)
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60); // 1 hour

/// A live authenticated session.
#[derive(Clone)]
pub struct Session {
    /// Identifier of the user this session belongs to
    pub username: String,
    /// When the session was issued
    pub created_at: SystemTime,
    /// When the session stops resolving; `None` means sessions never expire
    pub expires_at: Option<SystemTime>,
}

impl Session {
    fn is_expired(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expiry| now >= expiry)
    }
}

/// Registry mapping opaque session tokens to authenticated identities.
///
/// The only mutable shared state in the system. All reads and writes go
/// through the inner `RwLock`, so no caller can observe a partially applied
/// issue or revoke.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Option<Duration>,
}

impl SessionRegistry {
    /// Create a new registry. With `ttl = None` sessions live until revoked;
    /// with a TTL set, a background sweeper evicts expired entries.
    pub fn new(ttl: Option<Duration>) -> Self {
        let registry = SessionRegistry {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        if ttl.is_some() {
            let sweeper = registry.clone();
            tokio::spawn(async move {
                sweeper.sweep_task().await;
            });
        }

        registry
    }

    /// Issue a new session token for `username`.
    ///
    /// The 256-bit entropy budget makes collisions astronomically unlikely,
    /// but a colliding token would silently hijack a live session, so we
    /// regenerate instead of overwriting.
    pub async fn issue(&self, username: &str) -> String {
        let now = SystemTime::now();
        let session = Session {
            username: username.to_string(),
            created_at: now,
            expires_at: self.ttl.map(|ttl| now + ttl),
        };

        let mut sessions = self.sessions.write().await;
        let token = loop {
            let candidate = generate_token();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), session);

        counter!("session_issued_total").increment(1);
        gauge!("session_active").set(sessions.len() as f64);

        token
    }

    /// Resolve a token to its session, or `None` if the token is unknown,
    /// revoked or expired. Expired entries are evicted lazily here.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        let now = SystemTime::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }

        // expired: drop the read lock and evict
        let mut sessions = self.sessions.write().await;
        if sessions.remove(token).is_some() {
            counter!("session_expired_total").increment(1);
            gauge!("session_active").set(sessions.len() as f64);
        }
        None
    }

    /// Revoke a token. A no-op if the token is already absent.
    pub async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(token).is_some() {
            counter!("session_revoked_total").increment(1);
            gauge!("session_active").set(sessions.len() as f64);
        }
    }

    /// Number of currently live sessions.
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodic sweep that removes expired sessions.
    async fn sweep_task(&self) {
        loop {
            tokio::time::sleep(SWEEP_INTERVAL).await;

            let mut sessions = self.sessions.write().await;
            let now = SystemTime::now();
            let before = sessions.len();

            sessions.retain(|_, session| !session.is_expired(now));

            let removed = before - sessions.len();
            if removed > 0 {
                counter!("session_expired_total").increment(removed as u64);
                gauge!("session_active").set(sessions.len() as f64);
                tracing::debug!(removed, "swept expired sessions");
            }
        }
    }
}
