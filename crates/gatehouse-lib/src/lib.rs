// ============================
// crates/gatehouse-lib/src/lib.rs
// ============================
//! Core functionality for the gatehouse login server: credential store,
//! session registry, authentication gate and the HTTP surface around them.

pub mod auth;
pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod store;

use crate::auth::SessionRegistry;
use crate::config::Settings;
use crate::store::UserStore;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers.
///
/// Constructed once by the composition root and passed by reference; the
/// session registry is the only mutable shared state and is internally
/// synchronized.
#[derive(Clone)]
pub struct AppState<S> {
    /// Credential store backend
    pub store: S,
    /// Session registry
    pub sessions: SessionRegistry,
    /// Application settings
    pub settings: Arc<Settings>,
}

impl<S: UserStore> AppState<S> {
    /// Create the application state from a store and settings.
    pub fn new(store: S, settings: Settings) -> Self {
        let ttl = (settings.session_ttl_secs > 0)
            .then(|| Duration::from_secs(settings.session_ttl_secs));

        Self {
            store,
            sessions: SessionRegistry::new(ttl),
            settings: Arc::new(settings),
        }
    }
}
