// crates/gatehouse-lib/src/middleware/mod.rs

//! Request middleware: the authentication gate in front of protected routes.
use crate::cookie::session_token_from;
use crate::error::AppError;
use crate::store::UserStore;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// The authenticated identity made available to gated handlers.
#[derive(Clone)]
pub struct CurrentUser {
    /// Username the session resolves to
    pub username: String,
    /// Token the request carried, so handlers like logout can revoke it
    pub token: String,
}

/// Authentication gate.
///
/// Resolves the request's session cookie against the registry. A resolvable
/// token admits the request and injects [`CurrentUser`] for downstream
/// handlers; a missing, unknown or revoked token rejects it with
/// [`AppError::NotAuthenticated`], which renders as a redirect to the login
/// surface. No other side effects, composable in front of any route.
pub async fn require_auth<S: UserStore + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session_token_from(request.headers()) else {
        return Err(AppError::NotAuthenticated);
    };

    let Some(session) = state.sessions.resolve(&token).await else {
        return Err(AppError::NotAuthenticated);
    };

    request.extensions_mut().insert(CurrentUser {
        username: session.username,
        token,
    });

    Ok(next.run(request).await)
}
