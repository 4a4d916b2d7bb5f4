// ============================
// crates/gatehouse-lib/src/router.rs
// ============================
//! HTTP router wiring.
use crate::handlers::auth;
use crate::middleware::require_auth;
use crate::store::UserStore;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router: public login surface plus the gated routes.
pub fn create_router<S: UserStore + Clone + Send + Sync + 'static>(
    state: Arc<AppState<S>>,
) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(auth::dashboard))
        .route("/logout", get(auth::logout::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<S>,
        ));

    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", post(auth::login::<S>))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
