// ============================
// crates/gatehouse-lib/src/handlers/auth.rs
// ============================
//! Login, logout and the protected landing page.
//!
//! Handlers return structured [`AppError`] outcomes; the error type's axum
//! integration is the single place that turns them into redirects, so wrong
//! credentials and infrastructure faults stay distinguishable in here while
//! the browser only ever sees a generic reason.
use crate::cookie::{clear_session_cookie, session_cookie};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::store::UserStore;
use crate::AppState;
use axum::{
    extract::{Extension, Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use zeroize::Zeroize;

/// Login form submission
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Query parameters on the login surface
#[derive(Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// `GET /` — the login surface, with an optional error reason to display.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let notice = match query.error {
        Some(reason) => format!(r#"<p class="error">{}</p>"#, escape_html(&reason)),
        None => String::new(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Login</title></head>
<body>
  <h1>Login</h1>
  {notice}
  <form method="post" action="/login">
    <label>Username <input type="text" name="username" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Login</button>
  </form>
</body>
</html>"#
    ))
}

/// `POST /login` — verify credentials and open a session.
///
/// On success the issued token is set as the session cookie and the browser
/// is sent to the dashboard. Wrong username and wrong password are
/// deliberately indistinguishable to the caller.
pub async fn login<S: UserStore + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let LoginForm {
        username,
        mut password,
    } = form;

    tracing::info!(%username, "login attempt");

    let authenticated = state.store.authenticate(&username, &password).await;
    password.zeroize();

    match authenticated {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!(%username, "failed login attempt");
            return Err(AppError::InvalidCredentials);
        }
        Err(err) => return Err(err),
    }

    let token = state.sessions.issue(&username).await;
    tracing::info!(%username, "successful login");

    Ok((
        AppendHeaders([(
            SET_COOKIE,
            session_cookie(&token, state.settings.cookie_max_age_secs),
        )]),
        Redirect::to("/dashboard"),
    )
        .into_response())
}

/// `GET /dashboard` — protected landing page.
pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> Html<String> {
    tracing::info!(username = %user.username, "dashboard access");

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Dashboard</title></head>
<body>
  <h1>Welcome, {}!</h1>
  <a href="/logout">Logout</a>
</body>
</html>"#,
        escape_html(&user.username)
    ))
}

/// `GET /logout` — revoke the carried session and clear the cookie.
pub async fn logout<S: UserStore + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<CurrentUser>,
) -> impl IntoResponse {
    state.sessions.revoke(&user.token).await;
    tracing::info!(username = %user.username, "logout");

    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
}

/// Minimal HTML escaping for text echoed back into a page.
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
