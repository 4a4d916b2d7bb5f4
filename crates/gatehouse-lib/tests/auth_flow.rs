// crates/gatehouse-lib/tests/auth_flow.rs
//! End-to-end login flow through the router.
use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    Router,
};
use gatehouse_lib::{
    config::Settings,
    router::create_router,
    store::{FlatFileUserStore, UserStore},
    AppState,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = tempdir().unwrap();
    let store = FlatFileUserStore::open(dir.path()).unwrap();
    store.create_user("alice", "s3cret").await.unwrap();

    let state = Arc::new(AppState::new(store, Settings::default()));
    (create_router(state), dir)
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={password}"
        )))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Pull the `session_token=...` pair out of a Set-Cookie header.
fn session_cookie_pair(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session_token="));
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_login_logout_round_trip() {
    let (app, _dir) = test_app().await;

    // login succeeds and yields a usable session cookie
    let response = app
        .clone()
        .oneshot(login_request("alice", "s3cret"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/dashboard");

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));
    let cookie = session_cookie_pair(&response);

    // a request carrying that token is admitted through the gate
    let response = app
        .clone()
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("alice"));

    // logout clears the cookie and invalidates the token
    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");
    let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // replaying the revoked token is rejected
    let response = app
        .oneshot(get_with_cookie("/dashboard", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/?error=Please+login"
    );
}

#[tokio::test]
async fn test_wrong_password_rejected_without_session() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(login_request("alice", "wrongpass"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/?error=Invalid+credentials"
    );
    // no token was issued
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_unknown_user_rejected_like_wrong_password() {
    let (app, _dir) = test_app().await;

    let response = app
        .oneshot(login_request("mallory", "anything"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/?error=Invalid+credentials"
    );
}

#[tokio::test]
async fn test_gate_rejects_missing_and_bogus_tokens() {
    let (app, _dir) = test_app().await;

    // no cookie at all
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/?error=Please+login"
    );

    // a cookie that was never issued
    let response = app
        .oneshot(get_with_cookie("/dashboard", "session_token=forged"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/?error=Please+login"
    );
}

#[tokio::test]
async fn test_login_page_renders_error_reason() {
    let (app, _dir) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/?error=Invalid+credentials")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("Invalid credentials"));

    // without a reason the page still renders
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
