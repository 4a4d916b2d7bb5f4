// crates/gatehouse-lib/src/error.rs

//! Central error type + Axum integration.
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

/// Application error types.
///
/// `InvalidCredentials` and `NotAuthenticated` are expected outcomes of normal
/// traffic, not faults; everything else is an infrastructure failure that must
/// never leak detail to the browser.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Store(String),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    NotAuthenticated,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Whether this is an expected auth outcome rather than a fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials | AppError::NotAuthenticated
        )
    }

    /// The human-readable reason carried on the redirect back to the login
    /// surface. Infrastructure failures all collapse to a generic message.
    pub fn redirect_reason(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::NotAuthenticated => "Please login",
            _ => "Internal server error",
        }
    }

    /// Target of the redirect rendered for this error.
    pub fn redirect_target(&self) -> String {
        format!("/?error={}", self.redirect_reason().replace(' ', "+"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_expected() {
            tracing::info!(reason = %self, "request rejected");
        } else {
            // detail stays in the logs; the browser only sees a generic reason
            tracing::error!(error = %self, "request failed");
        }

        Redirect::to(&self.redirect_target()).into_response()
    }
}
