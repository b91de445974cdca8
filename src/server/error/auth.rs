use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User not found in session")]
    UserNotInSession,

    /// Session refers to a user that no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email and password pair did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but has been disabled by an admin.
    ///
    /// Results in a 403 Forbidden response.
    #[error("User {0} is disabled")]
    AccountDisabled(i32),

    /// User lacks a required permission.
    ///
    /// The second field is a server-side description of what was attempted.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Hashing or parsing a stored password hash failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` → 401 Unauthorized
/// - `AccountDisabled` / `AccessDenied` → 403 Forbidden
/// - `PasswordHash` → 500 Internal Server Error
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::AccountDisabled(_) => (StatusCode::FORBIDDEN, "Account is disabled"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied"),
            Self::PasswordHash(ref detail) => {
                tracing::error!("Password hashing failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
