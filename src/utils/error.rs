//! Application error type and unified response structure.
//!
//! Error taxonomy:
//!
//! | Variant | Surface |
//! |------|------|
//! | Validation | 400 + user-facing message, no state change |
//! | InvalidCredentials | 401 + one fixed message for every failure mode |
//! | Unauthorized | 303 redirect to the login surface |
//! | NotFound | 303 redirect with a user-facing notice |
//! | Database / Internal | 500 + generic message, diagnostic log entry |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::repository::RepoError;

/// Path of the login surface; unauthenticated requests land here.
pub const LOGIN_PATH: &str = "/beheren";

/// One message for "no such user" and "wrong password" alike.
pub const INVALID_CREDENTIALS_MSG: &str = "Ongeldige gebruikersnaam of wachtwoord";

/// Unified JSON response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validatie mislukt: {0}")]
    Validation(String),

    #[error("{INVALID_CREDENTIALS_MSG}")]
    InvalidCredentials,

    #[error("Niet ingelogd")]
    Unauthorized,

    #[error("Niet gevonden: {0}")]
    NotFound(String),

    #[error("Databasefout: {0}")]
    Database(String),

    #[error("Interne fout: {0}")]
    Internal(String),
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Unified invalid-credentials error, preventing username enumeration.
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(AppResponse::<()>::error(msg)),
            )
                .into_response(),

            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(AppResponse::<()>::error(INVALID_CREDENTIALS_MSG)),
            )
                .into_response(),

            // Missing/expired session: back to the login form
            AppError::Unauthorized => Redirect::to(LOGIN_PATH).into_response(),

            // Missing entity or category: redirect home with a notice,
            // never a stack trace
            AppError::NotFound(msg) => {
                Redirect::to(&format!("/?melding={}", encode_notice(&msg))).into_response()
            }

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AppResponse::<()>::error("Er is een databasefout opgetreden")),
                )
                    .into_response()
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AppResponse::<()>::error("Er is een interne fout opgetreden")),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            // Image failures abort the enclosing write, same surface as a
            // storage failure
            RepoError::Image(msg) => AppError::Database(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        AppError::Validation(format!("Ongeldig formulier: {e}"))
    }
}

/// Percent-encoding for redirect notices. Everything outside the
/// unreserved set is encoded byte-wise, non-ASCII included; the result
/// must be a valid `Location` header value.
fn encode_notice(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len());
    for &b in msg.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
