use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Which caller-side rule an `InvalidArgument` error broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    UnsupportedId,
    MissingFields,
    RoleOutOfRange,
    PasswordMismatch,
    InvalidTimeout,
    MalformedRequest,
}

impl Violation {
    pub fn as_str(self) -> &'static str {
        match self {
            Violation::UnsupportedId => "unsupported_id",
            Violation::MissingFields => "missing_fields",
            Violation::RoleOutOfRange => "role_out_of_range",
            Violation::PasswordMismatch => "password_mismatch",
            Violation::InvalidTimeout => "invalid_timeout",
            Violation::MalformedRequest => "malformed_request",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    InvalidArgument(Violation, String),
    NotFound(String),
    AlreadyExists(String),
    DeadlineExceeded(String),
    Unavailable(String),
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    pub fn invalid(violation: Violation, msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(violation, msg.into())
    }

    /// Machine-readable error kind, as sent in the `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(..) => "invalid_argument",
            AppError::NotFound(_) => "not_found",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::DeadlineExceeded(_) => "deadline_exceeded",
            AppError::Unavailable(_) => "unavailable",
            AppError::Internal(_) | AppError::Database(_) => "internal",
        }
    }

    pub fn violation(&self) -> Option<Violation> {
        match self {
            AppError::InvalidArgument(v, _) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidArgument(v, msg) => {
                write!(f, "Invalid Argument ({}): {msg}", v.as_str())
            }
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::AlreadyExists(msg) => write!(f, "Already Exists: {msg}"),
            AppError::DeadlineExceeded(msg) => write!(f, "Deadline Exceeded: {msg}"),
            AppError::Unavailable(msg) => write!(f, "Unavailable: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidArgument(_, msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::DeadlineExceeded(msg) => (StatusCode::GATEWAY_TIMEOUT, msg.clone()),
            AppError::Unavailable(msg) => {
                tracing::warn!("Storage unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service unavailable".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({
            "code": self.code(),
            "reason": self.violation().map(Violation::as_str),
            "error": message,
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::Unavailable(err.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid(Violation::MalformedRequest, rejection.body_text())
    }
}
