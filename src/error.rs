use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Machine-readable error payload embedded in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Application-level error type covering every failure the service surfaces.
///
/// Each variant maps to one HTTP status and a stable machine-readable code.
/// Click-ledger write failures are deliberately absent: they are logged by the
/// background worker and never reach a client.
#[derive(Debug)]
pub enum AppError {
    /// Destination is malformed or not an http/https URL. Rejected before any
    /// allocation attempt.
    InvalidUrl { message: String, details: Value },
    /// A user-supplied custom code fails shape validation.
    InvalidCodeFormat { message: String, details: Value },
    /// The safety scorer rejected the destination. Details carry the score
    /// and the reason.
    UnsafeUrl { message: String, details: Value },
    /// A custom code collided with an existing entry. User-correctable, no
    /// retry is attempted.
    CodeAlreadyExists { message: String, details: Value },
    /// The generator exhausted its collision-retry budget. Retryable.
    AllocationExhausted { message: String, details: Value },
    /// Unknown code on resolve/record/delete.
    NotFound { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }

    pub fn unsafe_url(reason: impl Into<String>, score: u8) -> Self {
        Self::UnsafeUrl {
            message: "URL failed security check".to_string(),
            details: json!({ "reason": reason.into(), "score": score }),
        }
    }

    pub fn code_already_exists(code: &str) -> Self {
        Self::CodeAlreadyExists {
            message: format!("Short code '{code}' already exists"),
            details: json!({ "code": code }),
        }
    }

    pub fn allocation_exhausted(attempts: u32) -> Self {
        Self::AllocationExhausted {
            message: "Failed to generate a unique short code".to_string(),
            details: json!({ "attempts": attempts }),
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::InvalidUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_url", message, details)
            }
            AppError::InvalidCodeFormat { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_code_format",
                message,
                details,
            ),
            AppError::UnsafeUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "unsafe_url", message, details)
            }
            AppError::CodeAlreadyExists { message, details } => (
                StatusCode::CONFLICT,
                "code_already_exists",
                message,
                details,
            ),
            AppError::AllocationExhausted { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "allocation_exhausted",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::InvalidUrl { message, details } => ("invalid_url", message, details),
            AppError::InvalidCodeFormat { message, details } => {
                ("invalid_code_format", message, details)
            }
            AppError::UnsafeUrl { message, details } => ("unsafe_url", message, details),
            AppError::CodeAlreadyExists { message, details } => {
                ("code_already_exists", message, details)
            }
            AppError::AllocationExhausted { message, details } => {
                ("allocation_exhausted", message, details)
            }
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_url(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}

/// Maps a raw sqlx error to an [`AppError`].
///
/// Unique-constraint violations are NOT translated here: the repositories that
/// rely on the constraint as a collision signal inspect the violation
/// themselves before falling back to this mapping.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::internal(
                "Unexpected unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::invalid_url("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::invalid_code_format("bad", json!({})),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unsafe_url("phishy", 30), StatusCode::BAD_REQUEST),
            (
                AppError::code_already_exists("short1"),
                StatusCode::CONFLICT,
            ),
            (
                AppError::allocation_exhausted(5),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::not_found("missing", json!({})),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::internal("boom", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_unsafe_url_carries_reason_and_score() {
        let err = AppError::unsafe_url("URL contains suspicious patterns", 35);
        let info = err.to_error_info();

        assert_eq!(info.code, "unsafe_url");
        assert_eq!(info.details["score"], 35);
        assert_eq!(info.details["reason"], "URL contains suspicious patterns");
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::code_already_exists("taken1");
        assert!(err.to_string().contains("code_already_exists"));
        assert!(err.to_string().contains("taken1"));
    }
}
