//! Application-wide error type.
//!
//! Everything that can fail between the HTTP layer and the database funnels
//! into [`AppError`], which knows its own HTTP status and stable error code.

use club_core::DomainError;
use serde::Serialize;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// No identity secret is configured; authenticated routes stay closed
    /// while the rest of the server keeps running.
    #[error("Authentication is not configured on this server")]
    AuthDisabled,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidToken | Self::TokenExpired | Self::AuthDisabled => 401,
            Self::InsufficientPermissions => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) | Self::Config(_) => {
                500
            }
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Stable machine-readable code for the error envelope.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::AuthDisabled => "AUTH_DISABLED",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

/// Body of the `error` field in API responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::Snowflake;

    #[test]
    fn auth_failures_are_unauthorized() {
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::AuthDisabled.status_code(), 401);
        assert_eq!(AppError::AuthDisabled.error_code(), "AUTH_DISABLED");
    }

    #[test]
    fn domain_errors_keep_their_own_codes() {
        let err = AppError::from(DomainError::AlreadyReviewed(Snowflake::new(1)));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_REVIEWED");

        let err = AppError::from(DomainError::MissingPermission("MANAGE_MEMBERS".into()));
        assert_eq!(err.status_code(), 403);

        let err = AppError::from(DomainError::BlogSlugNotFound("rust-intro".into()));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn client_and_server_split() {
        assert!(AppError::not_found("user").is_client_error());
        assert!(AppError::validation("bad input").is_client_error());
        assert!(AppError::Database("down".into()).is_server_error());
        assert!(!AppError::Database("down".into()).is_client_error());
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let body = ErrorResponse::from(AppError::not_found("user"));
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Resource not found: user");
        assert!(body.details.is_none());
    }
}
