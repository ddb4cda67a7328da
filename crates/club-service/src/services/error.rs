//! Error type shared by every service.

use club_common::AppError;
use club_core::DomainError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Missing required permission: {permission}")]
    PermissionDenied { permission: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::App(e) => e.status_code(),
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_authorization() => 403,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(_) => 500,
            Self::NotFound { .. } => 404,
            Self::PermissionDenied { .. } => 403,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "MISSING_PERMISSIONS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::App(e) => e,
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::PermissionDenied { .. } => AppError::InsufficientPermissions,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::Snowflake;

    #[test]
    fn not_found_carries_resource_and_id() {
        let err = ServiceError::not_found("Member", "123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Member not found: 123");
    }

    #[test]
    fn permission_denials_are_forbidden() {
        let err = ServiceError::permission_denied("REVIEW_APPLICATIONS");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "MISSING_PERMISSIONS");
        assert!(err.to_string().contains("REVIEW_APPLICATIONS"));
    }

    #[test]
    fn domain_conflicts_keep_their_code() {
        let err = ServiceError::from(DomainError::AlreadyReviewed(Snowflake::new(7)));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_REVIEWED");
    }

    #[test]
    fn upvoting_an_unpublished_blog_is_a_conflict() {
        let err = ServiceError::from(DomainError::BlogNotPublished);
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "BLOG_NOT_PUBLISHED");
    }

    #[test]
    fn lowers_into_app_error() {
        let app_err: AppError = ServiceError::not_found("Blog", "456").into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::permission_denied("MANAGE_EVENTS").into();
        assert_eq!(app_err.status_code(), 403);
    }
}
