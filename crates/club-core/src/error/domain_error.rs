//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("Application not found: {0}")]
    ApplicationNotFound(Snowflake),

    #[error("Blog not found: {0}")]
    BlogNotFound(Snowflake),

    #[error("Blog not found: {0}")]
    BlogSlugNotFound(String),

    #[error("Bug not found: {0}")]
    BugNotFound(Snowflake),

    #[error("Event not found: {0}")]
    EventNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Email domain not allowed: {0}")]
    EmailDomainNotAllowed(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(String),

    #[error("Not the resource owner")]
    NotResourceOwner,

    #[error("Cannot assign a role above your own")]
    CannotAssignHigherRole,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Application already reviewed: {0}")]
    AlreadyReviewed(Snowflake),

    #[error("A pending application already exists for this user")]
    ApplicationPending,

    #[error("Already a member of the club")]
    AlreadyMember,

    #[error("Already registered for event: {0}")]
    AlreadyRegistered(Snowflake),

    #[error("Blog slug already in use: {0}")]
    SlugExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Event is at capacity: {0}")]
    EventFull(Snowflake),

    #[error("Blog is not approved for public viewing")]
    BlogNotPublished,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::BlogNotFound(_) | Self::BlogSlugNotFound(_) => "UNKNOWN_BLOG",
            Self::BugNotFound(_) => "UNKNOWN_BUG",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailDomainNotAllowed(_) => "EMAIL_DOMAIN_NOT_ALLOWED",
            Self::UnknownDomain(_) => "UNKNOWN_CLUB_DOMAIN",

            // Authorization
            Self::MissingPermission(_) => "MISSING_PERMISSIONS",
            Self::NotResourceOwner => "NOT_RESOURCE_OWNER",
            Self::CannotAssignHigherRole => "CANNOT_ASSIGN_HIGHER_ROLE",

            // Conflict
            Self::AlreadyReviewed(_) => "ALREADY_REVIEWED",
            Self::ApplicationPending => "APPLICATION_PENDING",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            Self::SlugExists(_) => "SLUG_EXISTS",

            // Business Rules
            Self::EventFull(_) => "EVENT_FULL",
            Self::BlogNotPublished => "BLOG_NOT_PUBLISHED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::MemberNotFound(_)
                | Self::ApplicationNotFound(_)
                | Self::BlogNotFound(_)
                | Self::BlogSlugNotFound(_)
                | Self::BugNotFound(_)
                | Self::EventNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::EmailDomainNotAllowed(_)
                | Self::UnknownDomain(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::MissingPermission(_) | Self::NotResourceOwner | Self::CannotAssignHigherRole
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyReviewed(_)
                | Self::ApplicationPending
                | Self::AlreadyMember
                | Self::AlreadyRegistered(_)
                | Self::SlugExists(_)
                | Self::EventFull(_)
                | Self::BlogNotPublished
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(DomainError::UserNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::InvalidEmail.is_validation());
        assert!(DomainError::NotResourceOwner.is_authorization());
        assert!(DomainError::AlreadyMember.is_conflict());
        assert!(DomainError::BlogNotPublished.is_conflict());
        assert!(!DomainError::DatabaseError("boom".into()).is_conflict());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::AlreadyReviewed(Snowflake::new(1)).code(),
            "ALREADY_REVIEWED"
        );
        assert_eq!(
            DomainError::MissingPermission("MANAGE_MEMBERS".into()).code(),
            "MISSING_PERMISSIONS"
        );
    }
}
