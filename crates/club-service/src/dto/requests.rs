//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Application Requests
// ============================================================================

/// Submit a membership application
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitApplicationRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Club domain the applicant wants to join (e.g. "TECHNICAL")
    pub domain: String,

    #[validate(length(min = 1, max = 100, message = "Branch must be 1-100 characters"))]
    pub branch: String,

    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year: i32,

    /// Requested role; defaults to MEMBER when omitted
    pub desired_role: Option<String>,
}

/// Reviewer decision payload (approve or reject)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewApplicationRequest {
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Directly add a member (admin only, bypasses the application flow)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub role: Option<String>,

    pub domain: String,

    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year: i32,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Update a member record
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: Option<String>,

    pub role: Option<String>,

    pub domain: Option<String>,

    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year: Option<i32>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    /// ACTIVE, INACTIVE, or ALUMNI
    pub status: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Change a user's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PromoteUserRequest {
    pub role: String,
}

// ============================================================================
// Blog Requests
// ============================================================================

/// Create a blog post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 50000, message = "Content must be 1-50000 characters"))]
    pub content: String,

    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    pub summary: Option<String>,

    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Option<Vec<String>>,
}

/// Update a blog post (author only; resets moderation status)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 50000, message = "Content must be 1-50000 characters"))]
    pub content: Option<String>,

    #[validate(length(max = 500, message = "Summary must be at most 500 characters"))]
    pub summary: Option<String>,

    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Bug Requests
// ============================================================================

/// Report a bug
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBugRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,

    #[validate(length(max = 100, message = "Area must be at most 100 characters"))]
    pub area: Option<String>,

    /// LOW, MEDIUM, HIGH, or CRITICAL; defaults to MEDIUM
    pub priority: Option<String>,
}

/// Triage a bug (status, priority, assignment)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBugRequest {
    /// OPEN, IN_PROGRESS, RESOLVED, or CLOSED
    pub status: Option<String>,

    pub priority: Option<String>,

    /// User ID to assign, or null to unassign
    pub assignee_id: Option<String>,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create an event
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub starts_at: chrono::DateTime<chrono::Utc>,

    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,

    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<u32>,
}

/// Update an event
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Description must be 1-10000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,

    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,

    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_application_validation() {
        let request = SubmitApplicationRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            domain: "TECHNICAL".to_string(),
            branch: "CSE".to_string(),
            year: 9,
            desired_role: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("year"));
    }

    #[test]
    fn test_valid_application_passes() {
        let request = SubmitApplicationRequest {
            name: "Alice Kumar".to_string(),
            email: "alice@university.edu".to_string(),
            domain: "DESIGN".to_string(),
            branch: "ECE".to_string(),
            year: 2,
            desired_role: None,
        };
        assert!(request.validate().is_ok());
    }
}
