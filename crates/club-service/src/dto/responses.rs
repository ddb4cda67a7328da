//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.
//! Every endpoint wraps its payload in the `{ "success": ..., ... }` envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Success envelope wrapping a response payload
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response with limit/offset pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            success: true,
            data,
            pagination: PaginationMeta {
                total,
                limit,
                offset,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Total matching rows
    pub total: i64,
    /// Page size limit used
    pub limit: i64,
    /// Offset into the result set
    pub offset: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// User response for admin listings
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub subject: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: String,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member directory entry
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub role: String,
    pub domain: String,
    pub year: i32,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Application Responses
// ============================================================================

/// Review details on a decided application
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub reviewer_id: String,
    pub reviewed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Membership application
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub user_id: String,
    pub applicant_name: String,
    pub email: String,
    pub desired_role: String,
    pub domain: String,
    pub branch: String,
    pub year: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Blog Responses
// ============================================================================

/// Blog post
#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub author_id: String,
    pub tags: Vec<String>,
    pub status: String,
    pub upvotes: i64,
    /// Whether the requesting user has upvoted; absent for anonymous readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvoted: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of toggling an upvote
#[derive(Debug, Clone, Serialize)]
pub struct UpvoteResponse {
    pub upvoted: bool,
    pub upvotes: i64,
}

// ============================================================================
// Bug Responses
// ============================================================================

/// Bug report
#[derive(Debug, Clone, Serialize)]
pub struct BugResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub priority: String,
    pub status: String,
    pub reporter_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Event Responses
// ============================================================================

/// A single event registration
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub user_id: String,
    pub registered_at: DateTime<Utc>,
}

/// Club event
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub created_by: String,
    pub registered_count: i64,
    /// Whether the requesting user is registered; absent for anonymous readers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness probe response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "degraded" },
            database: if database_healthy { "up" } else { "down" },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::new("hello")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "hello");
    }

    #[test]
    fn paginated_response_carries_meta() {
        let json = serde_json::to_value(PaginatedResponse::new(vec![1, 2, 3], 42, 3, 6)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["pagination"]["total"], 42);
        assert_eq!(json["pagination"]["limit"], 3);
        assert_eq!(json["pagination"]["offset"], 6);
    }

    #[test]
    fn readiness_reflects_database_health() {
        let json = serde_json::to_value(ReadinessResponse::ready(false)).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["database"], "down");
    }
}
