//! Test fixtures and data generators
//!
//! Provides reusable test data and response shapes for integration
//! tests.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// An identity-provider persona: subject plus profile fields
#[derive(Debug, Clone)]
pub struct Persona {
    pub subject: String,
    pub email: String,
    pub name: String,
}

impl Persona {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            subject: format!("idp-test-{suffix}"),
            email: format!("student{suffix}@university.edu"),
            name: format!("Student {suffix}"),
        }
    }

    /// Mint a bearer token for this persona
    pub fn token(&self) -> String {
        crate::helpers::mint_token(&self.subject, &self.email, &self.name)
    }
}

/// Membership application request
#[derive(Debug, Serialize)]
pub struct SubmitApplicationRequest {
    pub name: String,
    pub email: String,
    pub domain: String,
    pub branch: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_role: Option<String>,
}

impl SubmitApplicationRequest {
    pub fn for_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            email: persona.email.clone(),
            domain: "TECHNICAL".to_string(),
            branch: "Computer Science".to_string(),
            year: 2,
            desired_role: None,
        }
    }
}

/// Blog creation request
#[derive(Debug, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreateBlogRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Post Number {suffix}"),
            content: "A post long enough to be worth moderating.".to_string(),
            summary: None,
            tags: Some(vec!["testing".to_string()]),
        }
    }
}

/// Event creation request
#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub starts_at: chrono::DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<chrono::DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl CreateEventRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        let starts_at = Utc::now() + Duration::days(7);
        Self {
            title: format!("Workshop {suffix}"),
            description: "Hands-on session.".to_string(),
            location: Some("Lab 3".to_string()),
            starts_at,
            ends_at: Some(starts_at + Duration::hours(2)),
            capacity: None,
        }
    }
}

/// Success envelope wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// Paginated envelope wrapper
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Current user payload
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub subject: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub member_id: Option<String>,
}

/// Application payload
#[derive(Debug, Deserialize)]
pub struct ApplicationBody {
    pub id: String,
    pub status: String,
    pub desired_role: String,
    pub domain: String,
}

/// Blog payload
#[derive(Debug, Deserialize)]
pub struct BlogBody {
    pub id: String,
    pub slug: String,
    pub status: String,
    pub upvotes: i64,
}

/// Upvote toggle payload
#[derive(Debug, Deserialize)]
pub struct UpvoteBody {
    pub upvoted: bool,
    pub upvotes: i64,
}

/// Event payload
#[derive(Debug, Deserialize)]
pub struct EventBody {
    pub id: String,
    pub title: String,
    pub registered_count: i64,
    pub registered: Option<bool>,
}
