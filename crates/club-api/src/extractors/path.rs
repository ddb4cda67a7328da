//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs and slugs from path parameters.

use club_core::Snowflake;

use crate::response::ApiError;

fn parse_id(raw: &str, label: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {label} format")))
}

/// Path parameters with user_id
#[derive(Debug, serde::Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    /// Parse user_id as Snowflake
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with member_id
#[derive(Debug, serde::Deserialize)]
pub struct MemberIdPath {
    pub member_id: String,
}

impl MemberIdPath {
    /// Parse member_id as Snowflake
    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }
}

/// Path parameters with application_id
#[derive(Debug, serde::Deserialize)]
pub struct ApplicationIdPath {
    pub application_id: String,
}

impl ApplicationIdPath {
    /// Parse application_id as Snowflake
    pub fn application_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.application_id, "application_id")
    }
}

/// Path parameters with blog_id
#[derive(Debug, serde::Deserialize)]
pub struct BlogIdPath {
    pub blog_id: String,
}

impl BlogIdPath {
    /// Parse blog_id as Snowflake
    pub fn blog_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.blog_id, "blog_id")
    }
}

/// Path parameters with bug_id
#[derive(Debug, serde::Deserialize)]
pub struct BugIdPath {
    pub bug_id: String,
}

impl BugIdPath {
    /// Parse bug_id as Snowflake
    pub fn bug_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.bug_id, "bug_id")
    }
}

/// Path parameters with event_id
#[derive(Debug, serde::Deserialize)]
pub struct EventIdPath {
    pub event_id: String,
}

impl EventIdPath {
    /// Parse event_id as Snowflake
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }
}

/// Path parameters for a blog slug
#[derive(Debug, serde::Deserialize)]
pub struct SlugPath {
    pub slug: String,
}

impl SlugPath {
    /// Get the slug
    pub fn slug(&self) -> &str {
        &self.slug
    }
}
