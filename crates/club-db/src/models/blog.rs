//! Blog database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for blogs table
///
/// Upvotes live in the blog_upvotes join table and are loaded separately.
#[derive(Debug, Clone, FromRow)]
pub struct BlogModel {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: i64,
    pub tags: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
