//! Bug database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for bugs table
#[derive(Debug, Clone, FromRow)]
pub struct BugModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub area: Option<String>,
    pub priority: String,
    pub status: String,
    pub reporter_id: i64,
    pub assignee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
