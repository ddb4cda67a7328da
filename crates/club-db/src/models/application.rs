//! Application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for applications table
///
/// Review columns are nullable as a group: either all three reviewer fields
/// are set (terminal application) or none are (pending).
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub user_id: i64,
    pub applicant_name: String,
    pub email: String,
    pub desired_role: String,
    pub domain: String,
    pub branch: String,
    pub year: i32,
    pub status: String,
    pub reviewer_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
