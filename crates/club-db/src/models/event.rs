//! Event database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for event_registrations table
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationModel {
    pub event_id: i64,
    pub user_id: i64,
    pub registered_at: DateTime<Utc>,
}
