//! Event entity with attendee registrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// A single attendee registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: Snowflake,
    pub registered_at: DateTime<Utc>,
}

/// Club event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// None means unlimited seats
    pub capacity: Option<u32>,
    pub created_by: Snowflake,
    pub registrations: Vec<Registration>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        title: String,
        description: String,
        location: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        capacity: Option<u32>,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            location,
            starts_at,
            ends_at,
            capacity,
            created_by,
            registrations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    #[inline]
    pub fn is_registered(&self, user_id: Snowflake) -> bool {
        self.registrations.iter().any(|r| r.user_id == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|cap| self.registrations.len() >= cap as usize)
    }

    /// Register an attendee; a user can hold at most one registration
    pub fn register(&mut self, user_id: Snowflake) -> Result<(), DomainError> {
        if self.is_registered(user_id) {
            return Err(DomainError::AlreadyRegistered(self.id));
        }
        if self.is_full() {
            return Err(DomainError::EventFull(self.id));
        }
        self.registrations.push(Registration {
            user_id,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Remove an attendee's registration if present; returns whether one existed
    pub fn unregister(&mut self, user_id: Snowflake) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.user_id != user_id);
        self.registrations.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_event(capacity: Option<u32>) -> Event {
        Event::new(
            Snowflake::new(50),
            "Rust Workshop".to_string(),
            "Intro to ownership".to_string(),
            Some("Lab 3".to_string()),
            Utc::now() + Duration::days(7),
            None,
            capacity,
            Snowflake::new(1),
        )
    }

    #[test]
    fn test_register_then_duplicate_rejected() {
        let mut event = test_event(None);
        let user = Snowflake::new(9);

        event.register(user).unwrap();
        assert_eq!(event.registration_count(), 1);

        let err = event.register(user).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyRegistered(_)));
        assert_eq!(event.registration_count(), 1);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut event = test_event(Some(1));
        event.register(Snowflake::new(9)).unwrap();

        let err = event.register(Snowflake::new(10)).unwrap_err();
        assert!(matches!(err, DomainError::EventFull(_)));
    }

    #[test]
    fn test_unregister() {
        let mut event = test_event(None);
        let user = Snowflake::new(9);
        event.register(user).unwrap();

        assert!(event.unregister(user));
        assert!(!event.unregister(user));
        assert_eq!(event.registration_count(), 0);
    }

    #[test]
    fn test_unregister_frees_seat() {
        let mut event = test_event(Some(1));
        event.register(Snowflake::new(9)).unwrap();
        event.unregister(Snowflake::new(9));
        event.register(Snowflake::new(10)).unwrap();
    }
}
