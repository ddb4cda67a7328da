//! Application entity - a membership request with a one-shot review
//!
//! State machine: PENDING -> {APPROVED, REJECTED}. Both outcomes are terminal;
//! the transition methods reject a second review by construction instead of
//! relying on callers to compare status strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{ClubDomain, Role, Snowflake};

/// Application review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Review record attached once an application reaches a terminal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub reviewer_id: Snowflake,
    pub reviewed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Membership application entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub applicant_name: String,
    pub email: String,
    pub desired_role: Role,
    pub domain: ClubDomain,
    pub branch: String,
    pub year: i32,
    pub status: ApplicationStatus,
    pub review: Option<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Create a new pending application
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        applicant_name: String,
        email: String,
        desired_role: Role,
        domain: ClubDomain,
        branch: String,
        year: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            applicant_name,
            email,
            desired_role,
            domain,
            branch,
            year,
            status: ApplicationStatus::Pending,
            review: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Transition PENDING -> APPROVED, recording the reviewer
    ///
    /// # Errors
    /// Returns `AlreadyReviewed` if the application is already terminal.
    pub fn approve(&mut self, reviewer_id: Snowflake, notes: Option<String>) -> Result<(), DomainError> {
        self.transition(ApplicationStatus::Approved, reviewer_id, notes)
    }

    /// Transition PENDING -> REJECTED, recording the reviewer
    ///
    /// # Errors
    /// Returns `AlreadyReviewed` if the application is already terminal.
    pub fn reject(&mut self, reviewer_id: Snowflake, notes: Option<String>) -> Result<(), DomainError> {
        self.transition(ApplicationStatus::Rejected, reviewer_id, notes)
    }

    fn transition(
        &mut self,
        target: ApplicationStatus,
        reviewer_id: Snowflake,
        notes: Option<String>,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::AlreadyReviewed(self.id));
        }
        let now = Utc::now();
        self.status = target;
        self.review = Some(Review {
            reviewer_id,
            reviewed_at: now,
            notes,
        });
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_application() -> Application {
        Application::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "Alice".to_string(),
            "alice@univ.edu".to_string(),
            Role::Member,
            ClubDomain::Technical,
            "CSE".to_string(),
            2,
        )
    }

    #[test]
    fn test_new_application_is_pending() {
        let app = pending_application();
        assert!(app.is_pending());
        assert!(app.review.is_none());
    }

    #[test]
    fn test_approve_records_reviewer() {
        let mut app = pending_application();
        app.approve(Snowflake::new(7), None).unwrap();

        assert_eq!(app.status, ApplicationStatus::Approved);
        let review = app.review.expect("review recorded");
        assert_eq!(review.reviewer_id, Snowflake::new(7));
    }

    #[test]
    fn test_second_review_is_rejected() {
        let mut app = pending_application();
        app.approve(Snowflake::new(7), None).unwrap();

        let err = app.approve(Snowflake::new(8), None).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyReviewed(_)));

        let err = app.reject(Snowflake::new(8), None).unwrap_err();
        assert!(matches!(err, DomainError::AlreadyReviewed(_)));

        // First review untouched
        assert_eq!(app.review.unwrap().reviewer_id, Snowflake::new(7));
    }

    #[test]
    fn test_reject_with_notes() {
        let mut app = pending_application();
        app.reject(Snowflake::new(7), Some("incomplete".to_string())).unwrap();

        assert_eq!(app.status, ApplicationStatus::Rejected);
        assert_eq!(app.review.unwrap().notes.as_deref(), Some("incomplete"));
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("DRAFT"), None);
    }
}
