//! Member entity - a club membership record
//!
//! Distinct from the authentication-level User. Created either by approving an
//! Application (copying its requested role/domain) or directly by an admin for
//! historical/alumni records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Application;
use crate::value_objects::{ClubDomain, Role, Snowflake};

/// Membership status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Alumni,
}

impl MemberStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Alumni => "ALUMNI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "ALUMNI" => Some(Self::Alumni),
            _ => None,
        }
    }
}

/// Club member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Snowflake,
    pub name: String,
    pub role: Role,
    pub domain: ClubDomain,
    /// Academic year (1-based)
    pub year: i32,
    pub email: String,
    pub phone: Option<String>,
    pub status: MemberStatus,
    /// Back-link to the originating User, absent for direct admin entries
    pub user_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a member by direct admin entry
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        name: String,
        role: Role,
        domain: ClubDomain,
        year: i32,
        email: String,
        phone: Option<String>,
        status: MemberStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            role,
            domain,
            year,
            email,
            phone,
            status,
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an ACTIVE member from an approved application, copying the
    /// requested role and domain into the member record
    pub fn from_application(id: Snowflake, application: &Application) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: application.applicant_name.clone(),
            role: application.desired_role,
            domain: application.domain,
            year: application.year,
            email: application.email.clone(),
            phone: None,
            status: MemberStatus::Active,
            user_id: Some(application.user_id),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the member as alumni
    pub fn set_status(&mut self, status: MemberStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_application_copies_fields() {
        let app = Application::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "Alice".to_string(),
            "alice@univ.edu".to_string(),
            Role::Member,
            ClubDomain::Technical,
            "CSE".to_string(),
            2,
        );
        let member = Member::from_application(Snowflake::new(20), &app);

        assert_eq!(member.name, "Alice");
        assert_eq!(member.role, Role::Member);
        assert_eq!(member.domain, ClubDomain::Technical);
        assert_eq!(member.year, 2);
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.user_id, Some(Snowflake::new(1)));
    }

    #[test]
    fn test_direct_entry_has_no_user_link() {
        let member = Member::new(
            Snowflake::new(20),
            "Old Timer".to_string(),
            Role::Member,
            ClubDomain::Design,
            4,
            "old@univ.edu".to_string(),
            None,
            MemberStatus::Alumni,
        );
        assert!(member.user_id.is_none());
        assert_eq!(member.status, MemberStatus::Alumni);
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [MemberStatus::Active, MemberStatus::Inactive, MemberStatus::Alumni] {
            assert_eq!(MemberStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MemberStatus::parse("RETIRED"), None);
    }
}
