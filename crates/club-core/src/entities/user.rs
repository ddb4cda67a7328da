//! User entity - local mirror of an identity-provider subject
//!
//! Created lazily on the first authenticated request. The identity provider
//! owns name/email/avatar; the club adds role and the link to a Member record.

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, Snowflake};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Identity-provider subject id (unique)
    pub subject: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: Role,
    /// Link to the club Member record once an application is approved
    pub member_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User at the base role
    pub fn new(
        id: Snowflake,
        subject: String,
        email: String,
        name: String,
        avatar: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            subject,
            email,
            name,
            avatar,
            role: Role::User,
            member_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this user is already linked to a Member record
    #[inline]
    pub fn is_member(&self) -> bool {
        self.member_id.is_some()
    }

    /// Change the user's role
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Refresh profile fields from the identity provider
    pub fn refresh_profile(&mut self, name: String, email: String, avatar: Option<String>) {
        self.name = name;
        self.email = email;
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            Snowflake::new(1),
            "idp|abc123".to_string(),
            "alice@univ.edu".to_string(),
            "Alice".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();
        assert_eq!(user.role, Role::User);
        assert!(user.member_id.is_none());
        assert!(!user.is_member());
    }

    #[test]
    fn test_member_link() {
        let mut user = test_user();
        user.member_id = Some(Snowflake::new(99));
        assert!(user.is_member());
    }

    #[test]
    fn test_refresh_profile() {
        let mut user = test_user();
        user.refresh_profile(
            "Alice B".to_string(),
            "alice.b@univ.edu".to_string(),
            Some("https://cdn.example/a.png".to_string()),
        );
        assert_eq!(user.name, "Alice B");
        assert_eq!(user.email, "alice.b@univ.edu");
        assert_eq!(user.avatar.as_deref(), Some("https://cdn.example/a.png"));
    }
}
