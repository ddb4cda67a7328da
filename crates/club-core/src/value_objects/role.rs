//! Role - fixed club hierarchy used to gate promotion and administrative actions
//!
//! Roles form a total order by level. An actor may only grant a role whose
//! level is less than or equal to their own.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Permissions;

/// Club role, ordered by level (SUPER_ADMIN highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Lead,
    CoLead,
    Coordinator,
    Member,
    /// Base role assigned on first login; unknown role names also map here.
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    /// Numeric level for promotion gating
    #[inline]
    pub const fn level(self) -> u8 {
        match self {
            Self::SuperAdmin => 5,
            Self::Lead => 4,
            Self::CoLead => 3,
            Self::Coordinator => 2,
            Self::Member => 1,
            Self::User => 0,
        }
    }

    /// Check if this role may grant `target` to another user
    #[inline]
    pub fn can_promote(self, target: Role) -> bool {
        self.level() >= target.level()
    }

    /// Roles permitted to review applications and administer the club
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Lead | Self::CoLead)
    }

    /// Permission set granted by this role (centralized permission table)
    pub fn permissions(self) -> Permissions {
        match self {
            Self::SuperAdmin => Permissions::ADMINISTRATOR,
            Self::Lead | Self::CoLead => {
                Permissions::VIEW_MEMBERS
                    | Permissions::MANAGE_MEMBERS
                    | Permissions::REVIEW_APPLICATIONS
                    | Permissions::MODERATE_BLOGS
                    | Permissions::MANAGE_BUGS
                    | Permissions::MANAGE_EVENTS
                    | Permissions::MANAGE_USERS
            }
            Self::Coordinator => {
                Permissions::VIEW_MEMBERS | Permissions::MANAGE_BUGS | Permissions::MANAGE_EVENTS
            }
            Self::Member => Permissions::VIEW_MEMBERS,
            Self::User => Permissions::empty(),
        }
    }

    /// Database/API string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Lead => "LEAD",
            Self::CoLead => "CO_LEAD",
            Self::Coordinator => "COORDINATOR",
            Self::Member => "MEMBER",
            Self::User => "USER",
        }
    }

    /// Parse from a stored string; unknown names degrade to the base role
    pub fn parse(s: &str) -> Self {
        match s {
            "SUPER_ADMIN" => Self::SuperAdmin,
            "LEAD" => Self::Lead,
            "CO_LEAD" => Self::CoLead,
            "COORDINATOR" => Self::Coordinator,
            "MEMBER" => Self::Member,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_total_order() {
        assert_eq!(Role::SuperAdmin.level(), 5);
        assert_eq!(Role::Lead.level(), 4);
        assert_eq!(Role::CoLead.level(), 3);
        assert_eq!(Role::Coordinator.level(), 2);
        assert_eq!(Role::Member.level(), 1);
        assert_eq!(Role::User.level(), 0);
    }

    #[test]
    fn test_can_promote_iff_level_geq() {
        let roles = [
            Role::SuperAdmin,
            Role::Lead,
            Role::CoLead,
            Role::Coordinator,
            Role::Member,
            Role::User,
        ];
        for actor in roles {
            for target in roles {
                assert_eq!(
                    actor.can_promote(target),
                    actor.level() >= target.level(),
                    "{actor} -> {target}"
                );
            }
        }
    }

    #[test]
    fn test_unknown_role_parses_to_base() {
        assert_eq!(Role::parse("WIZARD"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
        assert_eq!(Role::parse("LEAD"), Role::Lead);
    }

    #[test]
    fn test_parse_roundtrip() {
        for role in [
            Role::SuperAdmin,
            Role::Lead,
            Role::CoLead,
            Role::Coordinator,
            Role::Member,
            Role::User,
        ] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn test_admin_set() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(Role::Lead.is_admin());
        assert!(Role::CoLead.is_admin());
        assert!(!Role::Coordinator.is_admin());
        assert!(!Role::Member.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_serde_unknown_deserializes_to_user() {
        let role: Role = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(role, Role::User);

        let role: Role = serde_json::from_str("\"CO_LEAD\"").unwrap();
        assert_eq!(role, Role::CoLead);
    }

    #[test]
    fn test_serde_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::CoLead).unwrap(), "\"CO_LEAD\"");
    }
}
