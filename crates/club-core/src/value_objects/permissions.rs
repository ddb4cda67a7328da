//! Permission bitflags consulted by the authorization gate
//!
//! Every route states what it needs in terms of these flags; the mapping from
//! role to flags lives in `Role::permissions`, so call sites never hold
//! hard-coded role lists.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Administrative capabilities granted by a role
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Browse the member directory
        const VIEW_MEMBERS        = 1 << 0;
        /// Create, edit, delete member records directly
        const MANAGE_MEMBERS      = 1 << 1;
        /// Approve or reject membership applications
        const REVIEW_APPLICATIONS = 1 << 2;
        /// Approve, reject, delete other authors' blog posts
        const MODERATE_BLOGS      = 1 << 3;
        /// Triage bug reports (status, priority, assignee)
        const MANAGE_BUGS         = 1 << 4;
        /// Create, edit, delete events
        const MANAGE_EVENTS       = 1 << 5;
        /// List users and change their roles
        const MANAGE_USERS        = 1 << 6;
        /// Bypass all permission checks
        const ADMINISTRATOR       = 1 << 7;
    }
}

impl Permissions {
    /// Check if the permission set contains a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Get a list of all individual permissions that are set
    pub fn list(&self) -> Vec<&'static str> {
        let mut result = Vec::new();
        if self.contains(Self::VIEW_MEMBERS) {
            result.push("VIEW_MEMBERS");
        }
        if self.contains(Self::MANAGE_MEMBERS) {
            result.push("MANAGE_MEMBERS");
        }
        if self.contains(Self::REVIEW_APPLICATIONS) {
            result.push("REVIEW_APPLICATIONS");
        }
        if self.contains(Self::MODERATE_BLOGS) {
            result.push("MODERATE_BLOGS");
        }
        if self.contains(Self::MANAGE_BUGS) {
            result.push("MANAGE_BUGS");
        }
        if self.contains(Self::MANAGE_EVENTS) {
            result.push("MANAGE_EVENTS");
        }
        if self.contains(Self::MANAGE_USERS) {
            result.push("MANAGE_USERS");
        }
        if self.contains(Self::ADMINISTRATOR) {
            result.push("ADMINISTRATOR");
        }
        result
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>()
            .map(Permissions::from_bits_truncate)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Role;

    #[test]
    fn test_administrator_bypasses_checks() {
        let perms = Permissions::ADMINISTRATOR;
        assert!(perms.has(Permissions::REVIEW_APPLICATIONS));
        assert!(perms.has(Permissions::MANAGE_USERS));
    }

    #[test]
    fn test_has_requires_exact_flag() {
        let perms = Permissions::VIEW_MEMBERS | Permissions::MANAGE_EVENTS;
        assert!(perms.has(Permissions::MANAGE_EVENTS));
        assert!(!perms.has(Permissions::REVIEW_APPLICATIONS));
    }

    #[test]
    fn test_role_table_gates_review() {
        assert!(Role::SuperAdmin.permissions().has(Permissions::REVIEW_APPLICATIONS));
        assert!(Role::Lead.permissions().has(Permissions::REVIEW_APPLICATIONS));
        assert!(Role::CoLead.permissions().has(Permissions::REVIEW_APPLICATIONS));
        assert!(!Role::Coordinator.permissions().has(Permissions::REVIEW_APPLICATIONS));
        assert!(!Role::Member.permissions().has(Permissions::REVIEW_APPLICATIONS));
        assert!(!Role::User.permissions().has(Permissions::REVIEW_APPLICATIONS));
    }

    #[test]
    fn test_list() {
        let perms = Permissions::VIEW_MEMBERS | Permissions::MANAGE_BUGS;
        assert_eq!(perms.list(), vec!["VIEW_MEMBERS", "MANAGE_BUGS"]);
    }
}
