//! Role-based permission checks
//!
//! Every privileged operation funnels through [`require`], so the
//! mapping from role to allowed actions lives in one place
//! (`Role::permissions` in the core crate) and services only name the
//! permission they need.

use club_core::{Permissions, User};

use super::error::{ServiceError, ServiceResult};

/// Require a single permission, erroring with the missing flag's name.
pub(crate) fn require(actor: &User, permission: Permissions) -> ServiceResult<()> {
    if actor.role.permissions().has(permission) {
        Ok(())
    } else {
        Err(ServiceError::permission_denied(
            permission.list().join(", "),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::{Role, Snowflake};

    fn user_with_role(role: Role) -> User {
        let mut user = User::new(
            Snowflake::new(1),
            "idp-1".to_string(),
            "a@university.edu".to_string(),
            "A".to_string(),
            None,
        );
        user.set_role(role);
        user
    }

    #[test]
    fn test_member_cannot_manage_members() {
        let member = user_with_role(Role::Member);
        assert!(require(&member, Permissions::VIEW_MEMBERS).is_ok());
        assert!(require(&member, Permissions::MANAGE_MEMBERS).is_err());
    }

    #[test]
    fn test_super_admin_passes_everything() {
        let admin = user_with_role(Role::SuperAdmin);
        assert!(require(&admin, Permissions::MANAGE_USERS).is_ok());
        assert!(require(&admin, Permissions::MODERATE_BLOGS).is_ok());
    }

    #[test]
    fn test_missing_permission_is_named() {
        let user = user_with_role(Role::User);
        let err = require(&user, Permissions::REVIEW_APPLICATIONS).unwrap_err();
        match err {
            ServiceError::PermissionDenied { permission } => {
                assert_eq!(permission, "REVIEW_APPLICATIONS");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
