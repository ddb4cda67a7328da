//! User account service

use club_core::{Permissions, Role, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, PromoteUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The authenticated user's own account, with the effective
    /// permission set spelled out.
    #[instrument(skip(self, actor))]
    pub async fn current_user(&self, actor: &User) -> ServiceResult<CurrentUserResponse> {
        Ok(CurrentUserResponse::from(actor))
    }

    /// List user accounts (admin only)
    #[instrument(skip(self, actor))]
    pub async fn list_users(
        &self,
        actor: &User,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<UserResponse>, i64)> {
        permission::require(actor, Permissions::MANAGE_USERS)?;

        let users = self.ctx.user_repo().list(limit, offset).await?;
        let total = self.ctx.user_repo().count().await?;

        Ok((users.iter().map(UserResponse::from).collect(), total))
    }

    /// Get a user account by ID (admin only)
    #[instrument(skip(self, actor))]
    pub async fn get_user(&self, actor: &User, user_id: Snowflake) -> ServiceResult<UserResponse> {
        permission::require(actor, Permissions::MANAGE_USERS)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(UserResponse::from(&user))
    }

    /// Change a user's role. The actor can only grant roles at or below
    /// their own level.
    #[instrument(skip(self, actor, request))]
    pub async fn promote_user(
        &self,
        actor: &User,
        user_id: Snowflake,
        request: PromoteUserRequest,
    ) -> ServiceResult<UserResponse> {
        permission::require(actor, Permissions::MANAGE_USERS)?;

        let target_role = Role::parse(&request.role);
        if target_role == Role::User && request.role != Role::User.as_str() {
            return Err(ServiceError::validation(format!(
                "unknown role: {}",
                request.role
            )));
        }
        if !actor.role.can_promote(target_role) {
            return Err(ServiceError::from(
                club_core::DomainError::CannotAssignHigherRole,
            ));
        }

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        user.set_role(target_role);
        self.ctx.user_repo().update(&user).await?;

        info!(
            user_id = %user.id,
            role = %user.role,
            actor_id = %actor.id,
            "User role changed"
        );

        Ok(UserResponse::from(&user))
    }
}
