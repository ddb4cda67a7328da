//! User entity <-> model mapper

use club_core::entities::User;
use club_core::traits::RepoResult;
use club_core::value_objects::{Role, Snowflake};

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Unknown role strings degrade to `Role::User` rather than failing the row.
pub fn user_from_model(model: UserModel) -> RepoResult<User> {
    Ok(User {
        id: Snowflake::new(model.id),
        subject: model.subject,
        email: model.email,
        name: model.name,
        avatar: model.avatar,
        role: Role::parse(&model.role),
        member_id: model.member_id.map(Snowflake::new),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
