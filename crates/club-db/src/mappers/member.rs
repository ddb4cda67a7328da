//! Member entity <-> model mapper

use club_core::entities::{Member, MemberStatus};
use club_core::error::DomainError;
use club_core::traits::RepoResult;
use club_core::value_objects::{ClubDomain, Role, Snowflake};

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
pub fn member_from_model(model: MemberModel) -> RepoResult<Member> {
    let domain = ClubDomain::parse(&model.domain)
        .ok_or_else(|| DomainError::InternalError(format!("bad domain column: {}", model.domain)))?;
    let status = MemberStatus::parse(&model.status)
        .ok_or_else(|| DomainError::InternalError(format!("bad status column: {}", model.status)))?;

    Ok(Member {
        id: Snowflake::new(model.id),
        name: model.name,
        role: Role::parse(&model.role),
        domain,
        year: model.year,
        email: model.email,
        phone: model.phone,
        status,
        user_id: model.user_id.map(Snowflake::new),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
