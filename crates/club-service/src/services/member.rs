//! Member directory service
//!
//! The directory is readable by anyone holding `VIEW_MEMBERS` (every
//! member and above). Direct entry, edits, and removal are admin
//! operations gated by `MANAGE_MEMBERS`.

use club_core::{
    ClubDomain, DomainError, Member, MemberFilter, MemberStatus, Permissions, Role, Snowflake,
    User,
};
use tracing::{info, instrument};

use crate::dto::{CreateMemberRequest, MemberResponse, UpdateMemberRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the member directory, optionally filtered by domain and year
    #[instrument(skip(self, actor))]
    pub async fn list_members(
        &self,
        actor: &User,
        domain: Option<String>,
        year: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<MemberResponse>, i64)> {
        permission::require(actor, Permissions::VIEW_MEMBERS)?;

        let filter = MemberFilter {
            domain: match domain {
                Some(raw) => Some(parse_domain(&raw)?),
                None => None,
            },
            year,
        };

        let members = self.ctx.member_repo().list(&filter, limit, offset).await?;
        let total = self.ctx.member_repo().count(&filter).await?;

        Ok((members.iter().map(MemberResponse::from).collect(), total))
    }

    /// Get a single member by ID
    #[instrument(skip(self, actor))]
    pub async fn get_member(
        &self,
        actor: &User,
        member_id: Snowflake,
    ) -> ServiceResult<MemberResponse> {
        permission::require(actor, Permissions::VIEW_MEMBERS)?;

        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))?;

        Ok(MemberResponse::from(&member))
    }

    /// Add a member directly, bypassing the application flow. Used for
    /// importing existing members; the record is not linked to a user
    /// account.
    #[instrument(skip(self, actor, request))]
    pub async fn create_member(
        &self,
        actor: &User,
        request: CreateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        permission::require(actor, Permissions::MANAGE_MEMBERS)?;

        let role = request.role.as_deref().map(Role::parse).unwrap_or(Role::Member);
        if !actor.role.can_promote(role) {
            return Err(ServiceError::from(DomainError::CannotAssignHigherRole));
        }

        let member = Member::new(
            self.ctx.generate_id(),
            request.name,
            role,
            parse_domain(&request.domain)?,
            request.year,
            request.email,
            request.phone,
            MemberStatus::Active,
        );
        self.ctx.member_repo().create(&member).await?;

        info!(member_id = %member.id, actor_id = %actor.id, "Member added by direct entry");

        Ok(MemberResponse::from(&member))
    }

    /// Update a member record
    #[instrument(skip(self, actor, request))]
    pub async fn update_member(
        &self,
        actor: &User,
        member_id: Snowflake,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        permission::require(actor, Permissions::MANAGE_MEMBERS)?;

        let mut member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))?;

        if let Some(name) = request.name {
            member.name = name;
        }
        if let Some(raw) = request.role {
            let role = Role::parse(&raw);
            if !actor.role.can_promote(role) {
                return Err(ServiceError::from(DomainError::CannotAssignHigherRole));
            }
            member.role = role;
        }
        if let Some(raw) = request.domain {
            member.domain = parse_domain(&raw)?;
        }
        if let Some(year) = request.year {
            member.year = year;
        }
        if let Some(phone) = request.phone {
            member.phone = Some(phone);
        }
        if let Some(raw) = request.status {
            let status = MemberStatus::parse(&raw)
                .ok_or_else(|| ServiceError::validation(format!("unknown status: {raw}")))?;
            member.set_status(status);
        } else {
            member.updated_at = chrono::Utc::now();
        }

        self.ctx.member_repo().update(&member).await?;

        info!(member_id = %member.id, actor_id = %actor.id, "Member updated");

        Ok(MemberResponse::from(&member))
    }

    /// Remove a member from the directory
    #[instrument(skip(self, actor))]
    pub async fn delete_member(&self, actor: &User, member_id: Snowflake) -> ServiceResult<()> {
        permission::require(actor, Permissions::MANAGE_MEMBERS)?;

        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))?;

        self.ctx.member_repo().delete(member.id).await?;

        info!(member_id = %member.id, actor_id = %actor.id, "Member removed");

        Ok(())
    }
}

fn parse_domain(raw: &str) -> ServiceResult<ClubDomain> {
    ClubDomain::parse(raw)
        .ok_or_else(|| ServiceError::from(DomainError::UnknownDomain(raw.to_string())))
}
