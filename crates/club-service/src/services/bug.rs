//! Bug report service
//!
//! Anyone signed in can file a report. Triage (status, priority,
//! assignee) is open to the admin set and to members of the Technical
//! domain, who handle most of the fixes in practice.

use club_core::{Bug, BugPriority, BugStatus, ClubDomain, Permissions, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{BugResponse, CreateBugRequest, UpdateBugRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// Bug service
pub struct BugService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BugService<'a> {
    /// Create a new BugService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a bug report
    #[instrument(skip(self, actor, request))]
    pub async fn create_bug(
        &self,
        actor: &User,
        request: CreateBugRequest,
    ) -> ServiceResult<BugResponse> {
        let priority = match request.priority.as_deref() {
            Some(raw) => BugPriority::parse(raw)
                .ok_or_else(|| ServiceError::validation(format!("unknown priority: {raw}")))?,
            None => BugPriority::Medium,
        };

        let bug = Bug::new(
            self.ctx.generate_id(),
            request.title,
            request.description,
            request.area,
            priority,
            actor.id,
        );
        self.ctx.bug_repo().create(&bug).await?;

        info!(bug_id = %bug.id, reporter_id = %actor.id, "Bug reported");

        Ok(BugResponse::from(&bug))
    }

    /// List bug reports, optionally filtered by status
    #[instrument(skip(self, _actor))]
    pub async fn list_bugs(
        &self,
        _actor: &User,
        status: Option<String>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<BugResponse>, i64)> {
        let status = match status.as_deref() {
            Some(raw) => Some(
                BugStatus::parse(raw)
                    .ok_or_else(|| ServiceError::validation(format!("unknown bug status: {raw}")))?,
            ),
            None => None,
        };

        let bugs = self.ctx.bug_repo().list(status, limit, offset).await?;
        let total = self.ctx.bug_repo().count(status).await?;

        Ok((bugs.iter().map(BugResponse::from).collect(), total))
    }

    /// Get a single bug report
    #[instrument(skip(self, _actor))]
    pub async fn get_bug(&self, _actor: &User, bug_id: Snowflake) -> ServiceResult<BugResponse> {
        let bug = self.find_bug(bug_id).await?;
        Ok(BugResponse::from(&bug))
    }

    /// Triage a bug: update status, priority, or assignee
    #[instrument(skip(self, actor, request))]
    pub async fn update_bug(
        &self,
        actor: &User,
        bug_id: Snowflake,
        request: UpdateBugRequest,
    ) -> ServiceResult<BugResponse> {
        self.require_triage(actor).await?;

        let mut bug = self.find_bug(bug_id).await?;

        if let Some(raw) = request.status {
            let status = BugStatus::parse(&raw)
                .ok_or_else(|| ServiceError::validation(format!("unknown bug status: {raw}")))?;
            bug.set_status(status);
        }
        if let Some(raw) = request.priority {
            bug.priority = BugPriority::parse(&raw)
                .ok_or_else(|| ServiceError::validation(format!("unknown priority: {raw}")))?;
        }
        if let Some(raw) = request.assignee_id {
            let assignee_id = raw
                .parse::<Snowflake>()
                .map_err(|_| ServiceError::validation(format!("invalid assignee id: {raw}")))?;
            let assignee = self
                .ctx
                .member_repo()
                .find_by_id(assignee_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("Member", raw))?;
            bug.assign(Some(assignee.id));
        }

        self.ctx.bug_repo().update(&bug).await?;

        info!(bug_id = %bug.id, actor_id = %actor.id, "Bug triaged");

        Ok(BugResponse::from(&bug))
    }

    /// Delete a bug report (reporter or admin)
    #[instrument(skip(self, actor))]
    pub async fn delete_bug(&self, actor: &User, bug_id: Snowflake) -> ServiceResult<()> {
        let bug = self.find_bug(bug_id).await?;

        if bug.reporter_id != actor.id {
            permission::require(actor, Permissions::MANAGE_BUGS)?;
        }

        self.ctx.bug_repo().delete(bug.id).await?;

        info!(bug_id = %bug.id, actor_id = %actor.id, "Bug deleted");

        Ok(())
    }

    /// Triage is open to `MANAGE_BUGS` holders and to Technical-domain
    /// members.
    async fn require_triage(&self, actor: &User) -> ServiceResult<()> {
        if actor.role.permissions().has(Permissions::MANAGE_BUGS) {
            return Ok(());
        }
        if let Some(member_id) = actor.member_id {
            if let Some(member) = self.ctx.member_repo().find_by_id(member_id).await? {
                if member.domain == ClubDomain::Technical {
                    return Ok(());
                }
            }
        }
        permission::require(actor, Permissions::MANAGE_BUGS)
    }

    async fn find_bug(&self, bug_id: Snowflake) -> ServiceResult<Bug> {
        self.ctx
            .bug_repo()
            .find_by_id(bug_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Bug", bug_id.to_string()))
    }
}
