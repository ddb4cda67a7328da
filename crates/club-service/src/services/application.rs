//! Membership application service
//!
//! Applications move through a small state machine: PENDING until a
//! reviewer approves or rejects them, and terminal after that. Approval
//! creates the member record and promotes the applicant's account in a
//! single transaction; the repository guards the status flip so
//! concurrent reviewers cannot both win.

use club_core::{
    Application, ApplicationStatus, ClubDomain, DomainError, Member, Permissions, Role, Snowflake,
    User,
};
use tracing::{info, instrument};

use crate::dto::{ApplicationResponse, ReviewApplicationRequest, SubmitApplicationRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a membership application for the authenticated user.
    ///
    /// A user may hold at most one pending application, and existing
    /// members cannot apply again.
    #[instrument(skip(self, actor, request))]
    pub async fn submit(
        &self,
        actor: &User,
        request: SubmitApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        if actor.is_member() {
            return Err(ServiceError::from(DomainError::AlreadyMember));
        }

        if let Some(allowed) = &self.ctx.membership().allowed_email_domain {
            let domain = request.email.rsplit('@').next().unwrap_or_default();
            if !domain.eq_ignore_ascii_case(allowed) {
                return Err(ServiceError::from(DomainError::EmailDomainNotAllowed(
                    allowed.clone(),
                )));
            }
        }

        if self
            .ctx
            .application_repo()
            .find_pending_by_user(actor.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::from(DomainError::ApplicationPending));
        }

        let domain = ClubDomain::parse(&request.domain)
            .ok_or_else(|| ServiceError::from(DomainError::UnknownDomain(request.domain.clone())))?;
        let desired_role = request
            .desired_role
            .as_deref()
            .map(Role::parse)
            .unwrap_or(Role::Member);

        let application = Application::new(
            self.ctx.generate_id(),
            actor.id,
            request.name,
            request.email,
            desired_role,
            domain,
            request.branch,
            request.year,
        );
        self.ctx.application_repo().create(&application).await?;

        info!(
            application_id = %application.id,
            user_id = %actor.id,
            "Application submitted"
        );

        Ok(ApplicationResponse::from(&application))
    }

    /// List applications for review, optionally filtered by status
    #[instrument(skip(self, actor))]
    pub async fn list_applications(
        &self,
        actor: &User,
        status: Option<String>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<ApplicationResponse>, i64)> {
        permission::require(actor, Permissions::REVIEW_APPLICATIONS)?;

        let status = match status {
            Some(raw) => Some(ApplicationStatus::parse(&raw).ok_or_else(|| {
                ServiceError::validation(format!("unknown application status: {raw}"))
            })?),
            None => None,
        };

        let applications = self
            .ctx
            .application_repo()
            .list(status, limit, offset)
            .await?;
        let total = self.ctx.application_repo().count(status).await?;

        Ok((
            applications.iter().map(ApplicationResponse::from).collect(),
            total,
        ))
    }

    /// Get a single application. Reviewers can see any application; a
    /// regular user can only see their own.
    #[instrument(skip(self, actor))]
    pub async fn get_application(
        &self,
        actor: &User,
        application_id: Snowflake,
    ) -> ServiceResult<ApplicationResponse> {
        let application = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", application_id.to_string()))?;

        if application.user_id != actor.id {
            permission::require(actor, Permissions::REVIEW_APPLICATIONS)?;
        }

        Ok(ApplicationResponse::from(&application))
    }

    /// Approve a pending application: mark it approved, create the member
    /// record, and promote the applicant's user account, all in one
    /// transaction.
    #[instrument(skip(self, actor, request))]
    pub async fn approve(
        &self,
        actor: &User,
        application_id: Snowflake,
        request: ReviewApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        permission::require(actor, Permissions::REVIEW_APPLICATIONS)?;

        let mut application = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", application_id.to_string()))?;

        if !actor.role.can_promote(application.desired_role) {
            return Err(ServiceError::from(DomainError::CannotAssignHigherRole));
        }

        application.approve(actor.id, request.notes)?;
        let member = Member::from_application(self.ctx.generate_id(), &application);

        self.ctx
            .application_repo()
            .approve(&application, &member)
            .await?;

        info!(
            application_id = %application.id,
            member_id = %member.id,
            reviewer_id = %actor.id,
            "Application approved"
        );

        Ok(ApplicationResponse::from(&application))
    }

    /// Reject a pending application
    #[instrument(skip(self, actor, request))]
    pub async fn reject(
        &self,
        actor: &User,
        application_id: Snowflake,
        request: ReviewApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        permission::require(actor, Permissions::REVIEW_APPLICATIONS)?;

        let mut application = self
            .ctx
            .application_repo()
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", application_id.to_string()))?;

        application.reject(actor.id, request.notes)?;
        self.ctx.application_repo().reject(&application).await?;

        info!(
            application_id = %application.id,
            reviewer_id = %actor.id,
            "Application rejected"
        );

        Ok(ApplicationResponse::from(&application))
    }
}
