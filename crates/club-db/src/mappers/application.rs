//! Application entity <-> model mapper

use club_core::entities::{Application, ApplicationStatus, Review};
use club_core::error::DomainError;
use club_core::traits::RepoResult;
use club_core::value_objects::{ClubDomain, Role, Snowflake};

use crate::models::ApplicationModel;

/// Convert ApplicationModel to Application entity
pub fn application_from_model(model: ApplicationModel) -> RepoResult<Application> {
    let status = ApplicationStatus::parse(&model.status)
        .ok_or_else(|| DomainError::InternalError(format!("bad status column: {}", model.status)))?;
    let domain = ClubDomain::parse(&model.domain)
        .ok_or_else(|| DomainError::InternalError(format!("bad domain column: {}", model.domain)))?;

    let review = match (model.reviewer_id, model.reviewed_at) {
        (Some(reviewer_id), Some(reviewed_at)) => Some(Review {
            reviewer_id: Snowflake::new(reviewer_id),
            reviewed_at,
            notes: model.review_notes,
        }),
        _ => None,
    };

    Ok(Application {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        applicant_name: model.applicant_name,
        email: model.email,
        desired_role: Role::parse(&model.desired_role),
        domain,
        branch: model.branch,
        year: model.year,
        status,
        review,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
