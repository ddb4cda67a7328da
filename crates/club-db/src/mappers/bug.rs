//! Bug entity <-> model mapper

use club_core::entities::{Bug, BugPriority, BugStatus};
use club_core::error::DomainError;
use club_core::traits::RepoResult;
use club_core::value_objects::Snowflake;

use crate::models::BugModel;

/// Convert BugModel to Bug entity
pub fn bug_from_model(model: BugModel) -> RepoResult<Bug> {
    let status = BugStatus::parse(&model.status)
        .ok_or_else(|| DomainError::InternalError(format!("bad status column: {}", model.status)))?;
    let priority = BugPriority::parse(&model.priority).ok_or_else(|| {
        DomainError::InternalError(format!("bad priority column: {}", model.priority))
    })?;

    Ok(Bug {
        id: Snowflake::new(model.id),
        title: model.title,
        description: model.description,
        area: model.area,
        priority,
        status,
        reporter_id: Snowflake::new(model.reporter_id),
        assignee_id: model.assignee_id.map(Snowflake::new),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
