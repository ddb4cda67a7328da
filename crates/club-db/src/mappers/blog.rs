//! Blog entity <-> model mapper

use club_core::entities::{Blog, BlogStatus};
use club_core::error::DomainError;
use club_core::traits::RepoResult;
use club_core::value_objects::Snowflake;

use crate::models::BlogModel;

/// Combine a blog row with its separately loaded upvoter IDs
pub fn blog_with_upvotes(model: BlogModel, upvoter_ids: Vec<i64>) -> RepoResult<Blog> {
    let status = BlogStatus::parse(&model.status)
        .ok_or_else(|| DomainError::InternalError(format!("bad status column: {}", model.status)))?;

    Ok(Blog {
        id: Snowflake::new(model.id),
        title: model.title,
        slug: model.slug,
        content: model.content,
        summary: model.summary,
        author_id: Snowflake::new(model.author_id),
        tags: model.tags,
        status,
        upvotes: upvoter_ids.into_iter().map(Snowflake::new).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
