//! Blog service
//!
//! Posts start in the moderation queue and only show up publicly once a
//! moderator approves them. Author edits send the post back through the
//! queue. Upvotes are a per-user toggle on approved posts.

use club_core::{Blog, BlogStatus, DomainError, Permissions, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{mappers::blog_response, BlogResponse, CreateBlogRequest, UpdateBlogRequest, UpvoteResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// Blog service
pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    /// Create a new BlogService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post in the moderation queue. Slug collisions get a short
    /// random suffix rather than an error.
    #[instrument(skip(self, actor, request))]
    pub async fn create_blog(
        &self,
        actor: &User,
        request: CreateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        let mut blog = Blog::new(
            self.ctx.generate_id(),
            request.title,
            request.content,
            request.summary,
            actor.id,
            request.tags.unwrap_or_default(),
        );

        if self.ctx.blog_repo().slug_exists(&blog.slug).await? {
            blog.slug = format!("{}-{:04x}", blog.slug, rand::random::<u16>());
        }

        self.ctx.blog_repo().create(&blog).await?;

        info!(blog_id = %blog.id, slug = %blog.slug, author_id = %actor.id, "Blog created");

        Ok(blog_response(&blog, Some(actor.id)))
    }

    /// List posts. Anonymous callers and regular users only see approved
    /// posts; the pending and rejected queues require `MODERATE_BLOGS`.
    #[instrument(skip(self, viewer))]
    pub async fn list_blogs(
        &self,
        viewer: Option<&User>,
        status: Option<String>,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<BlogResponse>, i64)> {
        let status = match status.as_deref() {
            Some(raw) => BlogStatus::parse(raw)
                .ok_or_else(|| ServiceError::validation(format!("unknown blog status: {raw}")))?,
            None => BlogStatus::Approved,
        };

        if status != BlogStatus::Approved {
            let viewer = viewer.ok_or_else(|| {
                ServiceError::permission_denied("MODERATE_BLOGS")
            })?;
            permission::require(viewer, Permissions::MODERATE_BLOGS)?;
        }

        let viewer_id = viewer.map(|u| u.id);
        let blogs = self
            .ctx
            .blog_repo()
            .list(Some(status), None, limit, offset)
            .await?;
        let total = self.ctx.blog_repo().count(Some(status), None).await?;

        Ok((
            blogs.iter().map(|b| blog_response(b, viewer_id)).collect(),
            total,
        ))
    }

    /// List the authenticated user's own posts in any status
    #[instrument(skip(self, actor))]
    pub async fn list_own_blogs(
        &self,
        actor: &User,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<BlogResponse>, i64)> {
        let blogs = self
            .ctx
            .blog_repo()
            .list(None, Some(actor.id), limit, offset)
            .await?;
        let total = self.ctx.blog_repo().count(None, Some(actor.id)).await?;

        Ok((
            blogs
                .iter()
                .map(|b| blog_response(b, Some(actor.id)))
                .collect(),
            total,
        ))
    }

    /// Get a post by slug. Unapproved posts are only visible to their
    /// author and to moderators; everyone else gets a 404 so drafts do
    /// not leak.
    #[instrument(skip(self, viewer))]
    pub async fn get_by_slug(
        &self,
        viewer: Option<&User>,
        slug: &str,
    ) -> ServiceResult<BlogResponse> {
        let blog = self
            .ctx
            .blog_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::BlogSlugNotFound(slug.to_string()))?;

        if blog.status != BlogStatus::Approved && !self.can_see_unapproved(viewer, &blog) {
            return Err(ServiceError::from(DomainError::BlogSlugNotFound(
                slug.to_string(),
            )));
        }

        Ok(blog_response(&blog, viewer.map(|u| u.id)))
    }

    /// Update a post. Only the author may edit, and edits go back to the
    /// moderation queue.
    #[instrument(skip(self, actor, request))]
    pub async fn update_blog(
        &self,
        actor: &User,
        blog_id: Snowflake,
        request: UpdateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        let mut blog = self.find_blog(blog_id).await?;

        if blog.author_id != actor.id {
            return Err(ServiceError::from(DomainError::NotResourceOwner));
        }

        if let Some(title) = request.title {
            blog.title = title;
            blog.refresh_slug();
            if self.ctx.blog_repo().slug_exists(&blog.slug).await? {
                blog.slug = format!("{}-{:04x}", blog.slug, rand::random::<u16>());
            }
        }
        if let Some(content) = request.content {
            blog.content = content;
        }
        if let Some(summary) = request.summary {
            blog.summary = Some(summary);
        }
        if let Some(tags) = request.tags {
            blog.tags = tags;
        }
        blog.reset_to_pending();

        self.ctx.blog_repo().update(&blog).await?;

        info!(blog_id = %blog.id, "Blog updated, back to moderation queue");

        Ok(blog_response(&blog, Some(actor.id)))
    }

    /// Approve a post from the moderation queue
    #[instrument(skip(self, actor))]
    pub async fn approve_blog(
        &self,
        actor: &User,
        blog_id: Snowflake,
    ) -> ServiceResult<BlogResponse> {
        self.moderate(actor, blog_id, BlogStatus::Approved).await
    }

    /// Reject a post from the moderation queue
    #[instrument(skip(self, actor))]
    pub async fn reject_blog(
        &self,
        actor: &User,
        blog_id: Snowflake,
    ) -> ServiceResult<BlogResponse> {
        self.moderate(actor, blog_id, BlogStatus::Rejected).await
    }

    async fn moderate(
        &self,
        actor: &User,
        blog_id: Snowflake,
        status: BlogStatus,
    ) -> ServiceResult<BlogResponse> {
        permission::require(actor, Permissions::MODERATE_BLOGS)?;

        let mut blog = self.find_blog(blog_id).await?;
        blog.set_status(status);
        self.ctx.blog_repo().update(&blog).await?;

        info!(blog_id = %blog.id, status = %status.as_str(), moderator_id = %actor.id, "Blog moderated");

        Ok(blog_response(&blog, Some(actor.id)))
    }

    /// Delete a post (author or moderator)
    #[instrument(skip(self, actor))]
    pub async fn delete_blog(&self, actor: &User, blog_id: Snowflake) -> ServiceResult<()> {
        let blog = self.find_blog(blog_id).await?;

        if blog.author_id != actor.id {
            permission::require(actor, Permissions::MODERATE_BLOGS)?;
        }

        self.ctx.blog_repo().delete(blog.id).await?;

        info!(blog_id = %blog.id, actor_id = %actor.id, "Blog deleted");

        Ok(())
    }

    /// Toggle the caller's upvote on an approved post. The first call
    /// adds the vote, the second removes it.
    #[instrument(skip(self, actor))]
    pub async fn toggle_upvote(
        &self,
        actor: &User,
        blog_id: Snowflake,
    ) -> ServiceResult<UpvoteResponse> {
        let blog = self.find_blog(blog_id).await?;

        if blog.status != BlogStatus::Approved {
            return Err(ServiceError::from(DomainError::BlogNotPublished));
        }

        let (upvoted, upvotes) = self.ctx.blog_repo().toggle_upvote(blog.id, actor.id).await?;

        Ok(UpvoteResponse { upvoted, upvotes })
    }

    async fn find_blog(&self, blog_id: Snowflake) -> ServiceResult<Blog> {
        self.ctx
            .blog_repo()
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Blog", blog_id.to_string()))
    }

    fn can_see_unapproved(&self, viewer: Option<&User>, blog: &Blog) -> bool {
        viewer.is_some_and(|u| {
            u.id == blog.author_id || u.role.permissions().has(Permissions::MODERATE_BLOGS)
        })
    }
}
