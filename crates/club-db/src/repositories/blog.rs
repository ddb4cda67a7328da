//! PostgreSQL implementation of BlogRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use club_core::entities::{Blog, BlogStatus};
use club_core::error::DomainError;
use club_core::traits::{BlogRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::blog_with_upvotes;
use crate::models::BlogModel;

use super::error::{map_db_error, map_unique_violation};

const BLOG_COLUMNS: &str =
    "id, title, slug, content, summary, author_id, tags, status, created_at, updated_at";

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    /// Create a new PgBlogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load upvoter IDs for a blog
    async fn load_upvoter_ids(&self, blog_id: i64) -> Result<Vec<i64>, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM blog_upvotes WHERE blog_id = $1 ORDER BY created_at",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn hydrate(&self, model: BlogModel) -> RepoResult<Blog> {
        let upvoter_ids = self.load_upvoter_ids(model.id).await?;
        blog_with_upvotes(model, upvoter_ids)
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM blogs WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<BlogStatus>,
        author_id: Option<Snowflake>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Blog>> {
        let limit = limit.clamp(1, 100);

        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE 1 = 1"));
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(author_id) = author_id {
            builder
                .push(" AND author_id = ")
                .push_bind(author_id.into_inner());
        }
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset.max(0));

        let results = builder
            .build_query_as::<BlogModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut blogs = Vec::with_capacity(results.len());
        for model in results {
            blogs.push(self.hydrate(model).await?);
        }

        Ok(blogs)
    }

    #[instrument(skip(self))]
    async fn count(
        &self,
        status: Option<BlogStatus>,
        author_id: Option<Snowflake>,
    ) -> RepoResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blogs WHERE 1 = 1");
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(author_id) = author_id {
            builder
                .push(" AND author_id = ")
                .push_bind(author_id.into_inner());
        }

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, slug, content, summary, author_id, tags, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(blog.id.into_inner())
        .bind(&blog.title)
        .bind(&blog.slug)
        .bind(&blog.content)
        .bind(blog.summary.as_deref())
        .bind(blog.author_id.into_inner())
        .bind(&blog.tags)
        .bind(blog.status.as_str())
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugExists(blog.slug.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn update(&self, blog: &Blog) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET title = $2, slug = $3, content = $4, summary = $5, tags = $6,
                status = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(blog.id.into_inner())
        .bind(&blog.title)
        .bind(&blog.slug)
        .bind(&blog.content)
        .bind(blog.summary.as_deref())
        .bind(&blog.tags)
        .bind(blog.status.as_str())
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugExists(blog.slug.clone())))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlogNotFound(blog.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlogNotFound(id));
        }

        Ok(())
    }

    /// Toggle in one transaction so the returned count matches the final state
    #[instrument(skip(self))]
    async fn toggle_upvote(
        &self,
        blog_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<(bool, i64)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            "DELETE FROM blog_upvotes WHERE blog_id = $1 AND user_id = $2",
        )
        .bind(blog_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let now_upvoted = if deleted.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO blog_upvotes (blog_id, user_id, created_at) VALUES ($1, $2, NOW())",
            )
            .bind(blog_id.into_inner())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
            true
        } else {
            false
        };

        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_upvotes WHERE blog_id = $1")
                .bind(blog_id.into_inner())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((now_upvoted, count))
    }
}
