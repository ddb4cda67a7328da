//! PostgreSQL implementation of BugRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{Bug, BugStatus};
use club_core::error::DomainError;
use club_core::traits::{BugRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::bug_from_model;
use crate::models::BugModel;

use super::error::map_db_error;

const BUG_COLUMNS: &str = "id, title, description, area, priority, status, reporter_id, \
     assignee_id, created_at, updated_at";

/// PostgreSQL implementation of BugRepository
#[derive(Clone)]
pub struct PgBugRepository {
    pool: PgPool,
}

impl PgBugRepository {
    /// Create a new PgBugRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BugRepository for PgBugRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Bug>> {
        let result = sqlx::query_as::<_, BugModel>(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(bug_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<BugStatus>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Bug>> {
        let limit = limit.clamp(1, 100);

        let results = match status {
            Some(status) => {
                sqlx::query_as::<_, BugModel>(&format!(
                    "SELECT {BUG_COLUMNS} FROM bugs WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset.max(0))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, BugModel>(&format!(
                    "SELECT {BUG_COLUMNS} FROM bugs ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset.max(0))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(bug_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<BugStatus>) -> RepoResult<i64> {
        match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bugs WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bugs")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)
    }

    #[instrument(skip(self, bug), fields(bug_id = %bug.id))]
    async fn create(&self, bug: &Bug) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bugs (id, title, description, area, priority, status, reporter_id, assignee_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(bug.id.into_inner())
        .bind(&bug.title)
        .bind(&bug.description)
        .bind(bug.area.as_deref())
        .bind(bug.priority.as_str())
        .bind(bug.status.as_str())
        .bind(bug.reporter_id.into_inner())
        .bind(bug.assignee_id.map(Snowflake::into_inner))
        .bind(bug.created_at)
        .bind(bug.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, bug), fields(bug_id = %bug.id))]
    async fn update(&self, bug: &Bug) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE bugs
            SET title = $2, description = $3, area = $4, priority = $5,
                status = $6, assignee_id = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(bug.id.into_inner())
        .bind(&bug.title)
        .bind(&bug.description)
        .bind(bug.area.as_deref())
        .bind(bug.priority.as_str())
        .bind(bug.status.as_str())
        .bind(bug.assignee_id.map(Snowflake::into_inner))
        .bind(bug.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BugNotFound(bug.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM bugs WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BugNotFound(id));
        }

        Ok(())
    }
}
