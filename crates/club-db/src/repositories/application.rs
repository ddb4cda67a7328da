//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use club_core::entities::{Application, ApplicationStatus, Member};
use club_core::error::DomainError;
use club_core::traits::{ApplicationRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::application_from_model;
use crate::models::ApplicationModel;

use super::error::{map_db_error, map_unique_violation};

const APPLICATION_COLUMNS: &str = "id, user_id, applicant_name, email, desired_role, domain, \
     branch, year, status, reviewer_id, reviewed_at, review_notes, created_at, updated_at";

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the row out of PENDING inside a transaction.
    ///
    /// The WHERE clause on status is the concurrency guard: of two reviewers
    /// racing on the same application, exactly one UPDATE matches a row.
    async fn mark_reviewed(
        tx: &mut Transaction<'_, Postgres>,
        application: &Application,
    ) -> RepoResult<()> {
        let review = application
            .review
            .as_ref()
            .ok_or_else(|| DomainError::InternalError("review missing on decision".to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = $2, reviewer_id = $3, reviewed_at = $4, review_notes = $5, updated_at = $4
            WHERE id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(application.id.into_inner())
        .bind(application.status.as_str())
        .bind(review.reviewer_id.into_inner())
        .bind(review.reviewed_at)
        .bind(review.notes.as_deref())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyReviewed(application.id));
        }

        Ok(())
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(application_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE user_id = $1 AND status = 'PENDING'"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(application_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<ApplicationStatus>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Application>> {
        let limit = limit.clamp(1, 100);

        let results = match status {
            Some(status) => {
                sqlx::query_as::<_, ApplicationModel>(&format!(
                    "SELECT {APPLICATION_COLUMNS} FROM applications WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status.as_str())
                .bind(limit)
                .bind(offset.max(0))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ApplicationModel>(&format!(
                    "SELECT {APPLICATION_COLUMNS} FROM applications \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset.max(0))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(application_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, status: Option<ApplicationStatus>) -> RepoResult<i64> {
        match status {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE status = $1")
                    .bind(status.as_str())
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)
    }

    #[instrument(skip(self, application), fields(application_id = %application.id))]
    async fn create(&self, application: &Application) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO applications
                (id, user_id, applicant_name, email, desired_role, domain, branch, year, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(application.id.into_inner())
        .bind(application.user_id.into_inner())
        .bind(&application.applicant_name)
        .bind(&application.email)
        .bind(application.desired_role.as_str())
        .bind(application.domain.as_str())
        .bind(&application.branch)
        .bind(application.year)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ApplicationPending))?;

        Ok(())
    }

    /// Approve in one transaction: status flip, member insert, user promotion.
    #[instrument(skip(self, application, member), fields(application_id = %application.id))]
    async fn approve(&self, application: &Application, member: &Member) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::mark_reviewed(&mut tx, application).await?;

        sqlx::query(
            r#"
            INSERT INTO members (id, name, role, domain, year, email, phone, status, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(member.id.into_inner())
        .bind(&member.name)
        .bind(member.role.as_str())
        .bind(member.domain.as_str())
        .bind(member.year)
        .bind(&member.email)
        .bind(member.phone.as_deref())
        .bind(member.status.as_str())
        .bind(member.user_id.map(Snowflake::into_inner))
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        sqlx::query(
            r#"
            UPDATE users
            SET role = $2, member_id = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(application.user_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, application), fields(application_id = %application.id))]
    async fn reject(&self, application: &Application) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::mark_reviewed(&mut tx, application).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
