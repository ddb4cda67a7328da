//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use club_core::entities::Member;
use club_core::error::DomainError;
use club_core::traits::{MemberFilter, MemberRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::member_from_model;
use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation};

const MEMBER_COLUMNS: &str =
    "id, name, role, domain, year, email, phone, status, user_id, created_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &MemberFilter) {
        if let Some(domain) = filter.domain {
            builder.push(" AND domain = ").push_bind(domain.as_str());
        }
        if let Some(year) = filter.year {
            builder.push(" AND year = ").push_bind(year);
        }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(member_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(member_from_model).transpose()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        filter: &MemberFilter,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Member>> {
        let limit = limit.clamp(1, 100);

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE 1 = 1"
        ));
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset.max(0));

        let results = builder
            .build_query_as::<MemberModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(member_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &MemberFilter) -> RepoResult<i64> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM members WHERE 1 = 1");
        Self::push_filter(&mut builder, filter);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
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
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $2, role = $3, domain = $4, year = $5, email = $6,
                phone = $7, status = $8, updated_at = $9
            WHERE id = $1
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
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }
}
