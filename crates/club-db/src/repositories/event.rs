//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::{Event, Registration};
use club_core::error::DomainError;
use club_core::traits::{EventRepository, RepoResult};
use club_core::value_objects::Snowflake;

use crate::mappers::event_with_registrations;
use crate::models::{EventModel, RegistrationModel};

use super::error::{map_db_error, map_unique_violation};

const EVENT_COLUMNS: &str = "id, title, description, location, starts_at, ends_at, capacity, \
     created_by, created_at, updated_at";

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_registrations(&self, event_id: i64) -> RepoResult<Vec<RegistrationModel>> {
        sqlx::query_as::<_, RegistrationModel>(
            r#"
            SELECT event_id, user_id, registered_at
            FROM event_registrations
            WHERE event_id = $1
            ORDER BY registered_at
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => {
                let registrations = self.load_registrations(model.id).await?;
                Ok(Some(event_with_registrations(model, registrations)?))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, upcoming_only: bool, limit: i64, offset: i64) -> RepoResult<Vec<Event>> {
        let limit = limit.clamp(1, 100);

        let results = if upcoming_only {
            sqlx::query_as::<_, EventModel>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events WHERE starts_at >= NOW() \
                 ORDER BY starts_at LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, EventModel>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events ORDER BY starts_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_db_error)?;

        let mut events = Vec::with_capacity(results.len());
        for model in results {
            let registrations = self.load_registrations(model.id).await?;
            events.push(event_with_registrations(model, registrations)?);
        }

        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count(&self, upcoming_only: bool) -> RepoResult<i64> {
        let query = if upcoming_only {
            "SELECT COUNT(*) FROM events WHERE starts_at >= NOW()"
        } else {
            "SELECT COUNT(*) FROM events"
        };

        sqlx::query_scalar::<_, i64>(query)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, location, starts_at, ends_at, capacity, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.location.as_deref())
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity.map(|c| c as i32))
        .bind(event.created_by.into_inner())
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn update(&self, event: &Event) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, starts_at = $5,
                ends_at = $6, capacity = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(event.id.into_inner())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.location.as_deref())
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.capacity.map(|c| c as i32))
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(event.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id));
        }

        Ok(())
    }

    /// The primary key on (event_id, user_id) enforces one registration per
    /// user even under concurrent requests.
    #[instrument(skip(self))]
    async fn register(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO event_registrations (event_id, user_id, registered_at) VALUES ($1, $2, NOW())",
        )
        .bind(event_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyRegistered(event_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unregister(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result =
            sqlx::query("DELETE FROM event_registrations WHERE event_id = $1 AND user_id = $2")
                .bind(event_id.into_inner())
                .bind(user_id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn registrations(&self, event_id: Snowflake) -> RepoResult<Vec<Registration>> {
        let models = self.load_registrations(event_id.into_inner()).await?;

        Ok(models
            .into_iter()
            .map(|r| Registration {
                user_id: Snowflake::new(r.user_id),
                registered_at: r.registered_at,
            })
            .collect())
    }
}
