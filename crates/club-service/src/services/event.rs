//! Event service
//!
//! Events are publicly listable; mutation is gated by `MANAGE_EVENTS`.
//! Registration enforces capacity and rejects duplicates, with the
//! composite primary key as the backstop under concurrency.

use club_core::{Event, Permissions, Snowflake, User};
use tracing::{info, instrument};

use crate::dto::{
    mappers::event_response, CreateEventRequest, EventResponse, RegistrationResponse,
    UpdateEventRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an event
    #[instrument(skip(self, actor, request))]
    pub async fn create_event(
        &self,
        actor: &User,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        permission::require(actor, Permissions::MANAGE_EVENTS)?;

        if let Some(ends_at) = request.ends_at {
            if ends_at <= request.starts_at {
                return Err(ServiceError::validation("event must end after it starts"));
            }
        }

        let event = Event::new(
            self.ctx.generate_id(),
            request.title,
            request.description,
            request.location,
            request.starts_at,
            request.ends_at,
            request.capacity,
            actor.id,
        );
        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, actor_id = %actor.id, "Event created");

        Ok(event_response(&event, Some(actor.id)))
    }

    /// List events ordered by start time
    #[instrument(skip(self, viewer))]
    pub async fn list_events(
        &self,
        viewer: Option<&User>,
        upcoming_only: bool,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<EventResponse>, i64)> {
        let viewer_id = viewer.map(|u| u.id);
        let events = self
            .ctx
            .event_repo()
            .list(upcoming_only, limit, offset)
            .await?;
        let total = self.ctx.event_repo().count(upcoming_only).await?;

        Ok((
            events.iter().map(|e| event_response(e, viewer_id)).collect(),
            total,
        ))
    }

    /// Get a single event with its registration count
    #[instrument(skip(self, viewer))]
    pub async fn get_event(
        &self,
        viewer: Option<&User>,
        event_id: Snowflake,
    ) -> ServiceResult<EventResponse> {
        let event = self.find_event(event_id).await?;
        Ok(event_response(&event, viewer.map(|u| u.id)))
    }

    /// Update an event
    #[instrument(skip(self, actor, request))]
    pub async fn update_event(
        &self,
        actor: &User,
        event_id: Snowflake,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        permission::require(actor, Permissions::MANAGE_EVENTS)?;

        let mut event = self.find_event(event_id).await?;

        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(location) = request.location {
            event.location = Some(location);
        }
        if let Some(starts_at) = request.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = request.ends_at {
            event.ends_at = Some(ends_at);
        }
        if let Some(capacity) = request.capacity {
            if (capacity as usize) < event.registration_count() {
                return Err(ServiceError::validation(
                    "capacity cannot be lower than current registrations",
                ));
            }
            event.capacity = Some(capacity);
        }
        if let Some(ends_at) = event.ends_at {
            if ends_at <= event.starts_at {
                return Err(ServiceError::validation("event must end after it starts"));
            }
        }
        event.updated_at = chrono::Utc::now();

        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event.id, actor_id = %actor.id, "Event updated");

        Ok(event_response(&event, Some(actor.id)))
    }

    /// Delete an event and its registrations
    #[instrument(skip(self, actor))]
    pub async fn delete_event(&self, actor: &User, event_id: Snowflake) -> ServiceResult<()> {
        permission::require(actor, Permissions::MANAGE_EVENTS)?;

        let event = self.find_event(event_id).await?;
        self.ctx.event_repo().delete(event.id).await?;

        info!(event_id = %event.id, actor_id = %actor.id, "Event deleted");

        Ok(())
    }

    /// Register the caller for an event. Full events and duplicate
    /// registrations are rejected with a conflict.
    #[instrument(skip(self, actor))]
    pub async fn register(
        &self,
        actor: &User,
        event_id: Snowflake,
    ) -> ServiceResult<EventResponse> {
        let mut event = self.find_event(event_id).await?;

        // The entity check covers capacity and the common duplicate case;
        // the unique constraint in the repository closes the race.
        event.register(actor.id)?;
        self.ctx.event_repo().register(event.id, actor.id).await?;

        info!(event_id = %event.id, user_id = %actor.id, "Registered for event");

        Ok(event_response(&event, Some(actor.id)))
    }

    /// Remove the caller's registration
    #[instrument(skip(self, actor))]
    pub async fn unregister(
        &self,
        actor: &User,
        event_id: Snowflake,
    ) -> ServiceResult<EventResponse> {
        let mut event = self.find_event(event_id).await?;

        if !event.unregister(actor.id) {
            return Err(ServiceError::not_found("Registration", event_id.to_string()));
        }
        self.ctx.event_repo().unregister(event.id, actor.id).await?;

        info!(event_id = %event.id, user_id = %actor.id, "Unregistered from event");

        Ok(event_response(&event, Some(actor.id)))
    }

    /// List an event's registrations (admin only)
    #[instrument(skip(self, actor))]
    pub async fn list_registrations(
        &self,
        actor: &User,
        event_id: Snowflake,
    ) -> ServiceResult<Vec<RegistrationResponse>> {
        permission::require(actor, Permissions::MANAGE_EVENTS)?;

        let event = self.find_event(event_id).await?;
        let registrations = self.ctx.event_repo().registrations(event.id).await?;

        Ok(registrations.iter().map(RegistrationResponse::from).collect())
    }

    async fn find_event(&self, event_id: Snowflake) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))
    }
}
