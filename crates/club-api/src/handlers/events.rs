//! Event handlers
//!
//! Events are publicly listable; registration requires a token.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    ApiResponse, CreateEventRequest, EventResponse, EventService, PaginatedResponse,
    RegistrationResponse, UpdateEventRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, EventIdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Event list query parameters
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    /// Only events that have not started yet
    #[serde(default)]
    pub upcoming: Option<bool>,
}

/// Create an event
///
/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<ApiResponse<EventResponse>>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(&auth.user, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List events
///
/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<EventListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let (events, total) = service
        .list_events(
            auth.user(),
            query.upcoming.unwrap_or(false),
            pagination.limit,
            pagination.offset,
        )
        .await?;
    Ok(Json(PaginatedResponse::new(
        events,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a single event
///
/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<ApiResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(auth.user(), path.event_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Update an event
///
/// PATCH /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<ApiResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service
        .update_event(&auth.user, path.event_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Delete an event
///
/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(&auth.user, path.event_id()?).await?;
    Ok(NoContent)
}

/// Register for an event
///
/// POST /events/{event_id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<ApiResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.register(&auth.user, path.event_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Cancel a registration
///
/// DELETE /events/{event_id}/register
pub async fn unregister(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<ApiResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.unregister(&auth.user, path.event_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// List an event's registrations
///
/// GET /events/{event_id}/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<EventIdPath>,
) -> ApiResult<Json<ApiResponse<Vec<RegistrationResponse>>>> {
    let service = EventService::new(state.service_context());
    let response = service
        .list_registrations(&auth.user, path.event_id()?)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}
