//! Membership application handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    ApiResponse, ApplicationResponse, ApplicationService, PaginatedResponse,
    ReviewApplicationRequest, SubmitApplicationRequest,
};
use serde::Deserialize;

use crate::extractors::{ApplicationIdPath, AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Application list query parameters
#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Submit a membership application
///
/// POST /applications
pub async fn submit_application(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitApplicationRequest>,
) -> ApiResult<Created<Json<ApiResponse<ApplicationResponse>>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.submit(&auth.user, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List applications for review
///
/// GET /applications
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ApplicationListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let (applications, total) = service
        .list_applications(&auth.user, query.status, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(PaginatedResponse::new(
        applications,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a single application
///
/// GET /applications/{application_id}
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ApplicationIdPath>,
) -> ApiResult<Json<ApiResponse<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service
        .get_application(&auth.user, path.application_id()?)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Approve an application
///
/// POST /applications/{application_id}/approve
pub async fn approve_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ApplicationIdPath>,
    ValidatedJson(request): ValidatedJson<ReviewApplicationRequest>,
) -> ApiResult<Json<ApiResponse<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service
        .approve(&auth.user, path.application_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Reject an application
///
/// POST /applications/{application_id}/reject
pub async fn reject_application(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ApplicationIdPath>,
    ValidatedJson(request): ValidatedJson<ReviewApplicationRequest>,
) -> ApiResult<Json<ApiResponse<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service
        .reject(&auth.user, path.application_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}
