//! Bug report handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    ApiResponse, BugResponse, BugService, CreateBugRequest, PaginatedResponse, UpdateBugRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, BugIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Bug list query parameters
#[derive(Debug, Deserialize)]
pub struct BugListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// File a bug report
///
/// POST /bugs
pub async fn create_bug(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBugRequest>,
) -> ApiResult<Created<Json<ApiResponse<BugResponse>>>> {
    let service = BugService::new(state.service_context());
    let response = service.create_bug(&auth.user, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List bug reports
///
/// GET /bugs
pub async fn list_bugs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BugListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<BugResponse>>> {
    let service = BugService::new(state.service_context());
    let (bugs, total) = service
        .list_bugs(&auth.user, query.status, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(PaginatedResponse::new(
        bugs,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a single bug report
///
/// GET /bugs/{bug_id}
pub async fn get_bug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BugIdPath>,
) -> ApiResult<Json<ApiResponse<BugResponse>>> {
    let service = BugService::new(state.service_context());
    let response = service.get_bug(&auth.user, path.bug_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Triage a bug report
///
/// PATCH /bugs/{bug_id}
pub async fn update_bug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BugIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateBugRequest>,
) -> ApiResult<Json<ApiResponse<BugResponse>>> {
    let service = BugService::new(state.service_context());
    let response = service
        .update_bug(&auth.user, path.bug_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Delete a bug report
///
/// DELETE /bugs/{bug_id}
pub async fn delete_bug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BugIdPath>,
) -> ApiResult<NoContent> {
    let service = BugService::new(state.service_context());
    service.delete_bug(&auth.user, path.bug_id()?).await?;
    Ok(NoContent)
}
