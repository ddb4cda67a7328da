//! Member directory handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    ApiResponse, CreateMemberRequest, MemberResponse, MemberService, PaginatedResponse,
    UpdateMemberRequest,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, MemberIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Directory filter query parameters
#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// List the member directory
///
/// GET /members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MemberListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let (members, total) = service
        .list_members(
            &auth.user,
            query.domain,
            query.year,
            pagination.limit,
            pagination.offset,
        )
        .await?;
    Ok(Json(PaginatedResponse::new(
        members,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a single member
///
/// GET /members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<Json<ApiResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.get_member(&auth.user, path.member_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Add a member by direct entry
///
/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<ApiResponse<MemberResponse>>>> {
    let service = MemberService::new(state.service_context());
    let response = service.create_member(&auth.user, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// Update a member record
///
/// PATCH /members/{member_id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<ApiResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service
        .update_member(&auth.user, path.member_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Remove a member
///
/// DELETE /members/{member_id}
pub async fn delete_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.delete_member(&auth.user, path.member_id()?).await?;
    Ok(NoContent)
}
