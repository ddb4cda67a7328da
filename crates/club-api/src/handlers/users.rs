//! User handlers
//!
//! Endpoints for the authenticated user's own account and for
//! administering user accounts.

use axum::{
    extract::{Path, State},
    Json,
};
use club_service::{
    ApiResponse, CurrentUserResponse, PaginatedResponse, PromoteUserRequest, UserResponse,
    UserService,
};

use crate::extractors::{AuthUser, Pagination, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<CurrentUserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.current_user(&auth.user).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// List user accounts
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let (users, total) = service
        .list_users(&auth.user, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(PaginatedResponse::new(
        users,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a user account by ID
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(&auth.user, path.user_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Change a user's role
///
/// PATCH /users/{user_id}/role
pub async fn promote_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<PromoteUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service
        .promote_user(&auth.user, path.user_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}
