//! Blog handlers
//!
//! Published posts are publicly readable; everything else requires a
//! token. Moderation endpoints sit next to the post they act on.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    ApiResponse, BlogResponse, BlogService, CreateBlogRequest, PaginatedResponse,
    UpdateBlogRequest, UpvoteResponse,
};
use serde::Deserialize;

use crate::extractors::{AuthUser, BlogIdPath, OptionalAuthUser, Pagination, SlugPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Blog list query parameters
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Create a blog post (enters the moderation queue)
///
/// POST /blogs
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBlogRequest>,
) -> ApiResult<Created<Json<ApiResponse<BlogResponse>>>> {
    let service = BlogService::new(state.service_context());
    let response = service.create_blog(&auth.user, request).await?;
    Ok(Created(Json(ApiResponse::new(response))))
}

/// List blog posts
///
/// GET /blogs
pub async fn list_blogs(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<BlogListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let (blogs, total) = service
        .list_blogs(auth.user(), query.status, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(PaginatedResponse::new(
        blogs,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// List the authenticated user's own posts
///
/// GET /blogs/@me
pub async fn list_own_blogs(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let (blogs, total) = service
        .list_own_blogs(&auth.user, pagination.limit, pagination.offset)
        .await?;
    Ok(Json(PaginatedResponse::new(
        blogs,
        total,
        pagination.limit,
        pagination.offset,
    )))
}

/// Get a post by slug
///
/// GET /blogs/slug/{slug}
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<SlugPath>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.get_by_slug(auth.user(), path.slug()).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Update a post (author only; goes back to the moderation queue)
///
/// PATCH /blogs/{blog_id}
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BlogIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateBlogRequest>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service
        .update_blog(&auth.user, path.blog_id()?, request)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Approve a post from the moderation queue
///
/// POST /blogs/{blog_id}/approve
pub async fn approve_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.approve_blog(&auth.user, path.blog_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Reject a post from the moderation queue
///
/// POST /blogs/{blog_id}/reject
pub async fn reject_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.reject_blog(&auth.user, path.blog_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}

/// Delete a post (author or moderator)
///
/// DELETE /blogs/{blog_id}
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BlogIdPath>,
) -> ApiResult<NoContent> {
    let service = BlogService::new(state.service_context());
    service.delete_blog(&auth.user, path.blog_id()?).await?;
    Ok(NoContent)
}

/// Toggle an upvote on an approved post
///
/// POST /blogs/{blog_id}/upvote
pub async fn toggle_upvote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BlogIdPath>,
) -> ApiResult<Json<ApiResponse<UpvoteResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.toggle_upvote(&auth.user, path.blog_id()?).await?;
    Ok(Json(ApiResponse::new(response)))
}
