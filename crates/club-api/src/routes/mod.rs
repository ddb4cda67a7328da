//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{applications, blogs, bugs, events, health, members, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(application_routes())
        .merge(member_routes())
        .merge(blog_routes())
        .merge(bug_routes())
        .merge(event_routes())
}

/// User account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users", get(users::list_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/role", patch(users::promote_user))
}

/// Membership application routes
fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route("/applications/:application_id", get(applications::get_application))
        .route(
            "/applications/:application_id/approve",
            post(applications::approve_application),
        )
        .route(
            "/applications/:application_id/reject",
            post(applications::reject_application),
        )
}

/// Member directory routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(members::list_members).post(members::create_member))
        .route(
            "/members/:member_id",
            get(members::get_member)
                .patch(members::update_member)
                .delete(members::delete_member),
        )
}

/// Blog routes
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/blogs/@me", get(blogs::list_own_blogs))
        .route("/blogs/slug/:slug", get(blogs::get_blog_by_slug))
        .route(
            "/blogs/:blog_id",
            patch(blogs::update_blog).delete(blogs::delete_blog),
        )
        .route("/blogs/:blog_id/approve", post(blogs::approve_blog))
        .route("/blogs/:blog_id/reject", post(blogs::reject_blog))
        .route("/blogs/:blog_id/upvote", post(blogs::toggle_upvote))
}

/// Bug report routes
fn bug_routes() -> Router<AppState> {
    Router::new()
        .route("/bugs", get(bugs::list_bugs).post(bugs::create_bug))
        .route(
            "/bugs/:bug_id",
            get(bugs::get_bug).patch(bugs::update_bug).delete(bugs::delete_bug),
        )
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route(
            "/events/:event_id/register",
            post(events::register).delete(events::unregister),
        )
        .route("/events/:event_id/registrations", get(events::list_registrations))
}
