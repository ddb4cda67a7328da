//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL, IDENTITY_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_me_provisions_account_on_first_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let persona = Persona::unique();

    let response = server.get_auth("/api/v1/users/@me", &persona.token()).await.unwrap();
    let body: Envelope<CurrentUser> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.success);
    assert_eq!(body.data.subject, persona.subject);
    assert_eq!(body.data.email, persona.email);
    assert_eq!(body.data.role, "USER");
    assert!(body.data.member_id.is_none());
    assert!(body.data.permissions.is_empty());
}

#[tokio::test]
async fn test_me_requires_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get_auth("/api/v1/users/@me", "not-a-real-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Application Workflow Tests
// ============================================================================

#[tokio::test]
async fn test_application_approve_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Applicant
    let applicant = Persona::unique();
    let applicant_token = applicant.token();
    server.get_auth("/api/v1/users/@me", &applicant_token).await.unwrap();

    // Reviewer, promoted directly in the database
    let reviewer = Persona::unique();
    let reviewer_token = reviewer.token();
    server.get_auth("/api/v1/users/@me", &reviewer_token).await.unwrap();
    server.set_role(&reviewer.subject, "LEAD").await.unwrap();

    // Submit
    let request = SubmitApplicationRequest::for_persona(&applicant);
    let response = server
        .post_auth("/api/v1/applications", &applicant_token, &request)
        .await
        .unwrap();
    let body: Envelope<ApplicationBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.data.status, "PENDING");
    assert_eq!(body.data.desired_role, "MEMBER");
    let application_id = body.data.id;

    // A second application while one is pending is rejected
    let response = server
        .post_auth("/api/v1/applications", &applicant_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Approve
    let response = server
        .post_auth_empty(
            &format!("/api/v1/applications/{application_id}/approve"),
            &reviewer_token,
        )
        .await
        .unwrap();
    let body: Envelope<ApplicationBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.status, "APPROVED");

    // Approving twice fails
    let response = server
        .post_auth_empty(
            &format!("/api/v1/applications/{application_id}/approve"),
            &reviewer_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // The applicant is now a member with a linked member record
    let response = server.get_auth("/api/v1/users/@me", &applicant_token).await.unwrap();
    let me: Envelope<CurrentUser> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.data.role, "MEMBER");
    assert!(me.data.member_id.is_some());

    // And cannot apply again
    let response = server
        .post_auth("/api/v1/applications", &applicant_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_application_review_requires_permission() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let applicant = Persona::unique();
    let applicant_token = applicant.token();
    server.get_auth("/api/v1/users/@me", &applicant_token).await.unwrap();

    let request = SubmitApplicationRequest::for_persona(&applicant);
    let response = server
        .post_auth("/api/v1/applications", &applicant_token, &request)
        .await
        .unwrap();
    let body: Envelope<ApplicationBody> =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    // A plain user cannot approve, not even their own application
    let response = server
        .post_auth_empty(
            &format!("/api/v1/applications/{}/approve", body.data.id),
            &applicant_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Blog Tests
// ============================================================================

#[tokio::test]
async fn test_blog_moderation_and_upvote_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let author = Persona::unique();
    let author_token = author.token();
    server.get_auth("/api/v1/users/@me", &author_token).await.unwrap();

    let moderator = Persona::unique();
    let moderator_token = moderator.token();
    server.get_auth("/api/v1/users/@me", &moderator_token).await.unwrap();
    server.set_role(&moderator.subject, "CO_LEAD").await.unwrap();

    // Create: enters the moderation queue
    let request = CreateBlogRequest::unique();
    let response = server
        .post_auth("/api/v1/blogs", &author_token, &request)
        .await
        .unwrap();
    let body: Envelope<BlogBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(body.data.status, "PENDING");
    let blog_id = body.data.id;
    let slug = body.data.slug;

    // Pending posts are hidden from anonymous readers
    let response = server.get(&format!("/api/v1/blogs/slug/{slug}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Approve
    let response = server
        .post_auth_empty(&format!("/api/v1/blogs/{blog_id}/approve"), &moderator_token)
        .await
        .unwrap();
    let body: Envelope<BlogBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.status, "APPROVED");

    // Now publicly readable
    let response = server.get(&format!("/api/v1/blogs/slug/{slug}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Upvote toggle: on, then off
    let response = server
        .post_auth_empty(&format!("/api/v1/blogs/{blog_id}/upvote"), &author_token)
        .await
        .unwrap();
    let body: Envelope<UpvoteBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.data.upvoted);
    assert_eq!(body.data.upvotes, 1);

    let response = server
        .post_auth_empty(&format!("/api/v1/blogs/{blog_id}/upvote"), &author_token)
        .await
        .unwrap();
    let body: Envelope<UpvoteBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.data.upvoted);
    assert_eq!(body.data.upvotes, 0);
}

#[tokio::test]
async fn test_blog_update_by_non_author_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let author = Persona::unique();
    let author_token = author.token();
    server.get_auth("/api/v1/users/@me", &author_token).await.unwrap();

    let other = Persona::unique();
    let other_token = other.token();
    server.get_auth("/api/v1/users/@me", &other_token).await.unwrap();

    let request = CreateBlogRequest::unique();
    let response = server
        .post_auth("/api/v1/blogs", &author_token, &request)
        .await
        .unwrap();
    let body: Envelope<BlogBody> = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/blogs/{}", body.data.id),
            &other_token,
            &serde_json::json!({"content": "hijacked"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_event_registration_rejects_duplicates() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let organizer = Persona::unique();
    let organizer_token = organizer.token();
    server.get_auth("/api/v1/users/@me", &organizer_token).await.unwrap();
    server.set_role(&organizer.subject, "LEAD").await.unwrap();

    let attendee = Persona::unique();
    let attendee_token = attendee.token();
    server.get_auth("/api/v1/users/@me", &attendee_token).await.unwrap();

    // Create event
    let request = CreateEventRequest::unique();
    let response = server
        .post_auth("/api/v1/events", &organizer_token, &request)
        .await
        .unwrap();
    let body: Envelope<EventBody> = assert_json(response, StatusCode::CREATED).await.unwrap();
    let event_id = body.data.id;

    // Register
    let response = server
        .post_auth_empty(&format!("/api/v1/events/{event_id}/register"), &attendee_token)
        .await
        .unwrap();
    let body: Envelope<EventBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.registered, Some(true));
    assert_eq!(body.data.registered_count, 1);

    // Duplicate registration is a conflict
    let response = server
        .post_auth_empty(&format!("/api/v1/events/{event_id}/register"), &attendee_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Unregister, then the slot is free again
    let response = server
        .delete_auth(&format!("/api/v1/events/{event_id}/register"), &attendee_token)
        .await
        .unwrap();
    let body: Envelope<EventBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.registered_count, 0);
}

#[tokio::test]
async fn test_event_creation_requires_permission() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let user = Persona::unique();
    let token = user.token();
    server.get_auth("/api/v1/users/@me", &token).await.unwrap();

    let request = CreateEventRequest::unique();
    let response = server.post_auth("/api/v1/events", &token, &request).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Promotion Tests
// ============================================================================

#[tokio::test]
async fn test_promote_requires_admin() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let user = Persona::unique();
    let token = user.token();
    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let me: Envelope<CurrentUser> = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/users/{}/role", me.data.id),
            &token,
            &serde_json::json!({"role": "LEAD"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}
