//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Application, ApplicationStatus, Blog, BlogStatus, Bug, BugStatus, Event, Member, Registration,
    User,
};
use crate::error::DomainError;
use crate::value_objects::{ClubDomain, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by identity-provider subject
    async fn find_by_subject(&self, subject: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// List users, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Total user count
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Member Repository
// ============================================================================

/// Directory filter options
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    pub domain: Option<ClubDomain>,
    pub year: Option<i32>,
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    /// Find the member record linked to a user account
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Member>>;

    /// List members matching the filter, newest first
    async fn list(&self, filter: &MemberFilter, limit: i64, offset: i64)
        -> RepoResult<Vec<Member>>;

    /// Count members matching the filter
    async fn count(&self, filter: &MemberFilter) -> RepoResult<i64>;

    /// Create a new member
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Delete a member
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>>;

    /// Find a user's pending application, if any
    async fn find_pending_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Application>>;

    /// List applications, optionally filtered by status, newest first
    async fn list(
        &self,
        status: Option<ApplicationStatus>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Application>>;

    /// Count applications, optionally filtered by status
    async fn count(&self, status: Option<ApplicationStatus>) -> RepoResult<i64>;

    /// Create a new application
    async fn create(&self, application: &Application) -> RepoResult<()>;

    /// Atomically approve an application: mark it approved, insert the member
    /// record, and promote the applicant's user account. The status change is
    /// guarded so that only one concurrent reviewer can win; the loser gets
    /// `DomainError::AlreadyReviewed`.
    async fn approve(&self, application: &Application, member: &Member) -> RepoResult<()>;

    /// Mark an application rejected, guarded the same way as `approve`
    async fn reject(&self, application: &Application) -> RepoResult<()>;
}

// ============================================================================
// Blog Repository
// ============================================================================

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find blog by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>>;

    /// Find blog by slug
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>>;

    /// Check whether a slug is already taken
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// List blogs, optionally filtered by status and/or author, newest first
    async fn list(
        &self,
        status: Option<BlogStatus>,
        author_id: Option<Snowflake>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Blog>>;

    /// Count blogs matching the same filters as `list`
    async fn count(
        &self,
        status: Option<BlogStatus>,
        author_id: Option<Snowflake>,
    ) -> RepoResult<i64>;

    /// Create a new blog
    async fn create(&self, blog: &Blog) -> RepoResult<()>;

    /// Update an existing blog
    async fn update(&self, blog: &Blog) -> RepoResult<()>;

    /// Delete a blog and its upvotes
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Toggle a user's upvote; returns (now_upvoted, new_count)
    async fn toggle_upvote(&self, blog_id: Snowflake, user_id: Snowflake)
        -> RepoResult<(bool, i64)>;
}

// ============================================================================
// Bug Repository
// ============================================================================

#[async_trait]
pub trait BugRepository: Send + Sync {
    /// Find bug by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Bug>>;

    /// List bugs, optionally filtered by status, newest first
    async fn list(&self, status: Option<BugStatus>, limit: i64, offset: i64)
        -> RepoResult<Vec<Bug>>;

    /// Count bugs, optionally filtered by status
    async fn count(&self, status: Option<BugStatus>) -> RepoResult<i64>;

    /// Create a new bug report
    async fn create(&self, bug: &Bug) -> RepoResult<()>;

    /// Update an existing bug report
    async fn update(&self, bug: &Bug) -> RepoResult<()>;

    /// Delete a bug report
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID (registrations included)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Event>>;

    /// List events ordered by start time, upcoming first
    async fn list(&self, upcoming_only: bool, limit: i64, offset: i64) -> RepoResult<Vec<Event>>;

    /// Count events
    async fn count(&self, upcoming_only: bool) -> RepoResult<i64>;

    /// Create a new event
    async fn create(&self, event: &Event) -> RepoResult<()>;

    /// Update an existing event
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Delete an event and its registrations
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Register a user; `DomainError::AlreadyRegistered` on duplicate
    async fn register(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Remove a registration; returns whether one existed
    async fn unregister(&self, event_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// List registrations for an event
    async fn registrations(&self, event_id: Snowflake) -> RepoResult<Vec<Registration>>;
}
