//! Service context - dependency container for services
//!
//! Holds all repositories and shared infrastructure needed by services.

use std::sync::Arc;

use club_common::auth::{IdentityClient, TokenVerifier};
use club_common::config::MembershipConfig;
use club_core::traits::{
    ApplicationRepository, BlogRepository, BugRepository, EventRepository, MemberRepository,
    UserRepository,
};
use club_core::SnowflakeGenerator;
use club_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The identity-provider token verifier and profile client
/// - Snowflake generator for ID generation
/// - Membership rules from configuration
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    member_repo: Arc<dyn MemberRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    bug_repo: Arc<dyn BugRepository>,
    event_repo: Arc<dyn EventRepository>,

    // Identity provider
    token_verifier: Arc<TokenVerifier>,
    identity_client: Arc<IdentityClient>,

    // Configuration
    membership: MembershipConfig,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        member_repo: Arc<dyn MemberRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        bug_repo: Arc<dyn BugRepository>,
        event_repo: Arc<dyn EventRepository>,
        token_verifier: Arc<TokenVerifier>,
        identity_client: Arc<IdentityClient>,
        membership: MembershipConfig,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            member_repo,
            application_repo,
            blog_repo,
            bug_repo,
            event_repo,
            token_verifier,
            identity_client,
            membership,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the blog repository
    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    /// Get the bug repository
    pub fn bug_repo(&self) -> &dyn BugRepository {
        self.bug_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    // === Identity Provider ===

    /// Get the token verifier
    pub fn token_verifier(&self) -> &TokenVerifier {
        self.token_verifier.as_ref()
    }

    /// Get the identity profile client
    pub fn identity_client(&self) -> &IdentityClient {
        self.identity_client.as_ref()
    }

    // === Configuration ===

    /// Get the membership rules
    pub fn membership(&self) -> &MembershipConfig {
        &self.membership
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> club_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("identity", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    blog_repo: Option<Arc<dyn BlogRepository>>,
    bug_repo: Option<Arc<dyn BugRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    token_verifier: Option<Arc<TokenVerifier>>,
    identity_client: Option<Arc<IdentityClient>>,
    membership: MembershipConfig,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            member_repo: None,
            application_repo: None,
            blog_repo: None,
            bug_repo: None,
            event_repo: None,
            token_verifier: None,
            identity_client: None,
            membership: MembershipConfig {
                allowed_email_domain: None,
            },
            snowflake_generator: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    pub fn bug_repo(mut self, repo: Arc<dyn BugRepository>) -> Self {
        self.bug_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn token_verifier(mut self, verifier: Arc<TokenVerifier>) -> Self {
        self.token_verifier = Some(verifier);
        self
    }

    pub fn identity_client(mut self, client: Arc<IdentityClient>) -> Self {
        self.identity_client = Some(client);
        self
    }

    pub fn membership(mut self, membership: MembershipConfig) -> Self {
        self.membership = membership;
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            self.blog_repo
                .ok_or_else(|| ServiceError::validation("blog_repo is required"))?,
            self.bug_repo
                .ok_or_else(|| ServiceError::validation("bug_repo is required"))?,
            self.event_repo
                .ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.token_verifier
                .ok_or_else(|| ServiceError::validation("token_verifier is required"))?,
            self.identity_client
                .ok_or_else(|| ServiceError::validation("identity_client is required"))?,
            self.membership,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
