//! Authentication service
//!
//! Tokens are minted by the external identity provider; this service only
//! verifies them and maps the subject claim onto a local user account.
//! First-time subjects get an account provisioned on the fly, enriched
//! from the provider's profile endpoint when one is configured.

use club_common::{IdentityClaims, IdentityProfile};
use club_core::User;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify a bearer token and resolve it to a local user account,
    /// provisioning one on first login.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.token_verifier().verify(token)?;

        match self.ctx.user_repo().find_by_subject(&claims.sub).await? {
            Some(user) => self.refresh_existing(user, &claims).await,
            None => self.provision(&claims).await,
        }
    }

    /// Create a local account for a subject seen for the first time.
    ///
    /// Profile fields come from the provider's profile endpoint when it is
    /// configured, with the token claims as fallback. A token that carries
    /// no email and no reachable profile cannot be provisioned.
    async fn provision(&self, claims: &IdentityClaims) -> ServiceResult<User> {
        let profile = self.fetch_profile(&claims.sub).await;

        let email = profile
            .as_ref()
            .and_then(|p| p.email.clone())
            .or_else(|| claims.email.clone())
            .ok_or_else(|| {
                ServiceError::validation("identity token carries no email and no profile is available")
            })?;
        let name = profile
            .as_ref()
            .and_then(|p| p.name.clone())
            .or_else(|| claims.name.clone())
            .unwrap_or_else(|| email.clone());
        let avatar = profile.and_then(|p| p.avatar);

        let user = User::new(self.ctx.generate_id(), claims.sub.clone(), email, name, avatar);
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, subject = %user.subject, "Provisioned user on first login");

        Ok(user)
    }

    /// Keep a known account in sync with what the provider says now.
    async fn refresh_existing(
        &self,
        mut user: User,
        claims: &IdentityClaims,
    ) -> ServiceResult<User> {
        let name = claims.name.clone().unwrap_or_else(|| user.name.clone());
        let email = claims.email.clone().unwrap_or_else(|| user.email.clone());

        if name != user.name || email != user.email {
            user.refresh_profile(name, email, user.avatar.clone());
            self.ctx.user_repo().update(&user).await?;
            debug!(user_id = %user.id, "Refreshed user profile from token claims");
        }

        Ok(user)
    }

    /// Best-effort profile lookup; a provider outage must not block login.
    async fn fetch_profile(&self, subject: &str) -> Option<IdentityProfile> {
        if !self.ctx.identity_client().is_configured() {
            return None;
        }
        match self.ctx.identity_client().fetch_profile(subject).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(subject = %subject, error = %err, "Identity profile lookup failed");
                None
            }
        }
    }
}
