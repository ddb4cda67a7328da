//! Authentication extractor
//!
//! Extracts the bearer token issued by the identity provider, verifies
//! it, and resolves the subject to a local user account. The resolved
//! `User` carries the role consulted by every authorization check.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use club_core::User;
use club_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved local user account
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let user = AuthService::new(app_state.service_context())
            .authenticate(bearer.token())
            .await?;

        Ok(AuthUser { user })
    }
}

/// Optional authenticated user
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    /// Borrow the resolved user, if any
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref().map(|auth| &auth.user)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if parts.headers.get(axum::http::header::AUTHORIZATION).is_none() {
            return Ok(OptionalAuthUser(None));
        }

        let auth = AuthUser::from_request_parts(parts, state).await?;
        Ok(OptionalAuthUser(Some(auth)))
    }
}
