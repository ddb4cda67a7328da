//! Client for the identity provider's profile API
//!
//! Token claims only carry what the provider chose to embed. For fields the
//! token omits (avatar, updated display name) we call the provider's profile
//! endpoint. The client is optional: without `IDENTITY_API_URL` configured,
//! lookups return `Ok(None)` and callers fall back to claim data.

use serde::Deserialize;
use std::time::Duration;

use crate::error::AppError;

/// Profile data returned by the identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// HTTP client for the identity provider's profile endpoint
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl IdentityClient {
    /// Create a client; with `base_url` of `None` all lookups return `Ok(None)`
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(AppError::internal)?;

        Ok(Self {
            http,
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            api_key,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Fetch the profile for a subject
    ///
    /// Returns `Ok(None)` when the client is unconfigured or the provider
    /// does not know the subject.
    ///
    /// # Errors
    /// Returns `ExternalService` on transport failures or non-404 error
    /// responses from the provider.
    pub async fn fetch_profile(&self, subject: &str) -> Result<Option<IdentityProfile>, AppError> {
        let Some(base) = &self.base_url else {
            return Ok(None);
        };

        let url = format!("{base}/users/{subject}");
        let mut request = self.http.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("identity provider: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "identity provider returned {}",
                response.status()
            )));
        }

        let profile = response
            .json::<IdentityProfile>()
            .await
            .map_err(|e| AppError::ExternalService(format!("identity provider: {e}")))?;

        Ok(Some(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_returns_none() {
        let client = IdentityClient::new(None, None).unwrap();
        assert!(!client.is_configured());

        let profile = client.fetch_profile("idp-user-42").await.unwrap();
        assert!(profile.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            IdentityClient::new(Some("https://id.example.edu/api/".to_string()), None).unwrap();
        assert!(client.is_configured());
        assert_eq!(
            client.base_url.as_deref(),
            Some("https://id.example.edu/api")
        );
    }
}
