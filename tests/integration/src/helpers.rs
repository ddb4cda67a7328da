//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting identity
//! tokens, making HTTP requests, and seeding roles directly in the
//! database.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use club_api::{create_app, create_app_state};
use club_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, IdentityConfig,
    MembershipConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
use club_db::PgPool;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// Direct pool for test seeding (role promotion, cleanup)
    pub db: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an OS-assigned port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let db = club_db::create_pool_from_env()
            .await
            .map_err(|e| anyhow::anyhow!("Test pool error: {e}"))?;

        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            db,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a bodyless POST request with auth token
    pub async fn post_auth_empty(&self, path: &str, token: &str) -> Result<Response> {
        self.post_auth(path, token, &serde_json::json!({})).await
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?)
    }

    /// Set a user's role directly, bypassing the API. The account must
    /// already exist (hit an authenticated endpoint once to provision it).
    pub async fn set_role(&self, subject: &str, role: &str) -> Result<()> {
        sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE subject = $1")
            .bind(subject)
            .bind(role)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Build a test configuration from the environment.
///
/// Assembled directly rather than via `AppConfig::from_env` so tests only
/// need `DATABASE_URL` and `IDENTITY_SECRET`; the port in the config is
/// ignored because the server binds an OS-assigned one.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL not set"))?;

    Ok(AppConfig {
        app: AppSettings {
            name: "club-server-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        identity: IdentityConfig {
            secret: std::env::var("IDENTITY_SECRET").ok(),
            api_url: None,
            api_key: None,
        },
        membership: MembershipConfig {
            allowed_email_domain: None,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 100,
            burst: 200,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 1 },
    })
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("IDENTITY_SECRET").is_err() {
        eprintln!("Skipping test: IDENTITY_SECRET not set");
        return false;
    }

    true
}

/// Token claims matching what the identity provider issues
#[derive(Debug, Serialize)]
struct TokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Mint a token for a subject the way the identity provider would
pub fn mint_token(subject: &str, email: &str, name: &str) -> String {
    let secret = std::env::var("IDENTITY_SECRET").expect("IDENTITY_SECRET not set");
    let now = Utc::now().timestamp();
    let claims = TokenClaims {
        sub: subject.to_string(),
        iat: now,
        exp: now + 900,
        email: Some(email.to_string()),
        name: Some(name.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to mint test token")
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
