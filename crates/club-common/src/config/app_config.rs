//! Environment-driven configuration.
//!
//! Every knob comes from an environment variable; a `.env` file is honored
//! when present. Only `API_PORT` and `DATABASE_URL` are required.

use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub identity: IdentityConfig,
    pub membership: MembershipConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// External identity provider settings.
///
/// Tokens are issued by the provider and verified locally with the shared
/// HS256 secret. Without a secret the server still starts, but every
/// authenticated route rejects with 401.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub secret: Option<String>,
    /// Base URL of the provider's profile API, used to backfill
    /// names and avatars on first login.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MembershipConfig {
    /// When set, applications are only accepted from this email domain.
    pub allowed_email_domain: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

impl AppConfig {
    /// Load the full configuration from the environment.
    ///
    /// # Errors
    /// Fails when `API_PORT` or `DATABASE_URL` is missing or unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: optional("APP_NAME").unwrap_or_else(|| "club-server".to_string()),
                env: parsed("APP_ENV").unwrap_or_default(),
            },
            api: ServerConfig {
                host: optional("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parsed("API_PORT").ok_or(ConfigError::MissingVar("API_PORT"))?,
            },
            database: DatabaseConfig {
                url: optional("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS").unwrap_or(5),
            },
            identity: IdentityConfig {
                secret: optional("IDENTITY_SECRET"),
                api_url: optional("IDENTITY_API_URL"),
                api_key: optional("IDENTITY_API_KEY"),
            },
            membership: MembershipConfig {
                allowed_email_domain: optional("ALLOWED_EMAIL_DOMAIN"),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND").unwrap_or(10),
                burst: parsed("RATE_LIMIT_BURST").unwrap_or(50),
            },
            cors: CorsConfig {
                allowed_origins: optional("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed("WORKER_ID").unwrap_or(0),
            },
        })
    }
}

/// A set-and-nonempty environment variable.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    optional(key).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Production".parse(), Ok(Environment::Production));
        assert_eq!("staging".parse(), Ok(Environment::Staging));
        assert_eq!("DEVELOPMENT".parse(), Ok(Environment::Development));
        assert!("prod".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_classification() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }
}
