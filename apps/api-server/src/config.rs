//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "postgres")]
use aura_infra::DatabaseConfig;
use aura_infra::{OllamaConfig, RateLimitConfig};

/// Verification settings for identity-provider tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret. Admin routes reject every request when unset.
    pub jwt_secret: Option<String>,
    pub jwt_issuer: Option<String>,
    /// Role claim required on admin routes.
    pub admin_role: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub ollama: OllamaConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = non_empty("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 100),
            min_connections: parsed("DB_MIN_CONNECTIONS", 10),
        });

        let ollama_defaults = OllamaConfig::default();
        let ollama = OllamaConfig {
            base_url: non_empty("OLLAMA_API_URL").unwrap_or(ollama_defaults.base_url),
            model: non_empty("OLLAMA_MODEL").unwrap_or(ollama_defaults.model),
            request_timeout: Duration::from_secs(parsed(
                "OLLAMA_TIMEOUT_SECS",
                ollama_defaults.request_timeout.as_secs(),
            )),
        };

        let auth = AuthConfig {
            jwt_secret: non_empty("AUTH_JWT_SECRET"),
            jwt_issuer: non_empty("AUTH_JWT_ISSUER"),
            admin_role: non_empty("AUTH_ADMIN_ROLE").unwrap_or_else(|| "admin".to_string()),
        };

        let rate_limit = RateLimitConfig {
            max_requests: parsed("RATE_LIMIT_MAX_REQUESTS", 30),
            window: Duration::from_secs(parsed("RATE_LIMIT_WINDOW_SECS", 60)),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            #[cfg(feature = "postgres")]
            database,
            ollama,
            auth,
            rate_limit,
        }
    }
}
