//! API configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which demo app the server binary mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppKind {
    /// Posts, formats and JSON API routes
    #[default]
    Main,
    /// `/ws` echo server
    WebSocket,
    /// Typed RPC server
    Rpc,
    /// Documented routes with Swagger UI
    OpenApi,
    /// Todo list under `/api`
    Pages,
}

impl AppKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::Main => "main",
            AppKind::WebSocket => "websocket",
            AppKind::Rpc => "rpc",
            AppKind::OpenApi => "openapi",
            AppKind::Pages => "pages",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" | "index" => Ok(AppKind::Main),
            "websocket" | "ws" => Ok(AppKind::WebSocket),
            "rpc" | "rpc-server" => Ok(AppKind::Rpc),
            "openapi" | "docs" => Ok(AppKind::OpenApi),
            "pages" | "todo" => Ok(AppKind::Pages),
            other => Err(format!("Unknown app: {}", other)),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// App served by the binary
    pub app: AppKind,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Expose `/metrics`
    pub metrics_enabled: bool,
    /// Demo authentication settings
    pub auth: AuthConfig,
}

/// Credentials and secrets used by the auth demo routes.
///
/// The defaults are demo values and must be overridden outside local use.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for `/login` and `/profile`
    pub jwt_secret: String,
    /// Lifetime of issued tokens
    pub jwt_ttl: Duration,
    /// Login user
    pub demo_username: String,
    pub demo_password: String,
    /// Token accepted by `/auth/bearer`
    pub bearer_token: String,
    /// Credentials accepted by `/auth/basic`
    pub basic_username: String,
    pub basic_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-jwt-secret".to_string(),
            jwt_ttl: Duration::from_secs(60 * 60),
            demo_username: "test".to_string(),
            demo_password: "test".to_string(),
            bearer_token: "bearer-token".to_string(),
            basic_username: "test".to_string(),
            basic_password: "password".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create auth config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: env_or("JWT_SECRET", defaults.jwt_secret),
            jwt_ttl: Duration::from_secs(
                std::env::var("JWT_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.jwt_ttl.as_secs()),
            ),
            demo_username: env_or("DEMO_USERNAME", defaults.demo_username),
            demo_password: env_or("DEMO_PASSWORD", defaults.demo_password),
            bearer_token: env_or("BEARER_TOKEN", defaults.bearer_token),
            basic_username: env_or("BASIC_USERNAME", defaults.basic_username),
            basic_password: env_or("BASIC_PASSWORD", defaults.basic_password),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            app: AppKind::Main,
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
            metrics_enabled: true,
            auth: AuthConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8787),
            app: std::env::var("ROUTELAB_APP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            metrics_enabled: std::env::var("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            auth: AuthConfig::from_env(),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
