//! Service configuration

use crate::BoxError;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// App secret: signs order webhooks and app proxy requests
    pub shopify_api_secret: String,
    /// Store domain the admin client talks to (`example.myshopify.com`)
    pub shopify_shop_domain: String,
    /// Admin API access token
    pub shopify_admin_access_token: String,
    /// Admin API version segment
    pub shopify_api_version: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout_secs: u64,
    /// Emit JSON log lines instead of the pretty format
    pub log_json: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://swatch.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: environment.clone(),
            shopify_api_secret: Self::require_secret("SHOPIFY_API_SECRET", &environment)?,
            shopify_shop_domain: std::env::var("SHOPIFY_SHOP_DOMAIN").unwrap_or_default(),
            shopify_admin_access_token: Self::require_secret(
                "SHOPIFY_ADMIN_ACCESS_TOKEN",
                &environment,
            )?,
            shopify_api_version: std::env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| "2025-01".into()),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            log_json: std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
