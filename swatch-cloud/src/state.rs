//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::BoxError;
use crate::config::Config;
use crate::db;
use crate::shopify::{AdminApi, GraphqlAdminClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Admin API client
    pub admin: Arc<dyn AdminApi>,
    /// App secret for webhook HMAC and app proxy signatures
    pub api_secret: Arc<str>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = if config.database_url == "sqlite::memory:" {
            db::connect_in_memory().await?
        } else {
            db::connect(&config.database_url).await?
        };

        let admin = GraphqlAdminClient::new(
            &config.shopify_shop_domain,
            &config.shopify_api_version,
            &config.shopify_admin_access_token,
            std::time::Duration::from_secs(config.upstream_timeout_secs),
        )?;
        tracing::info!(endpoint = admin.endpoint(), "Admin API client ready");

        Ok(Self::with_admin(pool, Arc::new(admin), &config.shopify_api_secret))
    }

    /// State over an existing pool and admin implementation
    pub fn with_admin(pool: SqlitePool, admin: Arc<dyn AdminApi>, api_secret: &str) -> Self {
        Self {
            pool,
            admin,
            api_secret: Arc::from(api_secret),
        }
    }
}
