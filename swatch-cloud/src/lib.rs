//! swatch-cloud: scanner fulfillment service
//!
//! - Turns scanner sessions into upstream fulfillments (app proxy API)
//! - Keeps an attributable scan log per fulfillment
//! - Reconciles scan logs with order webhooks
//! - Serves scan log search, stats and per-item attribution

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod fulfillment;
pub mod reconcile;
pub mod shopify;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
