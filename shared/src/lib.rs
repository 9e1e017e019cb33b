//! Shared types for the swatch fulfillment service
//!
//! Domain models, error types and response envelopes used by the service
//! crate and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
