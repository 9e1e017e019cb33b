//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod fulfillment;
pub mod order;
pub mod scan_log;
pub mod staff;
pub mod webhook;

// Re-exports
pub use fulfillment::*;
pub use order::*;
pub use scan_log::*;
pub use staff::*;
pub use webhook::*;
