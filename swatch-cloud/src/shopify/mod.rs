//! Commerce platform integration
//!
//! - [`AdminApi`]: the two admin operations the fulfillment chain needs
//! - [`GraphqlAdminClient`]: reqwest implementation over the GraphQL admin API
//! - [`signature`]: webhook and app proxy signature checks

mod admin;
mod graphql;
pub mod signature;

pub use admin::{AdminApi, AdminApiError, CreatedFulfillment, FulfillmentCreate, UserError};
pub use graphql::GraphqlAdminClient;
