//! trendstitch-middleware
//!
//! Connector wrappers and the builder that layers them around a raw connector.

mod builder;
mod retry;

pub use crate::builder::ConnectorBuilder;
pub use crate::retry::{RetryMiddleware, RetryingConnector};
