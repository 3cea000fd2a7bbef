//! Error types for the splitapi runtime.
//!
//! Errors are split by when they happen:
//!
//! - [`ConfigError`] - Building the client or registering endpoints
//! - [`QueryError`] - Executing a request
//!
//! Both are plain `thiserror` enums; neither is retried or recovered by the
//! runtime.

mod config_error;
mod query_error;

pub use config_error::ConfigError;
pub use query_error::QueryError;
