//! Base client the generated endpoints are injected into.

use splitapi::{Api, ConfigError};

/// Default BlockPy server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// The base client with no endpoints, pointed at [`DEFAULT_BASE_URL`].
///
/// ## Errors
///
/// Returns [`ConfigError`] if the client cannot be built.
pub fn empty_split_api() -> Result<Api, ConfigError> {
    empty_split_api_at(DEFAULT_BASE_URL)
}

/// The base client with no endpoints, pointed at `base_url`.
///
/// ## Errors
///
/// Returns [`ConfigError::InvalidUrl`] if `base_url` does not parse.
pub fn empty_split_api_at(base_url: &str) -> Result<Api, ConfigError> {
    Api::builder(base_url).build()
}
