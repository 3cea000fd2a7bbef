//! Client construction and endpoint registration errors.

use thiserror::Error;

/// Errors in client configuration or endpoint registration.
///
/// These errors occur during setup, typically indicating a programmer
/// error or an invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An endpoint with this name is already registered and overriding
    /// was not allowed.
    #[error("Duplicate endpoint: {name}")]
    DuplicateEndpoint {
        /// The endpoint name that was registered twice.
        name: String,
    },

    /// A default header name or value is not valid HTTP.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// What was wrong with the header.
        message: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    /// Creates a duplicate endpoint error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateEndpoint { name: name.into() }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::from(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_duplicate_endpoint() {
        let err = ConfigError::duplicate("getUsers");
        assert_eq!(err.to_string(), "Duplicate endpoint: getUsers");
    }

    #[test]
    fn test_invalid_header() {
        let err = ConfigError::invalid_header("bad name");
        assert_eq!(err.to_string(), "Invalid header: bad name");
    }
}
