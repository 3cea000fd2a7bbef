//! Request execution errors.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from executing an endpoint.
///
/// The runtime never maps a status code onto a declared error shape. When a
/// response is rejected, the raw status and body are kept so the caller can
/// decode them with [`QueryError::data_as`].
///
/// ## Examples
///
/// ```
/// use splitapi::QueryError;
///
/// #[derive(serde::Deserialize)]
/// struct Error {
///     message: String,
/// }
///
/// let err = QueryError::Status {
///     status: 500,
///     data: serde_json::json!({ "message": "internal error" }),
///     text: r#"{"message":"internal error"}"#.to_string(),
/// };
///
/// assert_eq!(err.status(), Some(500));
/// assert_eq!(err.data_as::<Error>().unwrap().message, "internal error");
/// ```
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request never produced a response (network, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered with a status the client does not accept.
    #[error("HTTP {status}: {text}")]
    Status {
        /// The HTTP status code returned.
        status: u16,
        /// The body parsed as JSON, or `null` if it is not JSON.
        data: serde_json::Value,
        /// The raw body.
        text: String,
    },

    /// An accepted response body did not match the expected type.
    #[error("Failed to parse response (HTTP {status}): {source}")]
    Parsing {
        /// The HTTP status code returned.
        status: u16,
        /// The raw body.
        text: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request argument could not be serialized.
    #[error("Failed to serialize request: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint is not registered on the client it was executed with.
    #[error("Endpoint not registered: {name}")]
    UnknownEndpoint {
        /// The endpoint name.
        name: String,
    },
}

impl QueryError {
    /// Returns the HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Parsing { status, .. } => Some(*status),
            Self::Fetch(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns the rejected response body as JSON.
    ///
    /// `None` unless this is a [`QueryError::Status`].
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Status { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Decodes the rejected response body into `T`.
    ///
    /// Returns `None` if there is no body or it does not have that shape.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.data()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct ErrorBody {
        message: String,
        errors: Option<serde_json::Map<String, serde_json::Value>>,
    }

    fn status_error(data: serde_json::Value) -> QueryError {
        QueryError::Status {
            status: 422,
            text: data.to_string(),
            data,
        }
    }

    #[test]
    fn test_status_error_exposes_status_and_data() {
        let err = status_error(serde_json::json!({ "message": "bad" }));
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.data().unwrap()["message"], "bad");
    }

    #[test]
    fn test_data_as_decodes_declared_error_shape() {
        let err = status_error(serde_json::json!({
            "message": "invalid",
            "errors": { "email": ["required"] }
        }));
        let body: ErrorBody = err.data_as().unwrap();
        assert_eq!(body.message, "invalid");
        assert!(body.errors.unwrap().contains_key("email"));
    }

    #[test]
    fn test_data_as_returns_none_for_other_shapes() {
        let err = status_error(serde_json::Value::Null);
        assert!(err.data_as::<ErrorBody>().is_none());
    }

    #[test]
    fn test_parsing_error_has_status_but_no_data() {
        let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = QueryError::Parsing {
            status: 200,
            text: "not json".to_string(),
            source,
        };
        assert_eq!(err.status(), Some(200));
        assert!(err.data().is_none());
        assert!(err.to_string().starts_with("Failed to parse response (HTTP 200)"));
    }

    #[test]
    fn test_unknown_endpoint_display() {
        let err = QueryError::UnknownEndpoint {
            name: "getUsers".to_string(),
        };
        assert_eq!(err.to_string(), "Endpoint not registered: getUsers");
        assert_eq!(err.status(), None);
    }
}
