//! Request descriptors.
//!
//! Generated endpoint definitions do not talk to the network. They turn an
//! argument into a [`RequestDescriptor`] (method, URL relative to the base
//! URL, query parameters, JSON body) and the client executes it.

use std::fmt::Display;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use splitapi_define::RestMethod;

use crate::error::QueryError;

/// Everything needed to send one request.
///
/// ## Examples
///
/// ```
/// use splitapi::{RequestDescriptor, RestMethod};
///
/// let request = RequestDescriptor::new("/v1/user")
///     .method(RestMethod::Get)
///     .param("page", 2)
///     .opt_param("q", None::<&str>);
///
/// assert_eq!(request.url, "/v1/user");
/// assert_eq!(request.params, vec![("page".to_string(), "2".to_string())]);
/// assert!(request.body.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// URL relative to the client's base URL, or an absolute URL.
    pub url: String,
    /// HTTP method; GET unless set.
    pub method: RestMethod,
    /// Query string parameters, in order.
    pub params: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    /// Creates a GET request for `url` with no parameters and no body.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RestMethod::default(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: RestMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query parameter if `value` is `Some`.
    pub fn opt_param<T: Display>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Appends one query parameter per item (`?tag=a&tag=b`).
    pub fn param_list<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let name = name.into();
        for value in values {
            self.params.push((name.clone(), value.to_string()));
        }
        self
    }

    /// Sets the JSON body.
    ///
    /// ## Errors
    ///
    /// Returns [`QueryError::Serialization`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, QueryError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a value for use as a single path segment.
///
/// Generated code wraps every templated path parameter in this.
///
/// ```
/// assert_eq!(splitapi::path_segment(&"a b/c"), "a%20b%2Fc");
/// assert_eq!(splitapi::path_segment(&42), "42");
/// ```
pub fn path_segment(value: &impl Display) -> String {
    utf8_percent_encode(&value.to_string(), PATH_SEGMENT).to_string()
}
