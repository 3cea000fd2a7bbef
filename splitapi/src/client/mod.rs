//! The base API client.
//!
//! [`Api`] starts out knowing no endpoints. Generated modules inject theirs
//! through [`Api::inject_endpoints`] and get back a new `Api` that shares
//! this one's HTTP client and cache.

mod executor;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::cache::QueryCache;
use crate::endpoint::QueryEndpoint;
use crate::error::ConfigError;
use crate::registry::{EndpointBuilder, EndpointRegistry, InjectOptions};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default lifetime of cached query results in seconds.
const DEFAULT_KEEP_UNUSED_DATA_FOR_SECS: u64 = 60;

/// Status policy used unless [`ApiBuilder::validate_status`] replaces it.
fn is_success(status: StatusCode) -> bool {
    status.is_success()
}

/// Builder for configuring an [`Api`].
pub struct ApiBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
    keep_unused_data_for: Duration,
    validate_status: fn(StatusCode) -> bool,
}

impl ApiBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            keep_unused_data_for: Duration::from_secs(DEFAULT_KEEP_UNUSED_DATA_FOR_SECS),
            validate_status: is_success,
        }
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use splitapi::Api;
    ///
    /// let api = Api::builder("https://example.com")
    ///     .timeout(Duration::from_secs(60))
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// How long cached query results stay fresh.
    pub fn keep_unused_data_for(mut self, duration: Duration) -> Self {
        self.keep_unused_data_for = duration;
        self
    }

    /// Decides which status codes count as success.
    ///
    /// Responses with any other status become [`QueryError::Status`](crate::QueryError::Status).
    ///
    /// ```
    /// use splitapi::Api;
    ///
    /// // Treat 404 as a successful, empty answer.
    /// let api = Api::builder("https://example.com")
    ///     .validate_status(|status| status.is_success() || status.as_u16() == 404)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn validate_status(mut self, policy: fn(StatusCode) -> bool) -> Self {
        self.validate_status = policy;
        self
    }

    /// Builds the [`Api`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<Api, ConfigError> {
        let base_url = Url::parse(&self.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Api {
            transport: Arc::new(Transport {
                client,
                base_url,
                validate_status: self.validate_status,
            }),
            cache: Arc::new(QueryCache::new(self.keep_unused_data_for)),
            registry: Arc::new(EndpointRegistry::default()),
        })
    }
}

impl fmt::Debug for ApiBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("keep_unused_data_for", &self.keep_unused_data_for)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Transport {
    client: reqwest::Client,
    base_url: Url,
    validate_status: fn(StatusCode) -> bool,
}

/// Async API client with an endpoint registry and a query cache.
///
/// Cloning is cheap and clones share everything.
///
/// ## Examples
///
/// ```rust,no_run
/// use splitapi::{Api, InjectOptions, RequestDescriptor};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let base = Api::builder("http://localhost:5000").build()?;
///
/// let mut build = base.inject_endpoints(InjectOptions::default());
/// let get_users = build.query::<(), Vec<serde_json::Value>, _>("getUsers", |_arg: &()| {
///     Ok(RequestDescriptor::new("/v1/user"))
/// })?;
/// let api = build.finish();
///
/// let users = api.query(&get_users, &()).await?;
/// println!("{} users", users.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Api {
    transport: Arc<Transport>,
    cache: Arc<QueryCache>,
    registry: Arc<EndpointRegistry>,
}

impl Api {
    /// Creates a new builder for configuring a client.
    ///
    /// The URL is parsed by [`ApiBuilder::build`].
    pub fn builder(base_url: impl Into<String>) -> ApiBuilder {
        ApiBuilder::new(base_url)
    }

    /// Creates a client with default settings.
    ///
    /// ## Errors
    ///
    /// See [`ApiBuilder::build`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.transport.base_url
    }

    /// Starts adding endpoints.
    ///
    /// Call [`EndpointBuilder::finish`] to get the extended client.
    pub fn inject_endpoints(&self, options: InjectOptions) -> EndpointBuilder {
        EndpointBuilder::new(self.clone(), options)
    }

    /// Names of all registered endpoints, in registration order.
    pub fn endpoints(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Returns `true` if an endpoint named `name` is registered.
    pub fn has_endpoint(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// The endpoint registry.
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Drops all cached results of `endpoint`. Returns how many were dropped.
    pub fn invalidate<A, R>(&self, endpoint: &QueryEndpoint<A, R>) -> usize {
        self.cache.invalidate(endpoint.name())
    }

    /// Drops all cached results.
    pub fn reset_cache(&self) {
        self.cache.clear();
    }

    pub(crate) fn with_registry(&self, registry: Arc<EndpointRegistry>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cache: Arc::clone(&self.cache),
            registry,
        }
    }
}
