//! Request execution with tracing instrumentation.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Span, instrument};
use url::Url;

use super::{Api, Transport};
use crate::cache::cache_key;
use crate::endpoint::{MutationEndpoint, QueryEndpoint};
use crate::error::QueryError;
use crate::method::to_reqwest;
use crate::request::RequestDescriptor;

impl Transport {
    /// Resolves a request URL against the base URL and appends its query.
    ///
    /// Relative URLs are appended to the base URL's path rather than
    /// replacing it, so `http://host/api` + `/v1/user` is `http://host/api/v1/user`.
    /// A query on the base URL is kept ahead of the request's parameters.
    fn resolve_url(&self, request: &RequestDescriptor) -> Result<Url, QueryError> {
        let mut url = if request.url.starts_with("http://") || request.url.starts_with("https://") {
            Url::parse(&request.url)?
        } else {
            let mut url = self.base_url.clone();
            let path = format!(
                "{}/{}",
                url.path().trim_end_matches('/'),
                request.url.trim_start_matches('/')
            );
            url.set_path(&path);
            url.set_fragment(None);
            url
        };

        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }
        Ok(url)
    }
}

/// Parses an accepted response body. An empty body reads as JSON `null`.
fn parse_body<R: DeserializeOwned>(status: StatusCode, body: &Bytes) -> Result<R, QueryError> {
    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    };

    parsed.map_err(|source| QueryError::Parsing {
        status: status.as_u16(),
        text: String::from_utf8_lossy(body).into_owned(),
        source,
    })
}

fn rejected(status: StatusCode, body: &Bytes) -> QueryError {
    QueryError::Status {
        status: status.as_u16(),
        data: serde_json::from_slice(body).unwrap_or(serde_json::Value::Null),
        text: String::from_utf8_lossy(body).into_owned(),
    }
}

impl Api {
    /// Runs a query, serving it from the cache while the cached result is fresh.
    ///
    /// ## Errors
    ///
    /// Returns [`QueryError::UnknownEndpoint`] if the endpoint is not
    /// registered on this client, or any error from executing the request.
    pub async fn query<A, R>(&self, endpoint: &QueryEndpoint<A, R>, arg: &A) -> Result<R, QueryError>
    where
        A: Serialize,
        R: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.run_query(endpoint, arg, true).await.map(|(value, _)| value)
    }

    /// Runs a query against the server, ignoring (and then refreshing) the cache.
    ///
    /// ## Errors
    ///
    /// See [`Api::query`].
    pub async fn query_fresh<A, R>(
        &self,
        endpoint: &QueryEndpoint<A, R>,
        arg: &A,
    ) -> Result<R, QueryError>
    where
        A: Serialize,
        R: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.run_query(endpoint, arg, false).await.map(|(value, _)| value)
    }

    /// Runs a mutation. Mutation results are never cached.
    ///
    /// ## Errors
    ///
    /// See [`Api::query`].
    pub async fn mutate<A, R>(&self, endpoint: &MutationEndpoint<A, R>, arg: &A) -> Result<R, QueryError>
    where
        R: DeserializeOwned,
    {
        self.ensure_registered(endpoint.name())?;
        let request = endpoint.request(arg)?;
        self.execute(endpoint.name(), request).await
    }

    /// Runs a query and reports whether the result came from the cache.
    pub(crate) async fn run_query<A, R>(
        &self,
        endpoint: &QueryEndpoint<A, R>,
        arg: &A,
        use_cache: bool,
    ) -> Result<(R, bool), QueryError>
    where
        A: Serialize,
        R: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.ensure_registered(endpoint.name())?;
        let key = cache_key(endpoint.name(), arg)?;

        if use_cache {
            if let Some(hit) = self.cache.get::<R>(&key) {
                return Ok((hit, true));
            }
        }

        let request = endpoint.request(arg)?;
        let value: R = self.execute(endpoint.name(), request).await?;
        self.cache.insert(key, endpoint.name(), value.clone());
        Ok((value, false))
    }

    fn ensure_registered(&self, name: &str) -> Result<(), QueryError> {
        if self.has_endpoint(name) {
            Ok(())
        } else {
            Err(QueryError::UnknownEndpoint {
                name: name.to_string(),
            })
        }
    }

    /// Sends a request and parses the response.
    #[instrument(
        name = "api_request",
        skip(self, request),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    async fn execute<R>(&self, endpoint: &str, request: RequestDescriptor) -> Result<R, QueryError>
    where
        R: DeserializeOwned,
    {
        Span::current().record("http.method", request.method.to_string().as_str());
        let url = self.transport.resolve_url(&request)?;
        Span::current().record("http.url", url.as_str());

        let mut builder = self.transport.client.request(to_reqwest(request.method), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await?;

        if !(self.transport.validate_status)(status) {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            tracing::debug!(status = status.as_u16(), "Response rejected by status policy");
            return Err(rejected(status, &body));
        }

        Span::current().record("otel.status_code", "OK");
        parse_body(status, &body)
    }
}
