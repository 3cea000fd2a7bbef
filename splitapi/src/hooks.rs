//! Request lifecycle state for query and mutation endpoints.
//!
//! A hook owns one endpoint invocation's state and publishes every change
//! through a `tokio::sync::watch` channel. Hooks never return errors: a
//! failed request shows up as [`QueryStatus::Rejected`] with the error in
//! [`QueryState::error`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::Display;
use tokio::sync::watch;

use crate::client::Api;
use crate::endpoint::{MutationEndpoint, QueryEndpoint};
use crate::error::QueryError;

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum QueryStatus {
    /// Nothing has been requested yet.
    #[default]
    Uninitialized,
    /// A request is in flight.
    Pending,
    /// The last request succeeded.
    Fulfilled,
    /// The last request failed.
    Rejected,
}

/// Snapshot of a hook's state.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Lifecycle status.
    pub status: QueryStatus,
    /// Data of the last successful request. Kept while refetching and after
    /// a later failure.
    pub data: Option<T>,
    /// Error of the last request, if it failed.
    pub error: Option<Arc<QueryError>>,
    /// Whether `data` was served from the cache.
    pub from_cache: bool,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            from_cache: false,
        }
    }
}

impl<T> QueryState<T> {
    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    /// Returns `true` if the last request succeeded.
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Fulfilled
    }

    /// Returns `true` if the last request failed.
    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Rejected
    }

    /// Returns `true` if nothing has been requested.
    pub fn is_uninitialized(&self) -> bool {
        self.status == QueryStatus::Uninitialized
    }

    fn pending(&self) -> Self
    where
        T: Clone,
    {
        Self {
            status: QueryStatus::Pending,
            data: self.data.clone(),
            error: None,
            from_cache: self.from_cache,
        }
    }

    fn settled(&self, result: Result<(T, bool), QueryError>) -> Self
    where
        T: Clone,
    {
        match result {
            Ok((data, from_cache)) => Self {
                status: QueryStatus::Fulfilled,
                data: Some(data),
                error: None,
                from_cache,
            },
            Err(error) => Self {
                status: QueryStatus::Rejected,
                data: self.data.clone(),
                error: Some(Arc::new(error)),
                from_cache: false,
            },
        }
    }
}

/// Lifecycle state of one query endpoint invocation.
///
/// ## Examples
///
/// ```rust,no_run
/// # use splitapi::{Api, QueryEndpoint, QueryHook};
/// # async fn run(api: Api, get_users: QueryEndpoint<(), Vec<serde_json::Value>>) {
/// let hook = QueryHook::start(api, get_users, ()).await;
///
/// let state = hook.state();
/// if state.is_success() {
///     println!("{} users", state.data.unwrap_or_default().len());
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct QueryHook<A, R> {
    api: Api,
    endpoint: QueryEndpoint<A, R>,
    arg: Option<A>,
    state: watch::Sender<QueryState<R>>,
}

impl<A, R> QueryHook<A, R>
where
    A: Serialize,
    R: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Creates a hook and fetches `arg` right away.
    pub async fn start(api: Api, endpoint: QueryEndpoint<A, R>, arg: A) -> Self {
        let mut hook = Self::lazy(api, endpoint);
        hook.fetch(arg).await;
        hook
    }

    /// Creates a hook that fetches nothing until [`QueryHook::fetch`].
    pub fn lazy(api: Api, endpoint: QueryEndpoint<A, R>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            api,
            endpoint,
            arg: None,
            state,
        }
    }

    /// Fetches `arg`, using the cache, and remembers it for [`QueryHook::refetch`].
    pub async fn fetch(&mut self, arg: A) -> QueryState<R> {
        self.arg = Some(arg);
        self.run(true).await
    }

    /// Fetches the last argument again, bypassing the cache.
    ///
    /// Does nothing if nothing was fetched yet.
    pub async fn refetch(&self) -> QueryState<R> {
        self.run(false).await
    }

    /// Current state.
    pub fn state(&self) -> QueryState<R> {
        self.state.borrow().clone()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<R>> {
        self.state.subscribe()
    }

    /// The argument of the last fetch.
    pub fn arg(&self) -> Option<&A> {
        self.arg.as_ref()
    }

    async fn run(&self, use_cache: bool) -> QueryState<R> {
        let Some(arg) = &self.arg else {
            return self.state();
        };

        let pending = self.state.borrow().pending();
        self.state.send_replace(pending);

        let result = self.api.run_query(&self.endpoint, arg, use_cache).await;
        if let Err(error) = &result {
            tracing::debug!(endpoint = self.endpoint.name(), %error, "Query rejected");
        }

        let settled = self.state.borrow().settled(result);
        self.state.send_replace(settled.clone());
        settled
    }
}

/// Lifecycle state of a mutation endpoint.
#[derive(Debug)]
pub struct MutationHook<A, R> {
    api: Api,
    endpoint: MutationEndpoint<A, R>,
    state: watch::Sender<QueryState<R>>,
}

impl<A, R> MutationHook<A, R>
where
    R: DeserializeOwned + Clone,
{
    /// Creates an idle hook.
    pub fn new(api: Api, endpoint: MutationEndpoint<A, R>) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        Self {
            api,
            endpoint,
            state,
        }
    }

    /// Runs the mutation with `arg`.
    pub async fn trigger(&self, arg: &A) -> QueryState<R> {
        let pending = self.state.borrow().pending();
        self.state.send_replace(pending);

        let result = self
            .api
            .mutate(&self.endpoint, arg)
            .await
            .map(|data| (data, false));
        if let Err(error) = &result {
            tracing::debug!(endpoint = self.endpoint.name(), %error, "Mutation rejected");
        }

        let settled = self.state.borrow().settled(result);
        self.state.send_replace(settled.clone());
        settled
    }

    /// Current state.
    pub fn state(&self) -> QueryState<R> {
        self.state.borrow().clone()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<R>> {
        self.state.subscribe()
    }

    /// Forgets the last result.
    pub fn reset(&self) {
        self.state.send_replace(QueryState::default());
    }
}
