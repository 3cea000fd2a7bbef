//! Typed endpoint definitions and handles.
//!
//! An [`EndpointDefinition`] binds an operation name to a function that
//! turns an argument of type `A` into a [`RequestDescriptor`]. The response
//! type `R` is carried in the type only. Registration wraps a definition in
//! a [`QueryEndpoint`] or [`MutationEndpoint`] handle, which is what the
//! client's `query` and `mutate` accept.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use splitapi_define::EndpointKind;

use crate::error::QueryError;
use crate::request::RequestDescriptor;

type BuildRequest<A> = dyn Fn(&A) -> Result<RequestDescriptor, QueryError> + Send + Sync;

/// A named operation with argument type `A` and response type `R`.
pub struct EndpointDefinition<A, R> {
    name: Arc<str>,
    kind: EndpointKind,
    build: Arc<BuildRequest<A>>,
    _response: PhantomData<fn() -> R>,
}

impl<A, R> EndpointDefinition<A, R> {
    /// Creates a definition.
    pub fn new<F>(name: &str, kind: EndpointKind, build: F) -> Self
    where
        F: Fn(&A) -> Result<RequestDescriptor, QueryError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            kind,
            build: Arc::new(build),
            _response: PhantomData,
        }
    }

    /// The operation name (e.g. `getUsers`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Query or mutation.
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    /// Builds the request for `arg`.
    ///
    /// ## Errors
    ///
    /// Returns whatever the definition's request function returns, typically
    /// [`QueryError::Serialization`] for an unserializable body.
    pub fn request(&self, arg: &A) -> Result<RequestDescriptor, QueryError> {
        (self.build)(arg)
    }
}

impl<A, R> Clone for EndpointDefinition<A, R> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            kind: self.kind,
            build: Arc::clone(&self.build),
            _response: PhantomData,
        }
    }
}

impl<A, R> fmt::Debug for EndpointDefinition<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered query endpoint.
///
/// Queries are cached by the client and keyed by name and argument.
pub struct QueryEndpoint<A, R>(EndpointDefinition<A, R>);

impl<A, R> QueryEndpoint<A, R> {
    pub(crate) fn new(definition: EndpointDefinition<A, R>) -> Self {
        Self(definition)
    }
}

impl<A, R> Deref for QueryEndpoint<A, R> {
    type Target = EndpointDefinition<A, R>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A, R> Clone for QueryEndpoint<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, R> fmt::Debug for QueryEndpoint<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryEndpoint").field(&self.0).finish()
    }
}

/// Handle to a registered mutation endpoint.
///
/// Mutations are never cached.
pub struct MutationEndpoint<A, R>(EndpointDefinition<A, R>);

impl<A, R> MutationEndpoint<A, R> {
    pub(crate) fn new(definition: EndpointDefinition<A, R>) -> Self {
        Self(definition)
    }
}

impl<A, R> Deref for MutationEndpoint<A, R> {
    type Target = EndpointDefinition<A, R>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A, R> Clone for MutationEndpoint<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, R> fmt::Debug for MutationEndpoint<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutationEndpoint").field(&self.0).finish()
    }
}
