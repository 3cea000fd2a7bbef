//! Endpoint registry and injection builder.
//!
//! A client starts with an empty [`EndpointRegistry`]. Generated modules add
//! to it through [`Api::inject_endpoints`], which hands out an
//! [`EndpointBuilder`]. The builder works on a copy: [`EndpointBuilder::finish`]
//! returns a new [`Api`] with the extended registry, sharing transport and
//! cache with the original, and the original keeps its own registry.
//!
//! ## Examples
//!
//! ```
//! use splitapi::{Api, InjectOptions, RequestDescriptor};
//!
//! let base = Api::builder("http://localhost:5000").build().unwrap();
//!
//! let mut build = base.inject_endpoints(InjectOptions::default());
//! let get_users = build
//!     .query::<(), Vec<serde_json::Value>, _>("getUsers", |_arg: &()| {
//!         Ok(RequestDescriptor::new("/v1/user"))
//!     })
//!     .unwrap();
//! let api = build.finish();
//!
//! assert_eq!(api.endpoints(), vec!["getUsers"]);
//! assert!(base.endpoints().is_empty());
//! assert_eq!(get_users.name(), "getUsers");
//! ```

use std::any::type_name;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use splitapi_define::EndpointKind;

use crate::client::Api;
use crate::endpoint::{EndpointDefinition, MutationEndpoint, QueryEndpoint};
use crate::error::{ConfigError, QueryError};
use crate::request::RequestDescriptor;

/// What the registry records about an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredEndpoint {
    /// Operation name.
    pub name: String,
    /// Query or mutation.
    pub kind: EndpointKind,
    /// Rust type name of the argument.
    pub arg_type: &'static str,
    /// Rust type name of the response.
    pub response_type: &'static str,
}

/// Registered endpoints, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRegistry {
    entries: Vec<RegisteredEndpoint>,
}

impl EndpointRegistry {
    /// Looks up an endpoint by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredEndpoint> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All endpoint names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// All registered endpoints.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEndpoint> {
        self.entries.iter()
    }

    /// Number of registered endpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, entry: RegisteredEndpoint, override_existing: bool) -> Result<(), ConfigError> {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(_) if !override_existing => Err(ConfigError::duplicate(entry.name)),
            Some(existing) => {
                tracing::debug!(endpoint = %entry.name, "Overriding endpoint");
                *existing = entry;
                Ok(())
            }
            None => {
                tracing::debug!(endpoint = %entry.name, kind = %entry.kind, "Registering endpoint");
                self.entries.push(entry);
                Ok(())
            }
        }
    }
}

/// Options for [`Api::inject_endpoints`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectOptions {
    /// Replace an already-registered endpoint of the same name instead of
    /// failing with [`ConfigError::DuplicateEndpoint`].
    pub override_existing: bool,
}

/// Collects endpoint registrations for a new [`Api`].
#[derive(Debug)]
pub struct EndpointBuilder {
    api: Api,
    registry: EndpointRegistry,
    options: InjectOptions,
}

impl EndpointBuilder {
    pub(crate) fn new(api: Api, options: InjectOptions) -> Self {
        let registry = api.registry().clone();
        Self {
            api,
            registry,
            options,
        }
    }

    /// Registers a query endpoint.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::DuplicateEndpoint`] if `name` is already
    /// registered and overriding is not allowed.
    pub fn query<A, R, F>(&mut self, name: &str, build: F) -> Result<QueryEndpoint<A, R>, ConfigError>
    where
        A: Serialize + 'static,
        R: DeserializeOwned + 'static,
        F: Fn(&A) -> Result<RequestDescriptor, QueryError> + Send + Sync + 'static,
    {
        self.register::<A, R>(name, EndpointKind::Query)?;
        Ok(QueryEndpoint::new(EndpointDefinition::new(
            name,
            EndpointKind::Query,
            build,
        )))
    }

    /// Registers a mutation endpoint.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::DuplicateEndpoint`] if `name` is already
    /// registered and overriding is not allowed.
    pub fn mutation<A, R, F>(
        &mut self,
        name: &str,
        build: F,
    ) -> Result<MutationEndpoint<A, R>, ConfigError>
    where
        A: 'static,
        R: DeserializeOwned + 'static,
        F: Fn(&A) -> Result<RequestDescriptor, QueryError> + Send + Sync + 'static,
    {
        self.register::<A, R>(name, EndpointKind::Mutation)?;
        Ok(MutationEndpoint::new(EndpointDefinition::new(
            name,
            EndpointKind::Mutation,
            build,
        )))
    }

    fn register<A: 'static, R: 'static>(&mut self, name: &str, kind: EndpointKind) -> Result<(), ConfigError> {
        self.registry.register(
            RegisteredEndpoint {
                name: name.to_string(),
                kind,
                arg_type: type_name::<A>(),
                response_type: type_name::<R>(),
            },
            self.options.override_existing,
        )
    }

    /// Returns the extended client.
    pub fn finish(self) -> Api {
        self.api.with_registry(Arc::new(self.registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Api {
        Api::builder("http://localhost:5000").build().unwrap()
    }

    fn users(_: &()) -> Result<RequestDescriptor, QueryError> {
        Ok(RequestDescriptor::new("/v1/user"))
    }

    #[test]
    fn test_finish_leaves_original_untouched() {
        let base = base();
        let mut build = base.inject_endpoints(InjectOptions::default());
        build.query::<(), Vec<i64>, _>("getUsers", users).unwrap();
        let extended = build.finish();

        assert!(!base.has_endpoint("getUsers"));
        assert!(extended.has_endpoint("getUsers"));
    }

    #[test]
    fn test_duplicate_in_one_injection_fails() {
        let mut build = base().inject_endpoints(InjectOptions::default());
        build.query::<(), Vec<i64>, _>("getUsers", users).unwrap();

        let err = build.query::<(), Vec<i64>, _>("getUsers", users).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateEndpoint { name } if name == "getUsers"));
    }

    #[test]
    fn test_duplicate_across_injections_fails() {
        let mut build = base().inject_endpoints(InjectOptions::default());
        build.query::<(), Vec<i64>, _>("getUsers", users).unwrap();
        let api = build.finish();

        let mut again = api.inject_endpoints(InjectOptions::default());
        assert!(again.query::<(), Vec<i64>, _>("getUsers", users).is_err());
    }

    #[test]
    fn test_override_replaces_in_place() {
        let mut build = base().inject_endpoints(InjectOptions::default());
        build.query::<(), Vec<i64>, _>("getUsers", users).unwrap();
        build.query::<(), (), _>("ping", |_: &()| Ok(RequestDescriptor::new("/ping"))).unwrap();
        let api = build.finish();

        let mut again = api.inject_endpoints(InjectOptions {
            override_existing: true,
        });
        again.mutation::<(), String, _>("getUsers", users).unwrap();
        let api = again.finish();

        assert_eq!(api.endpoints(), vec!["getUsers", "ping"]);
        let entry = api.registry().get("getUsers").unwrap();
        assert_eq!(entry.kind, EndpointKind::Mutation);
        assert!(entry.response_type.contains("String"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_registration_is_logged() {
        let mut build = base().inject_endpoints(InjectOptions::default());
        build.query::<(), Vec<i64>, _>("getUsers", users).unwrap();
        assert!(logs_contain("Registering endpoint"));
    }
}
