//! Base API client for generated endpoint modules.
//!
//! The `splitapi` crate is the runtime half of the splitapi code generator.
//! It provides an otherwise empty client, [`Api`], onto which generated
//! modules inject typed endpoint definitions, and executes, caches and
//! tracks requests for them.
//!
//! ## Features
//!
//! - **Explicit registry**: [`Api::inject_endpoints`] returns a builder; the
//!   extended client is a new value and the base client is never mutated
//! - **Typed endpoints**: [`QueryEndpoint`] and [`MutationEndpoint`] carry
//!   argument and response types
//! - **Query cache**: results keyed by endpoint name and argument, expiring
//!   after a configurable duration
//! - **Hooks**: [`QueryHook`] and [`MutationHook`] expose request lifecycle
//!   state through a `watch` channel
//! - **Three-state fields**: [`Nullable`] keeps absent and `null` apart
//!
//! ## Example
//!
//! ```rust,no_run
//! use splitapi::{Api, InjectOptions, RequestDescriptor};
//!
//! #[derive(Debug, Clone, serde::Deserialize)]
//! struct User {
//!     id: Option<i64>,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let base = Api::builder("http://localhost:5000").build()?;
//!
//! let mut build = base.inject_endpoints(InjectOptions { override_existing: false });
//! let get_users = build.query::<(), Vec<User>, _>("getUsers", |_arg: &()| {
//!     Ok(RequestDescriptor::new("/v1/user"))
//! })?;
//! let api = build.finish();
//!
//! for user in api.query(&get_users, &()).await? {
//!     println!("{:?}", user.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod hooks;
pub mod method;
pub mod nullable;
pub mod registry;
pub mod request;

// Re-exports for convenience
pub use cache::cache_key;
pub use client::{Api, ApiBuilder};
pub use endpoint::{EndpointDefinition, MutationEndpoint, QueryEndpoint};
pub use error::{ConfigError, QueryError};
pub use hooks::{MutationHook, QueryHook, QueryState, QueryStatus};
pub use nullable::Nullable;
pub use registry::{EndpointBuilder, EndpointRegistry, InjectOptions, RegisteredEndpoint};
pub use request::{RequestDescriptor, path_segment};
pub use splitapi_define::{EndpointKind, RestMethod};
