//! Splitapi Definition Library
//!
//! This crate provides the types shared by the `splitapi` code generator and
//! runtime: the intermediate model an OpenAPI document is converted into,
//! and the generator configuration that says where that document is and
//! what the generated module should look like.
//!
//! ## Core Types
//!
//! ### API Model
//!
//! - [`ApiDefinition`] - A complete API: title, endpoints, named types
//! - [`Endpoint`] - A single operation with method, path, arguments and response
//! - [`EndpointKind`] - Query (read, cached) or mutation (write)
//! - [`RestMethod`] - HTTP methods (GET, POST, PUT, etc.)
//! - [`Param`] / [`ParamLocation`] - Path and query parameters
//! - [`RequestBody`] - JSON request body
//! - [`ApiResponse`] - Success response (JSON or empty)
//! - [`TypeRef`] / [`TypeDef`] / [`Field`] - Type information for bodies
//!
//! ### Configuration
//!
//! - [`GeneratorConfig`] - Schema location, base client, output, export name, hooks
//! - [`HooksConfig`] / [`HookFlags`] - Which `use_*` accessors to generate
//! - [`EndpointOverride`] - Force an operation to query or mutation
//!
//! ## Examples
//!
//! ```
//! use splitapi_define::{ApiResponse, Endpoint, EndpointKind, RestMethod, TypeRef};
//!
//! let endpoint = Endpoint {
//!     name: "getUsers".to_string(),
//!     kind: EndpointKind::Query,
//!     method: RestMethod::Get,
//!     path: "/v1/user".to_string(),
//!     description: None,
//!     params: vec![],
//!     body: None,
//!     response: ApiResponse::json(200, TypeRef::array(TypeRef::named("UserSchema"))),
//! };
//!
//! assert!(endpoint.is_void());
//! ```

pub mod config;
pub mod prelude;
pub mod response;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use config::{EndpointOverride, GeneratorConfig, HookFlags, HooksConfig};
pub use response::ApiResponse;
pub use schema::{Field, IntegerWidth, NumberWidth, TypeDef, TypeDefKind, TypeRef};
pub use types::{
    ApiDefinition, Endpoint, EndpointKind, Param, ParamLocation, RequestBody, RestMethod,
};
