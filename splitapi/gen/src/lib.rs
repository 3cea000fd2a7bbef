//! Splitapi code generator library.
//!
//! This crate reads an OpenAPI 3.0 document and generates a Rust module that
//! injects one typed endpoint per operation into a `splitapi::Api` base
//! client. The generated module includes:
//!
//! - A struct or alias for every `components.schemas` entry
//! - `{Name}ApiArg` and `{Name}ApiResponse` types for every operation
//! - A client struct with an `inject()` constructor and one accessor per endpoint
//! - Optional `use_*_query` / `use_lazy_*_query` / `use_*_mutation` hooks
//! - A free constructor function named after `export_name`
//!
//! ## Modules
//!
//! - [`config`] - Loading the generator configuration from disk
//! - [`openapi`] - Converting an OpenAPI document into an `ApiDefinition`
//! - [`validation`] - Name, parameter and base API checks before generation
//! - [`codegen`] - Code generation for individual components
//! - [`output`] - Final assembly, validation, and file writing
//! - [`naming`] - Case conversion and identifier sanitizing
//! - [`parser`] - Path parameter extraction utilities
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use splitapi_gen::config::load_config;
//! use splitapi_gen::output::{OutputMode, run};
//!
//! let config = load_config(Path::new("openapi-config.toml")).unwrap();
//! let code = run(&config, OutputMode::DryRun).unwrap();
//! println!("{}", code);
//! ```
//!
//! ## Generated Code Structure
//!
//! For `export_name = "serverApi"` and a `getUsers` operation on `GET /v1/user`:
//!
//! ```text
//! pub struct UserSchema { ... }
//!
//! pub type GetUsersApiArg = ();
//! pub type GetUsersApiResponse = Vec<UserSchema>;
//!
//! pub struct ServerApi { api: splitapi::Api, get_users: splitapi::QueryEndpoint<..> }
//!
//! impl ServerApi {
//!     pub fn inject(api: &splitapi::Api) -> Result<Self, splitapi::ConfigError>;
//!     pub fn get_users(&self) -> &splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse>;
//!     pub async fn use_get_users_query(&self, arg: GetUsersApiArg) -> splitapi::QueryHook<..>;
//! }
//!
//! pub fn server_api() -> Result<ServerApi, splitapi::ConfigError>;
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod openapi;
pub mod output;
pub mod parser;
pub mod validation;

#[cfg(test)]
mod test_utils;
