//! Code generation modules for splitapi.
//!
//! This module contains generators that produce Rust source code from an
//! [`ApiDefinition`](splitapi_define::ApiDefinition). Each submodule handles
//! one part of the generated client module.
//!
//! ## Submodules
//!
//! - [`types`] - Structs and aliases for `components.schemas`
//! - [`endpoints`] - `{Name}ApiArg` / `{Name}ApiResponse` and endpoint registration
//! - [`client`] - The exported client struct, hooks and constructor function
//! - [`module_docs`] - Module-level documentation
//!
//! ## Code Generation Flow
//!
//! 1. Module docs via [`ModuleDocBuilder`]
//! 2. Named types via [`generate_types`]
//! 3. Per-endpoint types via [`generate_endpoint_types`]
//! 4. The client and its constructor via [`generate_client`]
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod client;
pub mod endpoints;
pub mod module_docs;
pub mod types;

pub use client::{ClientOptions, generate_client};
pub use endpoints::{generate_endpoint_types, generate_registration};
pub use module_docs::ModuleDocBuilder;
pub use types::{generate_type_def, generate_types, rust_type};
