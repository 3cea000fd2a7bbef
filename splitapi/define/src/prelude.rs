//! Convenient re-exports for working with splitapi definitions.
//!
//! ```
//! use splitapi_define::prelude::*;
//!
//! let config = GeneratorConfig::new(
//!     "openapi/openapi.json",
//!     "src/empty_api.rs",
//!     "empty_split_api",
//!     "src/server_api.rs",
//!     "serverApi",
//! )
//! .with_hooks(true);
//!
//! assert!(config.hooks.flags().queries);
//! ```

pub use crate::config::{EndpointOverride, GeneratorConfig, HookFlags, HooksConfig};
pub use crate::response::ApiResponse;
pub use crate::schema::{Field, IntegerWidth, NumberWidth, TypeDef, TypeDefKind, TypeRef};
pub use crate::types::{
    ApiDefinition, Endpoint, EndpointKind, Param, ParamLocation, RequestBody, RestMethod,
};
