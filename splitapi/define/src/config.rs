//! Generator configuration.
//!
//! A [`GeneratorConfig`] tells `splitapi-gen` where the OpenAPI document is,
//! which base client the generated endpoints attach to, where the generated
//! module goes and what it exports. It is plain data: reading it from disk
//! and resolving its paths is the generator's job.
//!
//! ## Examples
//!
//! ```
//! use splitapi_define::{GeneratorConfig, HooksConfig};
//!
//! let config: GeneratorConfig = serde_json::from_str(r#"{
//!     "schemaFile": "../models/generated/openapi.json",
//!     "apiFile": "./src/empty_api.rs",
//!     "apiImport": "empty_split_api",
//!     "outputFile": "./src/server_api.rs",
//!     "exportName": "serverApi",
//!     "hooks": true
//! }"#).unwrap();
//!
//! assert_eq!(config.export_name, "serverApi");
//! assert!(config.hooks.flags().queries);
//! assert!(!config.hooks.flags().lazy_queries);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::EndpointKind;

/// Configuration consumed by the code generator.
///
/// Keys are snake_case; the camelCase spellings (`schemaFile`, `apiFile`,
/// `apiImport`, `outputFile`, `exportName`, `filterEndpoints`,
/// `endpointOverrides`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Location of the OpenAPI document (JSON or YAML).
    #[serde(alias = "schemaFile")]
    pub schema_file: String,

    /// Rust source file of the base client module.
    ///
    /// Must live under the target crate's `src/` directory; its module path
    /// is derived from its location.
    #[serde(alias = "apiFile")]
    pub api_file: String,

    /// Name of the base-client constructor defined in `api_file`.
    ///
    /// The function must return `Result<splitapi::Api, splitapi::ConfigError>`.
    #[serde(alias = "apiImport")]
    pub api_import: String,

    /// Where the generated module is written.
    #[serde(alias = "outputFile")]
    pub output_file: String,

    /// Exported symbol name of the generated client.
    ///
    /// `serverApi` (or `server_api`) exports `struct ServerApi` and
    /// `fn server_api()`.
    #[serde(alias = "exportName")]
    pub export_name: String,

    /// Whether to generate `use_*` hook accessors.
    #[serde(default)]
    pub hooks: HooksConfig,

    /// Only generate these operations (by name). Empty means all.
    #[serde(default, alias = "filterEndpoints", skip_serializing_if = "Vec::is_empty")]
    pub filter_endpoints: Vec<String>,

    /// Force specific operations to be queries or mutations.
    #[serde(default, alias = "endpointOverrides", skip_serializing_if = "Vec::is_empty")]
    pub endpoint_overrides: Vec<EndpointOverride>,
}

impl GeneratorConfig {
    /// Creates a configuration with hooks disabled and no filters.
    pub fn new(
        schema_file: impl Into<String>,
        api_file: impl Into<String>,
        api_import: impl Into<String>,
        output_file: impl Into<String>,
        export_name: impl Into<String>,
    ) -> Self {
        Self {
            schema_file: schema_file.into(),
            api_file: api_file.into(),
            api_import: api_import.into(),
            output_file: output_file.into(),
            export_name: export_name.into(),
            hooks: HooksConfig::default(),
            filter_endpoints: vec![],
            endpoint_overrides: vec![],
        }
    }

    /// Sets the hooks option.
    pub fn with_hooks(mut self, hooks: impl Into<HooksConfig>) -> Self {
        self.hooks = hooks.into();
        self
    }

    /// Returns `true` if the named operation passes `filter_endpoints`.
    pub fn includes(&self, endpoint_name: &str) -> bool {
        self.filter_endpoints.is_empty()
            || self.filter_endpoints.iter().any(|name| name == endpoint_name)
    }

    /// The forced kind for an operation, if any override names it.
    ///
    /// The last matching override wins.
    pub fn kind_override(&self, endpoint_name: &str) -> Option<EndpointKind> {
        self.endpoint_overrides
            .iter()
            .rev()
            .find(|o| o.name == endpoint_name)
            .map(|o| o.kind)
    }
}

/// The `hooks` option: a plain switch or per-kind flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HooksConfig {
    /// `true` generates query and mutation hooks (no lazy query hooks).
    Enabled(bool),
    /// Explicit per-kind selection.
    Detailed(HookFlags),
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl From<bool> for HooksConfig {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<HookFlags> for HooksConfig {
    fn from(flags: HookFlags) -> Self {
        Self::Detailed(flags)
    }
}

impl HooksConfig {
    /// Resolves the option into concrete flags.
    pub fn flags(&self) -> HookFlags {
        match self {
            Self::Enabled(true) => HookFlags {
                queries: true,
                lazy_queries: false,
                mutations: true,
            },
            Self::Enabled(false) => HookFlags::default(),
            Self::Detailed(flags) => *flags,
        }
    }
}

/// Which hook accessors to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookFlags {
    /// `use_{name}_query(arg)` for queries.
    pub queries: bool,
    /// `use_lazy_{name}_query()` for queries.
    #[serde(alias = "lazyQueries")]
    pub lazy_queries: bool,
    /// `use_{name}_mutation()` for mutations.
    pub mutations: bool,
}

/// Forces an operation to a given [`EndpointKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointOverride {
    /// Operation name as it appears in the generated client (`getUsers`).
    pub name: String,
    /// Kind to use instead of the method-derived default.
    #[serde(rename = "type", alias = "kind")]
    pub kind: EndpointKind,
}
