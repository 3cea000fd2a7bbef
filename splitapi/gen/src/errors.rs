//! Error types for the splitapi generator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Every variant is fatal: the generator writes nothing once one occurs.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML/JSON or misses a key.
    #[error("Invalid config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The OpenAPI document could not be read.
    #[error("Failed to read OpenAPI document '{path}': {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OpenAPI document is not a valid OpenAPI 3.0 document.
    #[error("Invalid OpenAPI document '{path}': {message}")]
    SchemaParse { path: PathBuf, message: String },

    /// A `$ref` points at something the document does not define.
    #[error("Unresolved reference '{reference}' in {context}")]
    UnresolvedReference { reference: String, context: String },

    /// The document uses a construct the generator cannot express.
    #[error("Unsupported schema in {context}: {reason}")]
    UnsupportedSchema { context: String, reason: String },

    /// Two operations share a name.
    #[error("Duplicate endpoint name '{name}' ({first} and {second})")]
    DuplicateEndpoint {
        name: String,
        first: String,
        second: String,
    },

    /// Two generated items would get the same Rust name.
    ///
    /// For example a schema named `GetUsersApiArg` collides with the
    /// argument type generated for the `getUsers` operation.
    #[error("Naming collision on '{name}': {first} conflicts with {second}")]
    NamingCollision {
        /// The Rust identifier both would use.
        name: String,
        /// What produced the first one.
        first: String,
        /// What produced the second one.
        second: String,
    },

    /// `export_name` does not produce valid Rust identifiers.
    #[error("Invalid export name '{name}': {reason}")]
    InvalidExportName { name: String, reason: String },

    /// The base client module cannot be used.
    #[error("Base API module '{path}' not usable: {reason}")]
    BaseApiNotFound { path: PathBuf, reason: String },

    /// The base client module does not define the configured constructor.
    #[error("Base API module '{path}' has no `pub fn {import}`")]
    BaseApiImportMissing { path: PathBuf, import: String },

    /// Failed to generate code.
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `--check` found a generated file that differs from what would be generated.
    #[error("Generated file '{path}' is out of date; rerun splitapi-gen")]
    OutOfDate { path: PathBuf },
}
