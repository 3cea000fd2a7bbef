//! Output generation for splitapi code.
//!
//! This module handles the final assembly, validation, and writing of the
//! generated client module. It ensures all generated code is syntactically
//! valid before writing and uses atomic file operations to prevent
//! corruption.
//!
//! ## Generation Pipeline
//!
//! 1. **Load**: Read the OpenAPI document named by the configuration
//! 2. **Parse**: Convert it into an [`ApiDefinition`]
//! 3. **Check**: Validate names and the base API module
//! 4. **Assemble**: Combine docs, types, endpoint types and the client
//! 5. **Validate**: Parse with `syn` to verify syntactic correctness
//! 6. **Format**: Pretty-print with `prettyplease`
//! 7. **Write**: Atomically write to disk (temp file + rename)
//!
//! ## Safety Guarantees
//!
//! - Generated code is validated before writing (no invalid Rust on disk)
//! - Every error is detected before the output file is touched
//! - Atomic writes prevent partial file corruption
//! - Parent directories are created automatically

use std::fs;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::quote;
use splitapi_define::ApiDefinition;
use tracing::{debug, info};

use crate::codegen::{
    ClientOptions, ModuleDocBuilder, generate_client, generate_endpoint_types, generate_types,
};
use crate::config::ResolvedConfig;
use crate::errors::GeneratorError;
use crate::openapi::{load_document, parse_document};
use crate::validation::{base_api_module_path, validate_api, validate_base_api};

/// What [`run`] does with the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write the module to `output_file`.
    #[default]
    Write,
    /// Generate without touching the filesystem.
    DryRun,
    /// Fail with [`GeneratorError::OutOfDate`] if `output_file` differs.
    Check,
}

/// Assembles the complete generated module.
///
/// The module contains, in order:
/// - Module documentation
/// - One struct or alias per `components.schemas` entry
/// - `{Name}ApiArg` / `{Name}ApiResponse` per endpoint
/// - The client struct and its constructor function
///
/// All paths in the output are fully qualified (`splitapi::`, `serde::`,
/// `serde_json::`), so the module needs no imports.
pub fn assemble_module(api: &ApiDefinition, options: &ClientOptions<'_>) -> TokenStream {
    let module_docs = ModuleDocBuilder::new(api, options.export_name, options.hooks).build();
    let types = generate_types(&api.types);
    let endpoint_types: TokenStream = api.endpoints.iter().map(generate_endpoint_types).collect();
    let client = generate_client(api, options);

    quote! {
        #module_docs

        #types

        #endpoint_types

        #client
    }
}

/// Validates generated code using syn.
///
/// Parses the token stream as a complete Rust file to ensure it's syntactically
/// valid before writing to disk.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats generated code using prettyplease.
///
/// Converts a parsed syn::File back to a nicely formatted string,
/// prepending an auto-generated notice as a regular comment.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by splitapi-gen. Do not edit manually.\n\n{}",
        formatted
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// Other processes see either the old or new content, never a mix.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates the formatted module for a configuration without writing it.
///
/// Output is deterministic: the same document and configuration always
/// produce byte-identical text.
///
/// ## Errors
///
/// Any error from loading, parsing or validating; see [`GeneratorError`].
pub fn generate(resolved: &ResolvedConfig) -> Result<String, GeneratorError> {
    let config = &resolved.config;

    let doc = load_document(&resolved.schema_path())?;
    let api = parse_document(&doc, config)?;
    validate_api(&api, &config.export_name)?;

    let api_path = resolved.api_path();
    validate_base_api(&api_path, &config.api_import)?;
    let base_module = base_api_module_path(&api_path, &resolved.output_path())?;
    debug!(module = ?base_module, import = %config.api_import, "Resolved base API");

    let options = ClientOptions {
        export_name: &config.export_name,
        hooks: config.hooks.flags(),
        base_module: &base_module,
        api_import: &config.api_import,
    };

    let tokens = assemble_module(&api, &options);
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Generates the module and writes or checks it according to `mode`.
///
/// Returns the generated code in every mode.
///
/// ## Errors
///
/// - Any error from [`generate`]
/// - [`GeneratorError::WriteError`] if writing fails
/// - [`GeneratorError::OutOfDate`] in [`OutputMode::Check`] when the file
///   on disk is missing or differs
pub fn run(resolved: &ResolvedConfig, mode: OutputMode) -> Result<String, GeneratorError> {
    let code = generate(resolved)?;
    let output = resolved.output_path();

    match mode {
        OutputMode::Write => {
            write_atomic(&output, &code)?;
            info!(path = %output.display(), "Wrote generated module");
        }
        OutputMode::DryRun => {
            debug!(path = %output.display(), "Dry run, nothing written");
        }
        OutputMode::Check => {
            let current = fs::read_to_string(&output).ok();
            if current.as_deref() != Some(code.as_str()) {
                return Err(GeneratorError::OutOfDate { path: output });
            }
            debug!(path = %output.display(), "Generated module is up to date");
        }
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_users_api;
    use splitapi_define::{GeneratorConfig, HookFlags};
    use tempfile::TempDir;

    const DOC: &str = r##"{
        "openapi": "3.0.3",
        "info": { "title": "BlockPy Server API", "version": "1.0.0" },
        "paths": {
            "/v1/user": {
                "get": {
                    "operationId": "getUsers",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/UserSchema" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "UserSchema": {
                    "type": "object",
                    "properties": {
                        "email": { "type": "string", "nullable": true },
                        "id": { "type": "integer" }
                    }
                }
            }
        }
    }"##;

    const BASE_API: &str = r#"
use splitapi::{Api, ConfigError};

pub fn empty_split_api() -> Result<Api, ConfigError> {
    Api::builder("http://localhost:5000").build()
}
"#;

    fn project() -> (TempDir, ResolvedConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("openapi.json"), DOC).unwrap();
        fs::write(dir.path().join("src/empty_api.rs"), BASE_API).unwrap();

        let config = GeneratorConfig::new(
            "openapi.json",
            "src/empty_api.rs",
            "empty_split_api",
            "src/server_api.rs",
            "serverApi",
        )
        .with_hooks(true);
        let resolved = ResolvedConfig::new(config, dir.path());
        (dir, resolved)
    }

    fn options() -> ClientOptions<'static> {
        const BASE: &[String] = &[];
        ClientOptions {
            export_name: "serverApi",
            hooks: HookFlags::default(),
            base_module: BASE,
            api_import: "empty_split_api",
        }
    }

    // === assemble_module tests ===

    #[test]
    fn assemble_module_includes_all_components() {
        let api = make_users_api();
        let code = assemble_module(&api, &options()).to_string();

        assert!(code.contains("Generated client for BlockPy Server API"));
        assert!(code.contains("struct UserSchema"));
        assert!(code.contains("struct Error"));
        assert!(code.contains("GetUsersApiArg"));
        assert!(code.contains("GetUsersApiResponse"));
        assert!(code.contains("struct ServerApi"));
        assert!(code.contains("fn server_api"));
    }

    #[test]
    fn assemble_module_has_no_imports_or_lint_allows() {
        let api = make_users_api();
        let code = assemble_module(&api, &options()).to_string();

        assert!(!code.contains("use serde"));
        assert!(!code.contains("use splitapi"));
        assert!(!code.contains("dead_code"));
        assert!(!code.contains("unused_imports"));
    }

    // === validate_code tests ===

    #[test]
    fn validate_code_accepts_assembled_module() {
        let api = make_users_api();
        assert!(validate_code(&assemble_module(&api, &options())).is_ok());
    }

    #[test]
    fn validate_code_rejects_invalid_code() {
        let invalid_tokens = quote! {
            let x =
        };

        match validate_code(&invalid_tokens) {
            Err(GeneratorError::CodeGenError(msg)) => {
                assert!(msg.contains("Generated code is invalid"));
            }
            Err(other) => panic!("Unexpected error type: {:?}", other),
            Ok(_) => panic!("Expected error but got success"),
        }
    }

    // === format_code tests ===

    #[test]
    fn format_code_adds_header() {
        let api = make_users_api();
        let file = validate_code(&assemble_module(&api, &options())).unwrap();
        let formatted = format_code(&file);

        assert!(formatted.starts_with(
            "// This code was automatically generated by splitapi-gen. Do not edit manually.\n\n"
        ));
        assert!(formatted.contains("//! Generated client for BlockPy Server API"));
        assert!(formatted.contains("pub type GetUsersApiResponse = Vec<UserSchema>;"));
    }

    // === write_atomic tests ===

    #[test]
    fn write_atomic_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.rs");

        write_atomic(&file_path, "fn main() {}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "fn main() {}");
    }

    #[test]
    fn write_atomic_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested/dir/test.rs");

        write_atomic(&file_path, "// test").unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn write_atomic_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.rs");

        write_atomic(&file_path, "original").unwrap();
        write_atomic(&file_path, "updated").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
    }

    #[test]
    fn write_atomic_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.rs");

        write_atomic(&file_path, "content").unwrap();

        assert!(!temp_dir.path().join("test.tmp").exists());
    }

    // === generate / run tests ===

    #[test]
    fn generate_is_deterministic() {
        let (_dir, resolved) = project();
        let first = generate(&resolved).unwrap();
        let second = generate(&resolved).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn generate_uses_base_module_path() {
        let (_dir, resolved) = project();
        let code = generate(&resolved).unwrap();

        assert!(code.contains("crate::empty_api::empty_split_api()?"));
        assert!(code.contains("use_get_users_query"));
    }

    #[test]
    fn run_write_creates_output_file() {
        let (dir, resolved) = project();
        let code = run(&resolved, OutputMode::Write).unwrap();

        let written = fs::read_to_string(dir.path().join("src/server_api.rs")).unwrap();
        assert_eq!(written, code);
    }

    #[test]
    #[tracing_test::traced_test]
    fn run_write_logs_output_path() {
        let (_dir, resolved) = project();
        run(&resolved, OutputMode::Write).unwrap();

        assert!(logs_contain("Parsed OpenAPI document"));
        assert!(logs_contain("Wrote generated module"));
    }

    #[test]
    fn run_dry_run_writes_nothing() {
        let (dir, resolved) = project();
        run(&resolved, OutputMode::DryRun).unwrap();

        assert!(!dir.path().join("src/server_api.rs").exists());
    }

    #[test]
    fn run_check_detects_stale_output() {
        let (dir, resolved) = project();

        let missing = run(&resolved, OutputMode::Check);
        assert!(matches!(missing, Err(GeneratorError::OutOfDate { .. })));

        run(&resolved, OutputMode::Write).unwrap();
        assert!(run(&resolved, OutputMode::Check).is_ok());

        fs::write(dir.path().join("src/server_api.rs"), "// edited").unwrap();
        let stale = run(&resolved, OutputMode::Check);
        assert!(matches!(stale, Err(GeneratorError::OutOfDate { .. })));
    }

    #[test]
    fn run_fails_before_writing_on_missing_import() {
        let (dir, mut resolved) = project();
        resolved.config.api_import = "missing_api".to_string();

        let result = run(&resolved, OutputMode::Write);
        assert!(matches!(
            result,
            Err(GeneratorError::BaseApiImportMissing { .. })
        ));
        assert!(!dir.path().join("src/server_api.rs").exists());
    }

    #[test]
    fn run_rejects_property_that_is_not_an_identifier() {
        let (dir, resolved) = project();
        fs::write(
            dir.path().join("openapi.json"),
            DOC.replace("\"email\"", "\"area_m²\""),
        )
        .unwrap();

        let result = run(&resolved, OutputMode::DryRun);
        assert!(matches!(
            result,
            Err(GeneratorError::UnsupportedSchema { .. })
        ));
    }

    #[test]
    fn run_fails_on_missing_schema() {
        let (dir, resolved) = project();
        fs::remove_file(dir.path().join("openapi.json")).unwrap();

        let result = run(&resolved, OutputMode::Write);
        assert!(matches!(result, Err(GeneratorError::SchemaRead { .. })));
    }
}
