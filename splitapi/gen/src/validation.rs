//! Pre-generation validation.
//!
//! Catches problems that would otherwise surface as confusing compile errors
//! in the generated module:
//!
//! - **Export name**: must be a Rust identifier
//! - **Duplicate endpoints**: two operations with the same name
//! - **Naming collisions**: two generated items mapping to one Rust name
//! - **Identifiers**: every generated name must be a Rust identifier
//! - **Parameter types**: path and query parameters must be printable
//! - **Base API module**: must exist, parse, and define the constructor
//!
//! ## Examples
//!
//! ```
//! use splitapi_define::ApiDefinition;
//! use splitapi_gen::validation::validate_api;
//!
//! let api = ApiDefinition {
//!     title: "Empty".to_string(),
//!     description: None,
//!     version: "1".to_string(),
//!     endpoints: vec![],
//!     types: vec![],
//! };
//!
//! assert!(validate_api(&api, "serverApi").is_ok());
//! assert!(validate_api(&api, "server-api").is_err());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use splitapi_define::{ApiDefinition, EndpointKind, ParamLocation, TypeDefKind, TypeRef};

use crate::errors::GeneratorError;
use crate::naming::{is_rust_ident, is_valid_identifier, to_pascal_case, to_snake_case};

/// Methods and `inject()` locals every generated client defines.
const RESERVED_METHODS: &[&str] = &["api", "build", "inject"];

/// Prelude types the generated module refers to unqualified.
const PRELUDE_TYPES: &[&str] = &["Box", "Option", "Result", "String", "Vec"];

/// How deep alias chains are followed when checking parameter types.
const MAX_ALIAS_DEPTH: usize = 8;

/// Tracks which generated Rust names are taken and by what.
#[derive(Default)]
struct NameTable {
    taken: BTreeMap<String, String>,
}

impl NameTable {
    fn claim(&mut self, name: String, origin: String) -> Result<(), GeneratorError> {
        if !is_rust_ident(&name) {
            return Err(GeneratorError::UnsupportedSchema {
                context: origin,
                reason: format!("'{name}' is not a valid Rust identifier"),
            });
        }
        if let Some(first) = self.taken.get(&name) {
            return Err(GeneratorError::NamingCollision {
                name,
                first: first.clone(),
                second: origin,
            });
        }
        self.taken.insert(name, origin);
        Ok(())
    }
}

/// Validates an API definition before code generation.
///
/// ## Errors
///
/// - [`GeneratorError::InvalidExportName`] if `export_name` is not an identifier
/// - [`GeneratorError::DuplicateEndpoint`] if two operations share a name
/// - [`GeneratorError::NamingCollision`] if two generated items share a Rust name
/// - [`GeneratorError::UnsupportedSchema`] for parameters that cannot be sent
///   and for names that do not form Rust identifiers
pub fn validate_api(api: &ApiDefinition, export_name: &str) -> Result<(), GeneratorError> {
    validate_export_name(export_name)?;

    let mut seen: BTreeMap<&str, String> = BTreeMap::new();
    for endpoint in &api.endpoints {
        let location = format!("{} {}", endpoint.method, endpoint.path);
        if let Some(first) = seen.get(endpoint.name.as_str()) {
            return Err(GeneratorError::DuplicateEndpoint {
                name: endpoint.name.clone(),
                first: first.clone(),
                second: location,
            });
        }
        seen.insert(&endpoint.name, location);
    }

    let mut types = NameTable::default();
    for prelude in PRELUDE_TYPES {
        types.claim(prelude.to_string(), format!("prelude type '{prelude}'"))?;
    }
    types.claim(
        to_pascal_case(export_name),
        format!("client struct for '{export_name}'"),
    )?;
    for def in &api.types {
        types.claim(to_pascal_case(&def.name), format!("schema '{}'", def.name))?;

        if let TypeDefKind::Object(fields) = &def.kind {
            let mut field_names = NameTable::default();
            for field in fields {
                field_names.claim(
                    to_snake_case(&field.name),
                    format!("property '{}' of schema '{}'", field.name, def.name),
                )?;
            }
        }
    }

    let mut methods = NameTable::default();
    for reserved in RESERVED_METHODS {
        methods.claim(reserved.to_string(), format!("built-in name '{reserved}'"))?;
    }

    for endpoint in &api.endpoints {
        let pascal = to_pascal_case(&endpoint.name);
        let snake = to_snake_case(&endpoint.name);
        let origin = |what: &str| format!("{what} of operation '{}'", endpoint.name);

        types.claim(format!("{pascal}ApiArg"), origin("argument type"))?;
        types.claim(format!("{pascal}ApiResponse"), origin("response type"))?;

        methods.claim(snake.clone(), origin("accessor"))?;
        match endpoint.kind {
            EndpointKind::Query => {
                methods.claim(format!("use_{snake}_query"), origin("query hook"))?;
                methods.claim(format!("use_lazy_{snake}_query"), origin("lazy query hook"))?;
            }
            EndpointKind::Mutation => {
                methods.claim(format!("use_{snake}_mutation"), origin("mutation hook"))?;
            }
        }

        let mut fields = NameTable::default();
        for param in &endpoint.params {
            fields.claim(
                to_snake_case(&param.name),
                origin(&format!("{} parameter '{}'", param.location, param.name)),
            )?;

            let printable = match param.location {
                ParamLocation::Path => is_scalar(api, &param.ty, 0),
                ParamLocation::Query => match &param.ty {
                    TypeRef::Array(item) => is_scalar(api, item, 0),
                    ty => is_scalar(api, ty, 0),
                },
            };
            if !printable {
                return Err(GeneratorError::UnsupportedSchema {
                    context: origin(&format!("parameter '{}'", param.name)),
                    reason: format!(
                        "{} parameters must be strings, numbers or booleans",
                        param.location
                    ),
                });
            }
        }
        if endpoint.body.is_some() {
            fields.claim("body".to_string(), origin("request body"))?;
        }
    }

    Ok(())
}

fn validate_export_name(export_name: &str) -> Result<(), GeneratorError> {
    let invalid = |reason: &str| GeneratorError::InvalidExportName {
        name: export_name.to_string(),
        reason: reason.to_string(),
    };

    if export_name.is_empty() {
        return Err(invalid("export name cannot be empty"));
    }
    if !is_valid_identifier(export_name) {
        return Err(invalid(
            "export name must contain only ASCII letters, digits and underscores, \
             and must not start with a digit",
        ));
    }
    if to_pascal_case(export_name).is_empty() {
        return Err(invalid("export name must contain at least one letter"));
    }

    Ok(())
}

/// Returns `true` for types that print as a single parameter value.
fn is_scalar(api: &ApiDefinition, ty: &TypeRef, depth: usize) -> bool {
    match ty {
        TypeRef::String | TypeRef::Integer(_) | TypeRef::Number(_) | TypeRef::Boolean => true,
        TypeRef::Named(name) if depth < MAX_ALIAS_DEPTH => match api.type_def(name) {
            Some(def) => match &def.kind {
                TypeDefKind::Alias(inner) => is_scalar(api, inner, depth + 1),
                TypeDefKind::Object(_) => false,
            },
            None => false,
        },
        _ => false,
    }
}

/// Lexically normalizes a path (drops `.`, resolves `..`).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Derives the module path of the base API file inside its crate.
///
/// The file must live under a `src` directory that also contains
/// `output_file`, because the generated module refers to it through
/// `crate::`. `lib.rs` and `main.rs` map to the crate root and `mod.rs`
/// to its directory.
///
/// ## Examples
///
/// ```
/// use std::path::Path;
/// use splitapi_gen::validation::base_api_module_path;
///
/// let segments = base_api_module_path(
///     Path::new("schema/src/empty_api.rs"),
///     Path::new("schema/src/server_api.rs"),
/// ).unwrap();
/// assert_eq!(segments, vec!["empty_api"]);
/// ```
///
/// ## Errors
///
/// Returns [`GeneratorError::BaseApiNotFound`] if the module path cannot be
/// derived.
pub fn base_api_module_path(
    api_file: &Path,
    output_file: &Path,
) -> Result<Vec<String>, GeneratorError> {
    let not_usable = |reason: String| GeneratorError::BaseApiNotFound {
        path: api_file.to_path_buf(),
        reason,
    };

    let api = normalize(api_file);
    let output = normalize(output_file);
    if api == output {
        return Err(not_usable(
            "api_file and output_file are the same file".to_string(),
        ));
    }

    let src_root = api
        .ancestors()
        .find(|dir| dir.file_name().is_some_and(|name| name == "src"))
        .ok_or_else(|| not_usable("file is not under a `src` directory".to_string()))?;
    if !output.starts_with(src_root) {
        return Err(not_usable(format!(
            "output_file '{}' is not in the same crate",
            output_file.display()
        )));
    }

    let relative = api
        .strip_prefix(src_root)
        .map_err(|e| not_usable(e.to_string()))?;
    let mut segments = Vec::new();
    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| not_usable("path is not valid UTF-8".to_string()))?;
        segments.push(part.to_string());
    }
    let Some(file) = segments.pop() else {
        return Err(not_usable("path names the `src` directory itself".to_string()));
    };
    let Some(stem) = file.strip_suffix(".rs") else {
        return Err(not_usable("file is not a `.rs` source file".to_string()));
    };

    let is_crate_root = segments.is_empty() && (stem == "lib" || stem == "main");
    if !is_crate_root && stem != "mod" {
        segments.push(stem.to_string());
    }

    if let Some(bad) = segments.iter().find(|s| !is_valid_identifier(s)) {
        return Err(not_usable(format!("'{bad}' is not a valid module name")));
    }

    Ok(segments)
}

/// Checks that the base API file defines `pub fn {import}`.
///
/// ## Errors
///
/// - [`GeneratorError::BaseApiNotFound`] if the file cannot be read or parsed
/// - [`GeneratorError::BaseApiImportMissing`] if the function is absent or private
pub fn validate_base_api(path: &Path, import: &str) -> Result<(), GeneratorError> {
    let source = fs::read_to_string(path).map_err(|e| GeneratorError::BaseApiNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let file = syn::parse_file(&source).map_err(|e| GeneratorError::BaseApiNotFound {
        path: path.to_path_buf(),
        reason: format!("not valid Rust: {e}"),
    })?;

    let found = file.items.iter().any(|item| match item {
        syn::Item::Fn(func) => {
            func.sig.ident == import && matches!(func.vis, syn::Visibility::Public(_))
        }
        _ => false,
    });

    if found {
        Ok(())
    } else {
        Err(GeneratorError::BaseApiImportMissing {
            path: path.to_path_buf(),
            import: import.to_string(),
        })
    }
}
