//! OpenAPI document loading and conversion.
//!
//! Reads an OpenAPI 3.0 document (JSON or YAML) and converts it into the
//! language-neutral [`ApiDefinition`] the code generator works from.
//!
//! ## Mapping
//!
//! | OpenAPI                                  | [`TypeRef`]                |
//! |------------------------------------------|----------------------------|
//! | `string` (any format)                    | `String`                   |
//! | `integer` (`int32` / other)              | `Integer(I32 / I64)`       |
//! | `number` (`float` / other)               | `Number(F32 / F64)`        |
//! | `boolean`                                | `Boolean`                  |
//! | `array`                                  | `Array(items)`             |
//! | `object` without properties              | `Map(additionalProperties)`|
//! | `$ref: #/components/schemas/X`           | `Named("X")`               |
//! | `oneOf`, `anyOf`, `not`, untyped         | `Any`                      |
//!
//! Objects with properties must be declared under `components.schemas`;
//! inline ones are rejected so every generated struct has a stable name.

use std::borrow::Borrow;
use std::fs;
use std::path::Path;

use openapiv3::{
    AdditionalProperties, Components, IntegerFormat, MediaType, NumberFormat, OpenAPI, Operation,
    Parameter, ParameterSchemaOrContent, PathItem, ReferenceOr, Response, Schema, SchemaKind,
    StatusCode, Type, VariantOrUnknownOrEmpty,
};
use splitapi_define::{
    ApiDefinition, ApiResponse, Endpoint, Field, GeneratorConfig, IntegerWidth, NumberWidth,
    Param, ParamLocation, RequestBody, RestMethod, TypeDef, TypeDefKind, TypeRef,
};
use tracing::{debug, info, warn};

use crate::errors::GeneratorError;
use crate::naming::to_camel_case;
use crate::parser::extract_path_params;

const SCHEMAS: &str = "#/components/schemas/";
const PARAMETERS: &str = "#/components/parameters/";
const REQUEST_BODIES: &str = "#/components/requestBodies/";
const RESPONSES: &str = "#/components/responses/";

/// Longest `$ref` chain followed before giving up.
const MAX_REF_DEPTH: usize = 16;

/// Reads and parses an OpenAPI document.
///
/// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
///
/// ## Errors
///
/// - [`GeneratorError::SchemaRead`] if the file cannot be read
/// - [`GeneratorError::SchemaParse`] if it is not an OpenAPI 3.0 document
pub fn load_document(path: &Path) -> Result<OpenAPI, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|source| GeneratorError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<OpenAPI>(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<OpenAPI>(&content).map_err(|e| e.to_string())
    };
    let doc = parsed.map_err(|message| GeneratorError::SchemaParse {
        path: path.to_path_buf(),
        message,
    })?;

    if !doc.openapi.starts_with("3.0") {
        return Err(GeneratorError::SchemaParse {
            path: path.to_path_buf(),
            message: format!("unsupported OpenAPI version '{}', expected 3.0.x", doc.openapi),
        });
    }

    debug!(path = %path.display(), version = %doc.openapi, "Loaded OpenAPI document");
    Ok(doc)
}

/// Converts a parsed document into an [`ApiDefinition`].
///
/// Operations are visited in document path order and, within a path, in the
/// order GET, PUT, POST, DELETE, OPTIONS, HEAD, PATCH, TRACE. Operations
/// excluded by `config.filter_endpoints` are skipped; their types are kept.
///
/// ## Errors
///
/// - [`GeneratorError::UnresolvedReference`] for a `$ref` to a missing component
/// - [`GeneratorError::UnsupportedSchema`] for constructs with no Rust mapping
pub fn parse_document(
    doc: &OpenAPI,
    config: &GeneratorConfig,
) -> Result<ApiDefinition, GeneratorError> {
    let resolver = Resolver { doc };

    let mut types = Vec::new();
    if let Some(components) = &doc.components {
        for (name, schema) in &components.schemas {
            types.push(resolver.type_def(name, schema)?);
        }
    }

    let mut endpoints = Vec::new();
    for (path, item) in doc.paths.iter() {
        let item = match item {
            ReferenceOr::Item(item) => item,
            ReferenceOr::Reference { reference } => {
                return Err(GeneratorError::UnsupportedSchema {
                    context: format!("path '{path}'"),
                    reason: format!("path item references ('{reference}') are not supported"),
                });
            }
        };

        for (method, operation) in operations(item) {
            let endpoint = resolver.endpoint(path, method, item, operation, config)?;
            if !config.includes(&endpoint.name) {
                debug!(endpoint = %endpoint.name, "Skipping filtered endpoint");
                continue;
            }
            debug!(
                endpoint = %endpoint.name,
                method = %endpoint.method,
                path = %endpoint.path,
                kind = %endpoint.kind,
                "Parsed operation"
            );
            endpoints.push(endpoint);
        }
    }

    info!(
        title = %doc.info.title,
        endpoints = endpoints.len(),
        types = types.len(),
        "Parsed OpenAPI document"
    );

    Ok(ApiDefinition {
        title: doc.info.title.clone(),
        description: doc.info.description.clone(),
        version: doc.info.version.clone(),
        endpoints,
        types,
    })
}

/// The operations of a path item, in a fixed method order.
fn operations(item: &PathItem) -> impl Iterator<Item = (RestMethod, &Operation)> {
    [
        (RestMethod::Get, &item.get),
        (RestMethod::Put, &item.put),
        (RestMethod::Post, &item.post),
        (RestMethod::Delete, &item.delete),
        (RestMethod::Options, &item.options),
        (RestMethod::Head, &item.head),
        (RestMethod::Patch, &item.patch),
        (RestMethod::Trace, &item.trace),
    ]
    .into_iter()
    .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
}

/// Name of an operation: its `operationId` in camelCase, or method + path.
fn operation_name(method: RestMethod, path: &str, operation: &Operation) -> String {
    match &operation.operation_id {
        Some(id) => to_camel_case(id),
        None => to_camel_case(&format!("{} {}", method.to_string().to_lowercase(), path)),
    }
}

fn is_json(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

/// Picks the JSON media type out of a `content` map.
///
/// Returns `Ok(None)` for empty content and an error when only non-JSON
/// media types are declared.
fn json_media<'m>(
    content: impl IntoIterator<Item = (&'m String, &'m MediaType)>,
    context: &str,
) -> Result<Option<&'m MediaType>, GeneratorError> {
    let mut others = Vec::new();
    for (media_type, media) in content {
        if is_json(media_type) {
            return Ok(Some(media));
        }
        others.push(media_type.as_str());
    }

    if others.is_empty() {
        Ok(None)
    } else {
        Err(GeneratorError::UnsupportedSchema {
            context: context.to_string(),
            reason: format!("no JSON media type (found {})", others.join(", ")),
        })
    }
}

fn success_status(code: &StatusCode) -> Option<u16> {
    match code {
        StatusCode::Code(code) if (200..300).contains(code) => Some(*code),
        StatusCode::Range(2) => Some(200),
        _ => None,
    }
}

/// Resolves references against one document.
struct Resolver<'a> {
    doc: &'a OpenAPI,
}

impl<'a> Resolver<'a> {
    /// Follows `$ref`s into one `components` section until an item is found.
    fn resolve<T>(
        &self,
        mut item: &'a ReferenceOr<T>,
        section: &str,
        lookup: impl Fn(&'a Components, &str) -> Option<&'a ReferenceOr<T>>,
        context: &str,
    ) -> Result<&'a T, GeneratorError> {
        for _ in 0..MAX_REF_DEPTH {
            match item {
                ReferenceOr::Item(value) => return Ok(value),
                ReferenceOr::Reference { reference } => {
                    let unresolved = || GeneratorError::UnresolvedReference {
                        reference: reference.clone(),
                        context: context.to_string(),
                    };
                    let name = reference.strip_prefix(section).ok_or_else(unresolved)?;
                    item = self
                        .doc
                        .components
                        .as_ref()
                        .and_then(|components| lookup(components, name))
                        .ok_or_else(unresolved)?;
                }
            }
        }

        Err(GeneratorError::UnsupportedSchema {
            context: context.to_string(),
            reason: format!("reference chain longer than {MAX_REF_DEPTH}"),
        })
    }

    /// Maps a schema `$ref` to a named type, checking that it exists.
    fn named(&self, reference: &str, context: &str) -> Result<TypeRef, GeneratorError> {
        let exists = |name: &str| {
            self.doc
                .components
                .as_ref()
                .is_some_and(|components| components.schemas.contains_key(name))
        };

        match reference.strip_prefix(SCHEMAS) {
            Some(name) if exists(name) => Ok(TypeRef::named(name)),
            _ => Err(GeneratorError::UnresolvedReference {
                reference: reference.to_string(),
                context: context.to_string(),
            }),
        }
    }

    fn type_ref<S: Borrow<Schema>>(
        &self,
        schema: &ReferenceOr<S>,
        context: &str,
    ) -> Result<TypeRef, GeneratorError> {
        match schema {
            ReferenceOr::Reference { reference } => self.named(reference, context),
            ReferenceOr::Item(schema) => self.inline(schema.borrow(), context),
        }
    }

    fn inline(&self, schema: &Schema, context: &str) -> Result<TypeRef, GeneratorError> {
        let ty = match &schema.schema_kind {
            SchemaKind::Type(Type::String(_)) => TypeRef::String,
            SchemaKind::Type(Type::Integer(integer)) => match integer.format {
                VariantOrUnknownOrEmpty::Item(IntegerFormat::Int32) => {
                    TypeRef::Integer(IntegerWidth::I32)
                }
                _ => TypeRef::Integer(IntegerWidth::I64),
            },
            SchemaKind::Type(Type::Number(number)) => match number.format {
                VariantOrUnknownOrEmpty::Item(NumberFormat::Float) => {
                    TypeRef::Number(NumberWidth::F32)
                }
                _ => TypeRef::Number(NumberWidth::F64),
            },
            SchemaKind::Type(Type::Boolean(_)) => TypeRef::Boolean,
            SchemaKind::Type(Type::Array(array)) => match &array.items {
                Some(items) => TypeRef::array(self.type_ref(items, context)?),
                None => TypeRef::array(TypeRef::Any),
            },
            SchemaKind::Type(Type::Object(object)) => {
                if !object.properties.is_empty() {
                    return Err(inline_object(context));
                }
                self.map(object.additional_properties.as_ref(), context)?
            }
            SchemaKind::AllOf { all_of } if all_of.len() == 1 => {
                self.type_ref(&all_of[0], context)?
            }
            SchemaKind::Any(any) if !any.properties.is_empty() => {
                return Err(inline_object(context));
            }
            _ => TypeRef::Any,
        };
        Ok(ty)
    }

    fn map(
        &self,
        additional: Option<&AdditionalProperties>,
        context: &str,
    ) -> Result<TypeRef, GeneratorError> {
        match additional {
            Some(AdditionalProperties::Schema(value)) => Ok(TypeRef::Map(Some(Box::new(
                self.type_ref(&**value, context)?,
            )))),
            _ => Ok(TypeRef::Map(None)),
        }
    }

    /// Converts one `components.schemas` entry.
    fn type_def(
        &self,
        name: &str,
        schema: &ReferenceOr<Schema>,
    ) -> Result<TypeDef, GeneratorError> {
        let context = format!("schema '{name}'");
        let schema = match schema {
            ReferenceOr::Reference { reference } => {
                return Ok(TypeDef {
                    name: name.to_string(),
                    description: None,
                    kind: TypeDefKind::Alias(self.named(reference, &context)?),
                });
            }
            ReferenceOr::Item(schema) => schema,
        };

        let kind = match &schema.schema_kind {
            SchemaKind::Type(Type::Object(object))
                if !object.properties.is_empty() || object.additional_properties.is_none() =>
            {
                TypeDefKind::Object(self.fields(name, &object.properties, &object.required)?)
            }
            SchemaKind::Any(any) if !any.properties.is_empty() => {
                TypeDefKind::Object(self.fields(name, &any.properties, &any.required)?)
            }
            SchemaKind::Type(Type::Object(object)) => {
                TypeDefKind::Alias(self.map(object.additional_properties.as_ref(), &context)?)
            }
            _ => TypeDefKind::Alias(self.inline(schema, &context)?),
        };

        Ok(TypeDef {
            name: name.to_string(),
            description: schema.schema_data.description.clone(),
            kind,
        })
    }

    fn fields<'p>(
        &self,
        type_name: &str,
        properties: impl IntoIterator<Item = (&'p String, &'p ReferenceOr<Box<Schema>>)>,
        required: &[String],
    ) -> Result<Vec<Field>, GeneratorError> {
        properties
            .into_iter()
            .map(|(name, schema)| {
                let context = format!("schema '{type_name}' property '{name}'");
                let (nullable, description) = match schema {
                    ReferenceOr::Item(schema) => (
                        schema.schema_data.nullable,
                        schema.schema_data.description.clone(),
                    ),
                    ReferenceOr::Reference { .. } => (false, None),
                };
                Ok(Field {
                    name: name.clone(),
                    ty: self.type_ref(schema, &context)?,
                    required: required.contains(name),
                    nullable,
                    description,
                })
            })
            .collect()
    }

    fn endpoint(
        &self,
        path: &str,
        method: RestMethod,
        item: &'a PathItem,
        operation: &'a Operation,
        config: &GeneratorConfig,
    ) -> Result<Endpoint, GeneratorError> {
        let name = operation_name(method, path, operation);
        let context = format!("operation '{name}' ({method} {path})");

        let params = self.params(path, item, operation, &context)?;
        let body = self.body(operation, &context)?;
        let response = self.response(operation, &context)?;
        let kind = config
            .kind_override(&name)
            .unwrap_or_else(|| method.default_kind());

        Ok(Endpoint {
            description: operation
                .summary
                .clone()
                .or_else(|| operation.description.clone()),
            name,
            kind,
            method,
            path: path.to_string(),
            params,
            body,
            response,
        })
    }

    /// Path-level parameters merged with operation-level ones.
    ///
    /// An operation parameter replaces a path-level one with the same name
    /// and location. Header and cookie parameters are skipped.
    fn params(
        &self,
        path: &str,
        item: &'a PathItem,
        operation: &'a Operation,
        context: &str,
    ) -> Result<Vec<Param>, GeneratorError> {
        let mut params: Vec<Param> = Vec::new();

        for parameter in item.parameters.iter().chain(&operation.parameters) {
            let parameter =
                self.resolve(parameter, PARAMETERS, |c, name| c.parameters.get(name), context)?;
            let Some(param) = self.param(parameter, context)? else {
                continue;
            };
            match params
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }

        let template = extract_path_params(path);
        for name in &template {
            let declared = params
                .iter()
                .any(|p| p.location == ParamLocation::Path && p.name == *name);
            if !declared {
                return Err(GeneratorError::UnsupportedSchema {
                    context: context.to_string(),
                    reason: format!("path parameter '{name}' is not declared"),
                });
            }
        }
        if let Some(unused) = params
            .iter()
            .find(|p| p.location == ParamLocation::Path && !template.contains(&p.name.as_str()))
        {
            return Err(GeneratorError::UnsupportedSchema {
                context: context.to_string(),
                reason: format!("path parameter '{}' is not in the path template", unused.name),
            });
        }

        Ok(params)
    }

    fn param(&self, parameter: &Parameter, context: &str) -> Result<Option<Param>, GeneratorError> {
        let (location, data) = match parameter {
            Parameter::Path { parameter_data, .. } => (ParamLocation::Path, parameter_data),
            Parameter::Query { parameter_data, .. } => (ParamLocation::Query, parameter_data),
            Parameter::Header { parameter_data, .. } | Parameter::Cookie { parameter_data, .. } => {
                warn!(
                    parameter = %parameter_data.name,
                    context,
                    "Skipping header/cookie parameter"
                );
                return Ok(None);
            }
        };

        let param_context = format!("{context} parameter '{}'", data.name);
        let ty = match &data.format {
            ParameterSchemaOrContent::Schema(schema) => self.type_ref(schema, &param_context)?,
            ParameterSchemaOrContent::Content(_) => {
                return Err(GeneratorError::UnsupportedSchema {
                    context: param_context,
                    reason: "parameters with `content` are not supported".to_string(),
                });
            }
        };

        Ok(Some(Param {
            name: data.name.clone(),
            location,
            ty,
            required: location == ParamLocation::Path || data.required,
            description: data.description.clone(),
        }))
    }

    fn body(
        &self,
        operation: &'a Operation,
        context: &str,
    ) -> Result<Option<RequestBody>, GeneratorError> {
        let Some(body) = &operation.request_body else {
            return Ok(None);
        };
        let body = self.resolve(body, REQUEST_BODIES, |c, name| c.request_bodies.get(name), context)?;
        let body_context = format!("{context} request body");

        let Some(media) = json_media(&body.content, &body_context)? else {
            return Ok(None);
        };
        let ty = match &media.schema {
            Some(schema) => self.type_ref(schema, &body_context)?,
            None => TypeRef::Any,
        };

        Ok(Some(RequestBody {
            ty,
            required: body.required,
        }))
    }

    /// The first 2xx response (or `default`), as declared.
    fn response(
        &self,
        operation: &'a Operation,
        context: &str,
    ) -> Result<ApiResponse, GeneratorError> {
        let responses = &operation.responses;
        let success = responses
            .responses
            .iter()
            .find_map(|(code, response)| success_status(code).map(|status| (status, response)))
            .or_else(|| responses.default.as_ref().map(|response| (200, response)));

        let Some((status, response)) = success else {
            warn!(context, "No success response declared; response is untyped JSON");
            return Ok(ApiResponse::json(200, TypeRef::Any));
        };

        let response: &Response =
            self.resolve(response, RESPONSES, |c, name| c.responses.get(name), context)?;
        let response_context = format!("{context} response {status}");

        match json_media(&response.content, &response_context)? {
            Some(media) => {
                let ty = match &media.schema {
                    Some(schema) => self.type_ref(schema, &response_context)?,
                    None => TypeRef::Any,
                };
                Ok(ApiResponse::json(status, ty))
            }
            None => Ok(ApiResponse::Empty { status }),
        }
    }
}

fn inline_object(context: &str) -> GeneratorError {
    GeneratorError::UnsupportedSchema {
        context: context.to_string(),
        reason: "inline objects with properties must be declared in components.schemas"
            .to_string(),
    }
}
