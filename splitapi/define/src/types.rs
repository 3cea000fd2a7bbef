//! Core types for API definitions.
//!
//! This module provides the fundamental types produced from an OpenAPI
//! document and consumed by the code generator:
//!
//! - [`ApiDefinition`] - The top-level API definition
//! - [`Endpoint`] - Individual operation definitions
//! - [`EndpointKind`] - Query vs. mutation classification
//! - [`RestMethod`] - HTTP method enumeration

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::response::ApiResponse;
use crate::schema::{TypeDef, TypeRef};

/// HTTP methods supported by REST APIs.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use splitapi_define::RestMethod;
///
/// let method = RestMethod::from_str("GET").unwrap();
/// assert_eq!(method, RestMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use splitapi_define::RestMethod;
///
/// assert_eq!(RestMethod::Post.to_string(), "POST");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource
    #[default]
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
    /// HTTP TRACE - Echo the request
    Trace,
}

impl RestMethod {
    /// Returns `true` for methods that only read server state.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// The endpoint kind an operation with this method gets by default.
    ///
    /// ```
    /// use splitapi_define::{EndpointKind, RestMethod};
    ///
    /// assert_eq!(RestMethod::Get.default_kind(), EndpointKind::Query);
    /// assert_eq!(RestMethod::Delete.default_kind(), EndpointKind::Mutation);
    /// ```
    pub fn default_kind(&self) -> EndpointKind {
        match self {
            Self::Get => EndpointKind::Query,
            _ => EndpointKind::Mutation,
        }
    }
}

/// Whether an endpoint reads (query) or writes (mutation).
///
/// Queries are cached by the base client and get `use_*_query` hooks;
/// mutations are never cached and get `use_*_mutation` hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EndpointKind {
    /// Read endpoint.
    Query,
    /// Write endpoint.
    Mutation,
}

/// A complete API definition, derived from one OpenAPI document.
///
/// Endpoints and types keep the order in which they appear in the source
/// document so that generation is deterministic.
///
/// ## Examples
///
/// ```
/// use splitapi_define::{ApiDefinition, ApiResponse, Endpoint, EndpointKind, RestMethod, TypeRef};
///
/// let api = ApiDefinition {
///     title: "BlockPy Server API".to_string(),
///     description: None,
///     version: "1.0.0".to_string(),
///     endpoints: vec![Endpoint {
///         name: "getUsers".to_string(),
///         kind: EndpointKind::Query,
///         method: RestMethod::Get,
///         path: "/v1/user".to_string(),
///         description: None,
///         params: vec![],
///         body: None,
///         response: ApiResponse::json(200, TypeRef::array(TypeRef::named("UserSchema"))),
///     }],
///     types: vec![],
/// };
///
/// assert_eq!(api.endpoints.len(), 1);
/// assert!(api.endpoint("getUsers").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDefinition {
    /// `info.title` of the source document.
    pub title: String,
    /// `info.description` of the source document.
    pub description: Option<String>,
    /// `info.version` of the source document.
    pub version: String,
    /// All endpoints, in document order.
    pub endpoints: Vec<Endpoint>,
    /// Named types from `components.schemas`, in document order.
    pub types: Vec<TypeDef>,
}

impl ApiDefinition {
    /// Looks up an endpoint by operation name.
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|ep| ep.name == name)
    }

    /// Looks up a named type.
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.name == name)
    }
}

/// A single API operation.
///
/// ## Path Parameters
///
/// Paths keep their template parameters in curly braces: `/v1/user/{user_id}`.
/// Each one has a matching [`Param`] with [`ParamLocation::Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name in camelCase (e.g. `getUsers`).
    ///
    /// This is the key the endpoint is registered under on the base client.
    pub name: String,
    /// Query or mutation.
    pub kind: EndpointKind,
    /// HTTP method for this endpoint.
    pub method: RestMethod,
    /// Path template (e.g. `/v1/user/{user_id}`).
    pub path: String,
    /// Summary or description from the operation.
    pub description: Option<String>,
    /// Path and query parameters.
    pub params: Vec<Param>,
    /// JSON request body, if the operation declares one.
    pub body: Option<RequestBody>,
    /// Success response.
    pub response: ApiResponse,
}

impl Endpoint {
    /// Returns `true` when the endpoint needs no argument at all.
    pub fn is_void(&self) -> bool {
        self.params.is_empty() && self.body.is_none()
    }

    /// Parameters bound into the path template.
    pub fn path_params(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
    }

    /// Parameters sent in the query string.
    pub fn query_params(&self) -> impl Iterator<Item = &Param> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
    }
}

/// Where a parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Wire name of the parameter.
    pub name: String,
    /// Where the parameter is sent.
    pub location: ParamLocation,
    /// Parameter type.
    pub ty: TypeRef,
    /// Path parameters are always required.
    pub required: bool,
    /// Parameter description.
    pub description: Option<String>,
}

/// A JSON request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    /// Body type.
    pub ty: TypeRef,
    /// Whether the body must be sent.
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn endpoint(params: Vec<Param>, body: Option<RequestBody>) -> Endpoint {
        Endpoint {
            name: "getUser".to_string(),
            kind: EndpointKind::Query,
            method: RestMethod::Get,
            path: "/v1/user/{user_id}".to_string(),
            description: None,
            params,
            body,
            response: ApiResponse::Empty { status: 204 },
        }
    }

    #[test]
    fn rest_method_display_uppercase() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Patch.to_string(), "PATCH");
        assert_eq!(RestMethod::Trace.to_string(), "TRACE");
    }

    #[test]
    fn rest_method_from_str_is_case_sensitive() {
        assert_eq!(RestMethod::from_str("DELETE").unwrap(), RestMethod::Delete);
        assert!(RestMethod::from_str("get").is_err());
        assert!(RestMethod::from_str("").is_err());
    }

    #[test]
    fn rest_method_defaults_to_get() {
        assert_eq!(RestMethod::default(), RestMethod::Get);
    }

    #[test]
    fn rest_method_iter_all_variants() {
        assert_eq!(RestMethod::iter().count(), 8);
    }

    #[test]
    fn only_get_defaults_to_query() {
        for method in RestMethod::iter() {
            let expected = if method == RestMethod::Get {
                EndpointKind::Query
            } else {
                EndpointKind::Mutation
            };
            assert_eq!(method.default_kind(), expected, "{method}");
        }
    }

    #[test]
    fn endpoint_kind_serde_lowercase() {
        let json = serde_json::to_string(&EndpointKind::Mutation).unwrap();
        assert_eq!(json, "\"mutation\"");
        let kind: EndpointKind = serde_json::from_str("\"query\"").unwrap();
        assert_eq!(kind, EndpointKind::Query);
    }

    #[test]
    fn void_endpoint_has_no_params_or_body() {
        assert!(endpoint(vec![], None).is_void());

        let with_body = endpoint(
            vec![],
            Some(RequestBody {
                ty: TypeRef::named("UserSchema"),
                required: true,
            }),
        );
        assert!(!with_body.is_void());
    }

    #[test]
    fn params_split_by_location() {
        let ep = endpoint(
            vec![
                Param {
                    name: "user_id".to_string(),
                    location: ParamLocation::Path,
                    ty: TypeRef::integer(),
                    required: true,
                    description: None,
                },
                Param {
                    name: "verbose".to_string(),
                    location: ParamLocation::Query,
                    ty: TypeRef::Boolean,
                    required: false,
                    description: None,
                },
            ],
            None,
        );

        let path: Vec<_> = ep.path_params().map(|p| p.name.as_str()).collect();
        let query: Vec<_> = ep.query_params().map(|p| p.name.as_str()).collect();
        assert_eq!(path, vec!["user_id"]);
        assert_eq!(query, vec!["verbose"]);
    }
}
