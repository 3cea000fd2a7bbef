//! Shared test utilities for splitapi-gen tests.
//!
//! Fixture builders for API definitions and a formatter for generated tokens.

use proc_macro2::TokenStream;
use splitapi_define::{
    ApiDefinition, ApiResponse, Endpoint, Field, Param, ParamLocation, RestMethod, TypeDef,
    TypeDefKind, TypeRef,
};

/// Creates an endpoint with no parameters, no body and the method's default kind.
pub fn make_endpoint(name: &str, method: RestMethod, path: &str, response: ApiResponse) -> Endpoint {
    Endpoint {
        name: name.to_string(),
        kind: method.default_kind(),
        method,
        path: path.to_string(),
        description: None,
        params: vec![],
        body: None,
        response,
    }
}

/// Creates a parameter.
pub fn make_param(name: &str, location: ParamLocation, ty: TypeRef, required: bool) -> Param {
    Param {
        name: name.to_string(),
        location,
        ty,
        required,
        description: None,
    }
}

/// Creates an object field.
pub fn make_field(name: &str, ty: TypeRef, required: bool, nullable: bool) -> Field {
    Field {
        name: name.to_string(),
        ty,
        required,
        nullable,
        description: None,
    }
}

/// The BlockPy user API: `GET /v1/user` returning `UserSchema[]`, plus `Error`.
pub fn make_users_api() -> ApiDefinition {
    let user_fields = vec![
        make_field("active", TypeRef::Boolean, false, true),
        make_field("confirmed_at", TypeRef::String, false, true),
        make_field("email", TypeRef::String, false, true),
        make_field("id", TypeRef::integer(), false, false),
    ];

    ApiDefinition {
        title: "BlockPy Server API".to_string(),
        description: Some("Users and courses".to_string()),
        version: "1.0.0".to_string(),
        endpoints: vec![make_endpoint(
            "getUsers",
            RestMethod::Get,
            "/v1/user",
            ApiResponse::json(200, TypeRef::array(TypeRef::named("UserSchema"))),
        )],
        types: vec![
            TypeDef {
                name: "UserSchema".to_string(),
                description: None,
                kind: TypeDefKind::Object(user_fields),
            },
            TypeDef {
                name: "Error".to_string(),
                description: Some("Error payload".to_string()),
                kind: TypeDefKind::Object(vec![
                    make_field("message", TypeRef::String, true, false),
                    make_field("errors", TypeRef::Map(None), false, false),
                ]),
            },
        ],
    }
}

/// Formats generated code using prettyplease.
///
/// ## Errors
///
/// Returns an error string if the code fails to parse.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

/// Strips all whitespace so assertions do not depend on line breaking.
///
/// Also drops the trailing commas the formatter inserts before a closing
/// delimiter when it wraps a list across lines.
pub fn compact(code: &str) -> String {
    let joined: String = code.split_whitespace().collect();
    joined
        .replace(",>", ">")
        .replace(",)", ")")
        .replace(",}", "}")
        .replace(",]", "]")
}
