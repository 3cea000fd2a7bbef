//! Per-endpoint generation.
//!
//! Each endpoint gets:
//!
//! - `{Name}ApiArg`: `()` for endpoints without parameters or body,
//!   otherwise a struct with one field per parameter plus `body`
//! - `{Name}ApiResponse`: alias to the success response type
//! - a registration statement run inside the client's `inject()`
//!
//! For `GET /v1/user` named `getUsers` returning `UserSchema[]`:
//!
//! ```ignore
//! pub type GetUsersApiArg = ();
//! pub type GetUsersApiResponse = Vec<UserSchema>;
//!
//! let get_users = build.query::<GetUsersApiArg, GetUsersApiResponse, _>(
//!     "getUsers",
//!     |_arg: &GetUsersApiArg| Ok(splitapi::RequestDescriptor::new("/v1/user")),
//! )?;
//! ```

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use splitapi_define::{ApiResponse, Endpoint, EndpointKind, Param, RestMethod, TypeRef};

use crate::codegen::types::{doc_attr, rust_type};
use crate::naming::{field_ident, to_pascal_case};
use crate::parser::{extract_path_params, path_format_string};

/// Name of the argument type (`GetUsersApiArg`).
pub fn arg_type_ident(endpoint: &Endpoint) -> Ident {
    format_ident!("{}ApiArg", to_pascal_case(&endpoint.name))
}

/// Name of the response type (`GetUsersApiResponse`).
pub fn response_type_ident(endpoint: &Endpoint) -> Ident {
    format_ident!("{}ApiResponse", to_pascal_case(&endpoint.name))
}

/// Name of the local variable and accessor holding the endpoint handle (`get_users`).
pub fn handle_ident(endpoint: &Endpoint) -> Ident {
    field_ident(&endpoint.name)
}

/// Generates `{Name}ApiArg` and `{Name}ApiResponse`.
pub fn generate_endpoint_types(endpoint: &Endpoint) -> TokenStream {
    let arg = generate_arg_type(endpoint);
    let response = generate_response_type(endpoint);
    quote! {
        #arg
        #response
    }
}

fn generate_arg_type(endpoint: &Endpoint) -> TokenStream {
    let name = arg_type_ident(endpoint);
    let doc = format!(" Argument of `{}` ({} {}).", endpoint.name, endpoint.method, endpoint.path);

    if endpoint.is_void() {
        return quote! {
            #[doc = #doc]
            pub type #name = ();
        };
    }

    let params = endpoint.params.iter().map(|param| {
        let param_doc = doc_attr(param.description.as_deref());
        let ident = field_ident(&param.name);
        let ty = rust_type(&param.ty);
        if param.required {
            quote! {
                #param_doc
                pub #ident: #ty
            }
        } else {
            quote! {
                #param_doc
                #[serde(skip_serializing_if = "Option::is_none")]
                pub #ident: Option<#ty>
            }
        }
    });

    let body = endpoint.body.as_ref().map(|body| {
        let ty = rust_type(&body.ty);
        if body.required {
            quote! {
                /// JSON request body.
                pub body: #ty,
            }
        } else {
            quote! {
                /// JSON request body, omitted when `None`.
                #[serde(skip_serializing_if = "Option::is_none")]
                pub body: Option<#ty>,
            }
        }
    });

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
        pub struct #name {
            #(#params,)*
            #body
        }
    }
}

fn generate_response_type(endpoint: &Endpoint) -> TokenStream {
    let name = response_type_ident(endpoint);
    let (doc, ty) = match &endpoint.response {
        ApiResponse::Json { status, ty } => (
            format!(" Response of `{}` (status {status}).", endpoint.name),
            rust_type(ty),
        ),
        ApiResponse::Empty { status } => (
            format!(" Response of `{}` (status {status}, no content).", endpoint.name),
            rust_type(&TypeRef::Unit),
        ),
    };

    quote! {
        #[doc = #doc]
        pub type #name = #ty;
    }
}

/// Generates the `let {handle} = build.{query|mutation}::<..>(..)?;` statement.
///
/// Expects an `EndpointBuilder` named `build` in scope.
pub fn generate_registration(endpoint: &Endpoint) -> TokenStream {
    let handle = handle_ident(endpoint);
    let arg = arg_type_ident(endpoint);
    let response = response_type_ident(endpoint);
    let name = &endpoint.name;
    let register = match endpoint.kind {
        EndpointKind::Query => quote! { query },
        EndpointKind::Mutation => quote! { mutation },
    };

    let closure = if endpoint.is_void() {
        let path = &endpoint.path;
        let method = method_call(endpoint.method);
        quote! {
            |_arg: &#arg| Ok(splitapi::RequestDescriptor::new(#path) #method)
        }
    } else {
        let body = closure_body(endpoint);
        quote! {
            |arg: &#arg| { #body }
        }
    };

    quote! {
        let #handle = build.#register::<#arg, #response, _>(#name, #closure)?;
    }
}

/// `.method(splitapi::RestMethod::X)` for anything but GET.
fn method_call(method: RestMethod) -> TokenStream {
    if method == RestMethod::Get {
        return TokenStream::new();
    }
    let variant = format_ident!("{}", to_pascal_case(&method.to_string()));
    quote! { .method(splitapi::RestMethod::#variant) }
}

fn query_param_call(param: &Param) -> TokenStream {
    let name = &param.name;
    let ident = field_ident(&param.name);
    match (&param.ty, param.required) {
        (TypeRef::Array(_), true) => quote! { .param_list(#name, &arg.#ident) },
        (TypeRef::Array(_), false) => quote! { .param_list(#name, arg.#ident.iter().flatten()) },
        (_, true) => quote! { .param(#name, &arg.#ident) },
        (_, false) => quote! { .opt_param(#name, arg.#ident.as_ref()) },
    }
}

fn closure_body(endpoint: &Endpoint) -> TokenStream {
    let template = extract_path_params(&endpoint.path);
    let url = if template.is_empty() {
        let path = &endpoint.path;
        quote! { #path }
    } else {
        let format = path_format_string(&endpoint.path);
        let segments = template.iter().map(|name| {
            let ident = field_ident(name);
            quote! { splitapi::path_segment(&arg.#ident) }
        });
        quote! { format!(#format, #(#segments),*) }
    };

    let method = method_call(endpoint.method);
    let params = endpoint.query_params().map(query_param_call);

    let finish = match &endpoint.body {
        Some(body) if body.required => quote! { request.json(&arg.body) },
        Some(_) => quote! {
            match &arg.body {
                Some(body) => request.json(body),
                None => Ok(request),
            }
        },
        None => quote! { Ok(request) },
    };

    quote! {
        let request = splitapi::RequestDescriptor::new(#url)
            #method
            #(#params)*;
        #finish
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{compact, format_generated_code, make_endpoint, make_param};
    use splitapi_define::{ParamLocation, RequestBody};

    /// Wraps a registration statement so it parses as a file.
    fn in_fn(tokens: TokenStream) -> TokenStream {
        quote! {
            fn inject() -> Result<(), splitapi::ConfigError> {
                #tokens
                Ok(())
            }
        }
    }

    fn get_users() -> Endpoint {
        make_endpoint(
            "getUsers",
            RestMethod::Get,
            "/v1/user",
            ApiResponse::json(200, TypeRef::array(TypeRef::named("UserSchema"))),
        )
    }

    fn update_user() -> Endpoint {
        let mut endpoint = make_endpoint(
            "updateUser",
            RestMethod::Put,
            "/v1/user/{user_id}",
            ApiResponse::json(200, TypeRef::named("UserSchema")),
        );
        endpoint.params = vec![
            make_param("user_id", ParamLocation::Path, TypeRef::integer(), true),
            make_param("notify", ParamLocation::Query, TypeRef::Boolean, false),
            make_param("tag", ParamLocation::Query, TypeRef::array(TypeRef::String), true),
        ];
        endpoint.body = Some(RequestBody {
            ty: TypeRef::named("UserSchema"),
            required: true,
        });
        endpoint
    }

    #[test]
    fn void_endpoint_types() {
        let code = format_generated_code(&generate_endpoint_types(&get_users())).unwrap();

        assert!(code.contains("pub type GetUsersApiArg = ();"));
        assert!(code.contains("pub type GetUsersApiResponse = Vec<UserSchema>;"));
        assert!(code.contains("/// Response of `getUsers` (status 200)."));
        assert!(code.contains("/// Argument of `getUsers` (GET /v1/user)."));
    }

    #[test]
    fn void_endpoint_registration() {
        let code = format_generated_code(&in_fn(generate_registration(&get_users()))).unwrap();
        let code = compact(&code);

        assert!(code.contains(&compact(
            "let get_users = build.query::<GetUsersApiArg, GetUsersApiResponse, _>("
        )));
        assert!(code.contains(&compact(
            r#""getUsers", |_arg: &GetUsersApiArg| Ok(splitapi::RequestDescriptor::new("/v1/user"))"#
        )));
        assert!(!code.contains(".method("));
    }

    #[test]
    fn arg_struct_fields() {
        let code = format_generated_code(&generate_endpoint_types(&update_user())).unwrap();

        assert!(code.contains("pub struct UpdateUserApiArg"));
        assert!(code.contains("#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]"));
        assert!(code.contains("pub user_id: i64"));
        assert!(code.contains("pub notify: Option<bool>"));
        assert!(code.contains("pub tag: Vec<String>"));
        assert!(code.contains("pub body: UserSchema"));
        assert!(code.contains("pub type UpdateUserApiResponse = UserSchema;"));
    }

    #[test]
    fn registration_builds_request() {
        let code = format_generated_code(&in_fn(generate_registration(&update_user()))).unwrap();
        let code = compact(&code);

        assert!(code.contains(&compact(
            ".mutation::<UpdateUserApiArg, UpdateUserApiResponse, _>("
        )));
        assert!(code.contains(&compact(
            r#"format!("/v1/user/{}", splitapi::path_segment(&arg.user_id))"#
        )));
        assert!(code.contains(&compact(".method(splitapi::RestMethod::Put)")));
        assert!(code.contains(&compact(r#".opt_param("notify", arg.notify.as_ref())"#)));
        assert!(code.contains(&compact(r#".param_list("tag", &arg.tag)"#)));
        assert!(code.contains(&compact("request.json(&arg.body)")));
    }

    #[test]
    fn optional_body_is_sent_only_when_present() {
        let mut endpoint = update_user();
        endpoint.body = Some(RequestBody {
            ty: TypeRef::Any,
            required: false,
        });

        let types = format_generated_code(&generate_endpoint_types(&endpoint)).unwrap();
        assert!(types.contains("pub body: Option<serde_json::Value>"));

        let code = compact(&format_generated_code(&in_fn(generate_registration(&endpoint))).unwrap());
        assert!(code.contains(&compact("Some(body) => request.json(body)")));
        assert!(code.contains(&compact("None => Ok(request)")));
    }

    #[test]
    fn empty_response_is_unit() {
        let endpoint = make_endpoint(
            "deleteUser",
            RestMethod::Delete,
            "/v1/user",
            ApiResponse::Empty { status: 204 },
        );
        let code = format_generated_code(&generate_endpoint_types(&endpoint)).unwrap();

        assert!(code.contains("pub type DeleteUserApiResponse = ();"));
        assert!(code.contains("no content"));
    }

    #[test]
    fn non_get_void_endpoint_sets_method() {
        let endpoint = make_endpoint(
            "logout",
            RestMethod::Post,
            "/v1/logout",
            ApiResponse::Empty { status: 204 },
        );
        let code = compact(&format_generated_code(&in_fn(generate_registration(&endpoint))).unwrap());

        assert!(code.contains(&compact(".mutation::<LogoutApiArg, LogoutApiResponse, _>(")));
        assert!(code.contains(&compact(".method(splitapi::RestMethod::Post)")));
    }
}
