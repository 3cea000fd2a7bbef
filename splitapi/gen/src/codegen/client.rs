//! Client struct generation.
//!
//! Generates the typed client named after `export_name`, its `inject()`
//! constructor, one accessor per endpoint, the optional hook accessors, and
//! the free constructor function that injects into the configured base API.
//!
//! For `export_name = "serverApi"` and a single `getUsers` query:
//!
//! ```ignore
//! #[derive(Debug, Clone)]
//! pub struct ServerApi {
//!     api: splitapi::Api,
//!     get_users: splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse>,
//! }
//!
//! impl ServerApi {
//!     pub fn inject(api: &splitapi::Api) -> Result<Self, splitapi::ConfigError> { ... }
//!     pub fn api(&self) -> &splitapi::Api { ... }
//!     pub fn get_users(&self) -> &splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse> { ... }
//!     pub async fn use_get_users_query(&self, arg: GetUsersApiArg) -> splitapi::QueryHook<...> { ... }
//! }
//!
//! pub fn server_api() -> Result<ServerApi, splitapi::ConfigError> {
//!     ServerApi::inject(&crate::empty_api::empty_split_api()?)
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use splitapi_define::{ApiDefinition, Endpoint, EndpointKind, HookFlags};

use crate::codegen::endpoints::{
    arg_type_ident, generate_registration, handle_ident, response_type_ident,
};
use crate::naming::{field_ident, ident, to_pascal_case, to_snake_case};

/// What the client is called and where its base API comes from.
#[derive(Debug, Clone, Copy)]
pub struct ClientOptions<'a> {
    /// `export_name` from the configuration (`serverApi`).
    pub export_name: &'a str,
    /// Which hook accessors to generate.
    pub hooks: HookFlags,
    /// Module path of the base API file inside the crate (`["empty_api"]`).
    pub base_module: &'a [String],
    /// Base API constructor (`empty_split_api`).
    pub api_import: &'a str,
}

fn handle_type(endpoint: &Endpoint) -> TokenStream {
    let arg = arg_type_ident(endpoint);
    let response = response_type_ident(endpoint);
    match endpoint.kind {
        EndpointKind::Query => quote! { splitapi::QueryEndpoint<#arg, #response> },
        EndpointKind::Mutation => quote! { splitapi::MutationEndpoint<#arg, #response> },
    }
}

fn accessor(endpoint: &Endpoint) -> TokenStream {
    let handle = handle_ident(endpoint);
    let ty = handle_type(endpoint);
    let summary = format!(" `{} {}`", endpoint.method, endpoint.path);
    let description = endpoint
        .description
        .as_deref()
        .map(|text| format!(" {text}"));
    let description = description.iter();

    quote! {
        #[doc = #summary]
        #(
            #[doc = ""]
            #[doc = #description]
        )*
        pub fn #handle(&self) -> &#ty {
            &self.#handle
        }
    }
}

fn hooks(endpoint: &Endpoint, flags: HookFlags) -> TokenStream {
    let handle = handle_ident(endpoint);
    let arg = arg_type_ident(endpoint);
    let response = response_type_ident(endpoint);
    let snake = to_snake_case(&endpoint.name);
    let name = &endpoint.name;

    match endpoint.kind {
        EndpointKind::Query => {
            let eager = flags.queries.then(|| {
                let hook = format_ident!("use_{}_query", snake);
                let doc = format!(" Fetches `{name}` with `arg` and tracks the request state.");
                quote! {
                    #[doc = #doc]
                    pub async fn #hook(&self, arg: #arg) -> splitapi::QueryHook<#arg, #response> {
                        splitapi::QueryHook::start(self.api.clone(), self.#handle.clone(), arg).await
                    }
                }
            });
            let lazy = flags.lazy_queries.then(|| {
                let hook = format_ident!("use_lazy_{}_query", snake);
                let doc = format!(" Tracks `{name}` without fetching until `fetch` is called.");
                quote! {
                    #[doc = #doc]
                    pub fn #hook(&self) -> splitapi::QueryHook<#arg, #response> {
                        splitapi::QueryHook::lazy(self.api.clone(), self.#handle.clone())
                    }
                }
            });
            quote! { #eager #lazy }
        }
        EndpointKind::Mutation => {
            let hook = flags.mutations.then(|| {
                let hook = format_ident!("use_{}_mutation", snake);
                let doc = format!(" Tracks `{name}` runs started with `trigger`.");
                quote! {
                    #[doc = #doc]
                    pub fn #hook(&self) -> splitapi::MutationHook<#arg, #response> {
                        splitapi::MutationHook::new(self.api.clone(), self.#handle.clone())
                    }
                }
            });
            quote! { #hook }
        }
    }
}

/// Generates the client struct, its impl and the constructor function.
pub fn generate_client(api: &ApiDefinition, options: &ClientOptions<'_>) -> TokenStream {
    let client = ident(&to_pascal_case(options.export_name));
    let constructor = field_ident(options.export_name);

    let handles: Vec<_> = api.endpoints.iter().map(handle_ident).collect();
    let handle_types = api.endpoints.iter().map(handle_type);
    let registrations = api.endpoints.iter().map(generate_registration);
    let accessors = api.endpoints.iter().map(accessor);
    let hook_fns = api.endpoints.iter().map(|ep| hooks(ep, options.hooks));

    let builder = if api.endpoints.is_empty() {
        quote! { let build = api.inject_endpoints(splitapi::InjectOptions { override_existing: false }); }
    } else {
        quote! { let mut build = api.inject_endpoints(splitapi::InjectOptions { override_existing: false }); }
    };

    let segments = options.base_module.iter().map(|segment| ident(segment));
    let import = ident(options.api_import);
    let base_path = quote! { crate #(:: #segments)* :: #import };
    let base_display = std::iter::once("crate".to_string())
        .chain(options.base_module.iter().cloned())
        .collect::<Vec<_>>()
        .join("::");

    let struct_doc = format!(" Typed client for {}.", api.title);
    let inject_doc = format!(
        " Registers the {} endpoint(s) on `api` and returns the extended client.",
        api.endpoints.len()
    );
    let constructor_doc = format!(
        " Creates a [`{client}`] on top of the base API from `{base_display}::{}`.",
        options.api_import
    );

    quote! {
        #[doc = #struct_doc]
        #[derive(Debug, Clone)]
        pub struct #client {
            api: splitapi::Api,
            #(#handles: #handle_types,)*
        }

        impl #client {
            #[doc = #inject_doc]
            ///
            /// `api` itself is left unchanged.
            ///
            /// ## Errors
            ///
            /// Returns `ConfigError::DuplicateEndpoint` if `api` already has an
            /// endpoint with one of these names.
            pub fn inject(api: &splitapi::Api) -> Result<Self, splitapi::ConfigError> {
                #builder
                #(#registrations)*
                Ok(Self {
                    api: build.finish(),
                    #(#handles,)*
                })
            }

            /// The base API extended with this client's endpoints.
            pub fn api(&self) -> &splitapi::Api {
                &self.api
            }

            #(#accessors)*

            #(#hook_fns)*
        }

        #[doc = #constructor_doc]
        ///
        /// ## Errors
        ///
        /// Fails if the base API cannot be built or already has one of the endpoints.
        pub fn #constructor() -> Result<#client, splitapi::ConfigError> {
            #client::inject(&#base_path()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{compact, format_generated_code, make_endpoint, make_users_api};
    use splitapi_define::{ApiResponse, RestMethod};

    fn options(hooks: HookFlags) -> ClientOptions<'static> {
        const BASE: &[String] = &[];
        ClientOptions {
            export_name: "serverApi",
            hooks,
            base_module: BASE,
            api_import: "empty_split_api",
        }
    }

    fn all_hooks() -> HookFlags {
        HookFlags {
            queries: true,
            lazy_queries: true,
            mutations: true,
        }
    }

    #[test]
    fn client_struct_and_constructor() {
        let api = make_users_api();
        let base = vec!["empty_api".to_string()];
        let options = ClientOptions {
            base_module: &base,
            ..options(HookFlags::default())
        };
        let code = format_generated_code(&generate_client(&api, &options)).unwrap();

        assert!(code.contains("pub struct ServerApi"));
        assert!(compact(&code).contains(&compact(
            "get_users: splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse>"
        )));
        assert!(code.contains("pub fn inject(api: &splitapi::Api) -> Result<Self, splitapi::ConfigError>"));
        assert!(code.contains("pub fn server_api() -> Result<ServerApi, splitapi::ConfigError>"));
        assert!(compact(&code).contains(&compact(
            "ServerApi::inject(&crate::empty_api::empty_split_api()?)"
        )));
        assert!(compact(&code).contains(&compact(
            "splitapi::InjectOptions { override_existing: false }"
        )));
        assert!(!code.contains("use_get_users_query"));
    }

    #[test]
    fn crate_root_base_module() {
        let api = make_users_api();
        let code = format_generated_code(&generate_client(&api, &options(HookFlags::default())))
            .unwrap();

        assert!(compact(&code).contains(&compact("ServerApi::inject(&crate::empty_split_api()?)")));
    }

    #[test]
    fn query_hooks_are_generated() {
        let api = make_users_api();
        let code = format_generated_code(&generate_client(&api, &options(all_hooks()))).unwrap();
        let code = compact(&code);

        assert!(code.contains(&compact(
            "pub async fn use_get_users_query(&self, arg: GetUsersApiArg)"
        )));
        assert!(code.contains(&compact(
            "splitapi::QueryHook::start(self.api.clone(), self.get_users.clone(), arg).await"
        )));
        assert!(code.contains(&compact("pub fn use_lazy_get_users_query(&self)")));
    }

    #[test]
    fn hooks_true_skips_lazy_queries() {
        let api = make_users_api();
        let flags = splitapi_define::HooksConfig::Enabled(true).flags();
        let code = format_generated_code(&generate_client(&api, &options(flags))).unwrap();

        assert!(code.contains("use_get_users_query"));
        assert!(!code.contains("use_lazy_get_users_query"));
    }

    #[test]
    fn mutation_hooks_are_generated() {
        let mut api = make_users_api();
        api.endpoints.push(make_endpoint(
            "deleteUsers",
            RestMethod::Delete,
            "/v1/user",
            ApiResponse::Empty { status: 204 },
        ));
        let code = format_generated_code(&generate_client(&api, &options(all_hooks()))).unwrap();

        assert!(compact(&code).contains(&compact(
            "delete_users: splitapi::MutationEndpoint<DeleteUsersApiArg, DeleteUsersApiResponse>"
        )));
        assert!(compact(&code).contains(&compact(
            "pub fn use_delete_users_mutation(&self) -> splitapi::MutationHook<DeleteUsersApiArg, DeleteUsersApiResponse>"
        )));
        assert!(!code.contains("use_delete_users_query"));
    }

    #[test]
    fn accessor_documents_method_and_path() {
        let mut api = make_users_api();
        api.endpoints[0].description = Some("List users".to_string());
        let code = format_generated_code(&generate_client(&api, &options(HookFlags::default())))
            .unwrap();

        assert!(code.contains("/// `GET /v1/user`"));
        assert!(code.contains("/// List users"));
        assert!(compact(&code).contains(&compact(
            "pub fn get_users(&self) -> &splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse>"
        )));
    }

    #[test]
    fn client_without_endpoints_still_parses() {
        let mut api = make_users_api();
        api.endpoints.clear();
        let code = format_generated_code(&generate_client(&api, &options(all_hooks()))).unwrap();

        assert!(compact(&code).contains(&compact("let build = api.inject_endpoints(")));
        assert!(!code.contains("let mut build"));
    }
}
