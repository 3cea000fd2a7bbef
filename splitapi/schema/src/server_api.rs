// This code was automatically generated by splitapi-gen. Do not edit manually.

//! Generated client for BlockPy Server API (version 1.0.0).
//!
//! Users, courses and assignments for the BlockPy server.
//!
//! ## Endpoints
//!
//! **GET**:
//! - `getUsers` - `/v1/user` - List users
//!
//! ## Hooks
//!
//! - `use_get_users_query(arg)`
//!
//! ## Example
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = server_api()?;
//!     let response = client.api().query(client.get_users(), &()).await?;
//!     println!("{:?}", response);
//!     Ok(())
//! }
//! ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Error {
    /// Errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Map<String, serde_json::Value>>,
    /// Error message
    pub message: String,
}
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserSchema {
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub active: splitapi::Nullable<bool>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub confirmed_at: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub date_created: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub date_modified: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub email: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub first_name: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub last_name: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub password: splitapi::Nullable<String>,
    #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
    pub proof: splitapi::Nullable<String>,
}
/// Argument of `getUsers` (GET /v1/user).
pub type GetUsersApiArg = ();
/// Response of `getUsers` (status 200).
pub type GetUsersApiResponse = Vec<UserSchema>;
/// Typed client for BlockPy Server API.
#[derive(Debug, Clone)]
pub struct ServerApi {
    api: splitapi::Api,
    get_users: splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse>,
}
impl ServerApi {
    /// Registers the 1 endpoint(s) on `api` and returns the extended client.
    ///
    /// `api` itself is left unchanged.
    ///
    /// ## Errors
    ///
    /// Returns `ConfigError::DuplicateEndpoint` if `api` already has an
    /// endpoint with one of these names.
    pub fn inject(api: &splitapi::Api) -> Result<Self, splitapi::ConfigError> {
        let mut build = api
            .inject_endpoints(splitapi::InjectOptions {
                override_existing: false,
            });
        let get_users = build
            .query::<
                GetUsersApiArg,
                GetUsersApiResponse,
                _,
            >(
                "getUsers",
                |_arg: &GetUsersApiArg| Ok(splitapi::RequestDescriptor::new("/v1/user")),
            )?;
        Ok(Self {
            api: build.finish(),
            get_users,
        })
    }
    /// The base API extended with this client's endpoints.
    pub fn api(&self) -> &splitapi::Api {
        &self.api
    }
    /// `GET /v1/user`
    ///
    /// List users
    pub fn get_users(
        &self,
    ) -> &splitapi::QueryEndpoint<GetUsersApiArg, GetUsersApiResponse> {
        &self.get_users
    }
    /// Fetches `getUsers` with `arg` and tracks the request state.
    pub async fn use_get_users_query(
        &self,
        arg: GetUsersApiArg,
    ) -> splitapi::QueryHook<GetUsersApiArg, GetUsersApiResponse> {
        splitapi::QueryHook::start(self.api.clone(), self.get_users.clone(), arg).await
    }
}
/// Creates a [`ServerApi`] on top of the base API from `crate::empty_api::empty_split_api`.
///
/// ## Errors
///
/// Fails if the base API cannot be built or already has one of the endpoints.
pub fn server_api() -> Result<ServerApi, splitapi::ConfigError> {
    ServerApi::inject(&crate::empty_api::empty_split_api()?)
}
