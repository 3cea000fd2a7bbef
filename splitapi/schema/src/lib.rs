//! Typed client for the BlockPy server.
//!
//! [`server_api`] is generated by `splitapi-gen` from `openapi/openapi.json`
//! and injects its endpoints into the base client defined in [`empty_api`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use splitapi_schema::server_api;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = server_api::server_api()?;
//! let users = client.api().query(client.get_users(), &()).await?;
//! for user in users {
//!     println!("{:?} {:?}", user.id, user.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod empty_api;
pub mod server_api;

pub use server_api::{Error, ServerApi, UserSchema};
