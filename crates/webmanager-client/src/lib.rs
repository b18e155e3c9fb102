//! Web Manager API client.
//!
//! Provides the pieces the viewer needs to talk to the Web Manager API:
//! - **client**: authenticated requests for proposals and blocks
//! - **auth**: login, logout and the route guard for protected commands
//! - **token**: bearer token persistence under the state directory
//! - **fetch**: the block `FetchService` used by the selection controller
//! - **config**: API URL, timeout and state directory resolution

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod token;

pub use auth::{authenticated_client, login, logout};
pub use client::WebManagerClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use fetch::BlockFetcher;
pub use token::{StoredToken, TokenStore};
