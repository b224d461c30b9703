//! TinyYummy HTTP client
//!
//! Every backend call goes through [`client::ApiClient`], which attaches the
//! stored access token and refreshes it when it has expired. The per-resource
//! wrappers in [`services`] only fix paths, verbs and parameter shapes.

pub mod client;
pub mod services;
pub mod types;

pub use client::error::ClientError;
pub use client::{
    ApiClient, ApiClientBuilder, AuthEvent, ClientConfig, Navigator, SessionAuthenticator,
    SessionSupervisor,
};
