//! Authenticated async client for the KonthoKosh backend.
//!
//! The crate is layered, each layer usable on its own:
//!
//! - [`HyperClient`] - pooled hyper transport with rustls, a whole-request
//!   timeout and Tower middleware
//! - [`ApiClient`] - resolves request descriptors against a base URL, merges
//!   headers, parses bodies and turns non-2xx answers into [`Error::Http`]
//! - [`AuthenticatedClient`] - adds `Authorization: Bearer <token>` from a
//!   [`TokenProvider`]
//! - [`PostsApi`] - typed post endpoints with envelope checks
//! - [`RetryPolicy`] / [`retry_operation`] - opt-in linear-backoff retry
//!
//! Every failure is an [`Error`]; [`display_message`] turns one into the
//! sentence shown to end users.
//!
//! # Example
//!
//! ```ignore
//! use konthokosh::prelude::*;
//!
//! let config = BackendConfig::from_env()?;
//! let client = AuthenticatedClient::new(
//!     ApiClient::from_config(&config),
//!     StaticToken::new(std::env::var("KONTHOKOSH_TOKEN")?),
//! );
//! let posts = PostsApi::new(client);
//!
//! match posts.list_posts(&PostQuery::new().keyword("ai")).await {
//!     Ok(page) => println!("{} posts", page.pagination.total_count),
//!     Err(err) => eprintln!("{}", err.user_message()),
//! }
//! ```

mod api_client;
mod auth;
mod client;
mod config;
mod connector;
mod envelope;
pub mod middleware;
mod posts;
pub mod prelude;
mod retry;

pub use api_client::ApiClient;
pub use auth::{AuthenticatedClient, TOKEN_UNAVAILABLE};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    BACKEND_URL_ENV, BackendConfig, ClientConfig, ClientConfigBuilder, ConfigError,
    TIMEOUT_MS_ENV,
};
pub use envelope::{Envelope, Page, PageData, Pagination};
pub use posts::{
    CreatePostRequest, FeedPost, INVALID_POST_CONTENT, POSTS_PATH, Post, PostQuery, PostsApi,
};
pub use retry::{RetryPolicy, retry_operation};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use konthokosh_core::{
    ApiRequest, ApiResponse, Error, HttpClient, Method, Payload, QueryValue, Request,
    RequestBuilder, RequestOptions, Response, Result, StaticToken, StatusCode, TokenError,
    TokenFn, TokenProvider, display_message, from_json, to_json,
};

pub use url;
