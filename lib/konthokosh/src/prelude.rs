//! Prelude module for convenient imports.
//!
//! ```ignore
//! use konthokosh::prelude::*;
//! ```

pub use crate::{
    ApiClient, ApiRequest, ApiResponse, AuthenticatedClient, BackendConfig, ClientConfig, Error,
    FeedPost, HttpClient, HyperClient, Method, Page, Pagination, Payload, Post, PostQuery,
    PostsApi, RequestOptions, Result, RetryPolicy, StaticToken, StatusCode, TokenError, TokenFn,
    TokenProvider, display_message, retry_operation,
};
pub use serde::{Deserialize, Serialize};
