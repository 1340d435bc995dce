//! Prelude module for convenient imports.
//!
//! ```ignore
//! use konthokosh_core::prelude::*;
//! ```

pub use crate::{
    ApiRequest, ApiResponse, Error, HttpClient, Method, Payload, Request, RequestOptions,
    Response, Result, StaticToken, TokenError, TokenFn, TokenProvider, display_message, from_json,
    to_json,
};
