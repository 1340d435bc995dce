//! Core types and traits for the KonthoKosh API client.
//!
//! This crate provides the foundational types used by `konthokosh`:
//! - [`Method`] - HTTP method enum
//! - [`ApiRequest`] and [`RequestOptions`] - backend call descriptors
//! - [`Request`] and [`RequestBuilder`] - transport-level requests
//! - [`Response`], [`ApiResponse`] and [`Payload`] - raw and parsed responses
//! - [`Error`] and [`Result`] - the error taxonomy
//! - [`HttpClient`] - transport trait
//! - [`TokenProvider`] - bearer token source
//! - [`display_message`] - user-facing error strings
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod classify;
mod client;
mod descriptor;
mod error;
mod method;
mod payload;
pub mod prelude;
mod query;
mod request;
mod response;
mod token;

pub use body::{from_json, from_value, to_json};
pub use classify::{
    FORBIDDEN, INVALID_INPUT, NOT_FOUND, RATE_LIMITED, REAUTHENTICATE, SERVER_ERROR,
    UNEXPECTED_ERROR, display_message,
};
pub use client::HttpClient;
pub use descriptor::{ApiRequest, RequestOptions};
pub use error::{AUTHENTICATION_STATUS, Error, NETWORK_ERROR_STATUS, Result, TIMEOUT_STATUS};
pub use method::Method;
pub use payload::{APPLICATION_JSON, Payload, is_json_content_type};
pub use query::QueryValue;
pub use request::{Request, RequestBuilder, remove_header, set_header};
pub use response::{ApiResponse, Response};
pub use token::{StaticToken, TokenError, TokenFn, TokenProvider};

// Re-export http crate types for status codes
pub use http::StatusCode;
