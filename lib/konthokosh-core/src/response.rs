//! HTTP responses.
//!
//! [`Response`] is the raw transport result. [`ApiResponse`] is what the
//! executor hands back once the body has been parsed: status, headers, the
//! `ok` flag and a typed body.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Payload, Result};

const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Raw HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, B) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        is_success_status(self.status)
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Parse the body according to the `Content-Type` header.
    ///
    /// # Errors
    ///
    /// See [`Payload::parse`].
    pub fn into_payload(self) -> Result<ApiResponse<Payload>> {
        let payload = Payload::parse(self.status, self.header("content-type"), &self.body)?;
        Ok(ApiResponse::new(self.status, self.headers, payload))
    }
}

/// A completed backend exchange with a parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status: u16,
    headers: HashMap<String, String>,
    ok: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    /// Build an envelope; `ok` is derived from the status.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, data: T) -> Self {
        Self {
            status,
            headers,
            ok: is_success_status(status),
            data,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Status was in the 2xx range.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.ok
    }

    /// Parsed body.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Consume into the parsed body.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Transform the body, keeping status and headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            ok: self.ok,
            data: f(self.data),
        }
    }
}

impl ApiResponse<Payload> {
    /// Decode the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonDeserialization`] when the payload does not
    /// match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Result<ApiResponse<T>> {
        let data = self.data.decode()?;
        Ok(ApiResponse {
            status: self.status,
            headers: self.headers,
            ok: self.ok,
            data,
        })
    }
}
