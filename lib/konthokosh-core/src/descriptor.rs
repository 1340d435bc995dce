//! Request descriptors.
//!
//! An [`ApiRequest`] describes a call relative to the backend base URL. It is
//! built once and handed to the executor, which turns it into a transport
//! [`Request`](crate::Request).

use bytes::Bytes;

use crate::{Method, QueryValue, Result};

/// Per-call options shared by every verb.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    query: Vec<(String, QueryValue)>,
    headers: Vec<(String, String)>,
    skip_auth: bool,
}

impl RequestOptions {
    /// Empty options: no query, no header overrides, authenticated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter only when `value` is `Some`.
    #[must_use]
    pub fn query_opt<V: Into<QueryValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Add a header override; overrides win over default headers.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send the request without an `Authorization` header.
    #[must_use]
    pub const fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Query parameters, in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, QueryValue)] {
        &self.query
    }

    /// Header overrides, in insertion order.
    #[must_use]
    pub fn header_overrides(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether authentication is skipped.
    #[must_use]
    pub const fn is_skip_auth(&self) -> bool {
        self.skip_auth
    }
}

/// Description of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    options: RequestOptions,
    body: Option<Bytes>,
}

impl ApiRequest {
    /// A request without body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            options: RequestOptions::default(),
            body: None,
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// A write request whose body is `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn with_json<T: serde::Serialize>(
        method: Method,
        path: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let body = crate::to_json(value)?;
        Ok(Self::new(method, path).body(body))
    }

    /// Replace the options.
    #[must_use]
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Set a raw body.
    #[must_use]
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Per-call options.
    #[must_use]
    pub const fn request_options(&self) -> &RequestOptions {
        &self.options
    }

    /// Raw body, if any.
    #[must_use]
    pub const fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Whether authentication is skipped.
    #[must_use]
    pub const fn is_skip_auth(&self) -> bool {
        self.options.skip_auth
    }
}
