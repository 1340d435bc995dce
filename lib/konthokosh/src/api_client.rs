//! Backend request executor.
//!
//! [`ApiClient`] turns an [`ApiRequest`] into a transport [`Request`] against
//! a base URL, sends it through any [`HttpClient`] and parses the answer into
//! an [`ApiResponse<Payload>`]. Non-2xx responses become [`Error::Http`]. It
//! never retries and never authenticates; see
//! [`AuthenticatedClient`](crate::AuthenticatedClient) for the latter.

use bytes::Bytes;
use konthokosh_core::{APPLICATION_JSON, ApiRequest, ApiResponse, Payload};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{BackendConfig, Error, HttpClient, HyperClient, Request, Response, Result};

/// Executes backend requests against a base URL.
///
/// Header precedence, lowest first: `Content-Type: application/json`, the
/// client's default headers, then the request's own overrides. Names compare
/// case-insensitively.
///
/// # Example
///
/// ```ignore
/// use konthokosh::{ApiClient, ApiRequest, HyperClient};
///
/// let api = ApiClient::new(HyperClient::new(), "https://backend.example.com")?;
/// let response = api.request(&ApiRequest::get("/api/v1/posts")).await?;
/// assert!(response.ok());
/// ```
#[derive(Debug)]
pub struct ApiClient<C> {
    client: C,
    base_url: Url,
    default_headers: Vec<(String, String)>,
}

impl<C: Clone> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            default_headers: self.default_headers.clone(),
        }
    }
}

impl ApiClient<HyperClient> {
    /// Build a pooled transport with logging from `config`.
    #[must_use]
    pub fn from_config(config: &BackendConfig) -> Self {
        let http = HyperClient::builder()
            .config(&config.client)
            .with_logging()
            .build();

        Self::with_url(http, config.base_url.clone())
            .default_headers(config.default_headers.iter().cloned())
    }
}

impl<C> ApiClient<C> {
    /// Create an executor for `base_url`, without default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self::with_url(
            client,
            Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?,
        ))
    }

    /// Create an executor with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            default_headers: Vec::new(),
        }
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Add several default headers.
    #[must_use]
    pub fn default_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.default_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The base URL request paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers applied to every request.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// The underlying transport.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Build the transport request for `request`.
    ///
    /// The path is resolved with standard relative-reference rules, then the
    /// query parameters are appended in order. Duplicate names are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the path cannot be joined.
    pub fn build_request(&self, request: &ApiRequest) -> Result<Request<Bytes>> {
        let url = self.base_url.join(request.path())?;
        let options = request.request_options();

        let mut builder = Request::builder(request.method(), url)
            .header("Content-Type", APPLICATION_JSON)
            .headers(self.default_headers.iter().cloned())
            .headers(options.header_overrides().iter().cloned())
            .query_pairs(
                options
                    .query_params()
                    .iter()
                    .map(|(name, value)| (name, value.to_string())),
            );

        if let Some(body) = request.body_bytes() {
            builder = builder.body(body.clone());
        }

        Ok(builder.build())
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Send an already built request and parse the response.
    ///
    /// # Errors
    ///
    /// - transport failures and timeouts as reported by the transport
    /// - [`Error::Http`] for non-2xx responses, with the parsed body attached
    /// - [`Error::ContractViolation`] for a malformed JSON body on a 2xx
    pub async fn send(&self, request: Request<Bytes>) -> Result<ApiResponse<Payload>> {
        debug!(method = %request.method(), url = %request.url(), "dispatching request");

        let response = self.client.execute(request).await?;

        if response.is_success() {
            response.into_payload()
        } else {
            Err(http_failure(&response))
        }
    }

    /// Execute a request descriptor without authentication.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse<Payload>> {
        let request = self.build_request(request)?;
        self.send(request).await
    }

    /// Execute a request descriptor and decode the body into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]; decoding failures are
    /// [`Error::JsonDeserialization`].
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponse<T>> {
        self.request(request).await?.decode()
    }
}

/// `Error::Http` for a non-2xx response.
///
/// The body is kept for diagnostics; a malformed one is kept as text.
fn http_failure(response: &Response<Bytes>) -> Error {
    let status = response.status();
    let reason = http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default();
    let message = format!("API request failed: {status} {reason}")
        .trim_end()
        .to_string();

    let payload = Payload::parse(status, response.header("content-type"), response.body())
        .unwrap_or_else(|_| Payload::Text(String::from_utf8_lossy(response.body()).into_owned()));

    debug!(status, "backend answered with an error status");
    Error::http_with_payload(status, message, payload)
}
