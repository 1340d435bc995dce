//! Bearer-token authentication on top of the executor.

use bytes::Bytes;
use konthokosh_core::{ApiRequest, ApiResponse, Method, Payload, RequestOptions, TokenProvider};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::{ApiClient, Error, HttpClient, Request, Result};

/// Message of the error raised when the token provider fails.
pub const TOKEN_UNAVAILABLE: &str = "Authentication token unavailable";

const AUTHORIZATION: &str = "Authorization";

/// Executor that attaches a bearer token from a [`TokenProvider`].
///
/// This client owns the `Authorization` header. Whatever the default headers
/// or per-call overrides put there is removed; a request then carries
/// exactly one `Authorization: Bearer <token>` when the provider has a token
/// and the request was not marked with
/// [`RequestOptions::skip_auth`], and none otherwise.
///
/// # Example
///
/// ```ignore
/// use konthokosh::{ApiClient, AuthenticatedClient, BackendConfig, StaticToken};
///
/// let config = BackendConfig::from_env()?;
/// let client = AuthenticatedClient::new(
///     ApiClient::from_config(&config),
///     StaticToken::new("session-token"),
/// );
/// let response = client.get("/api/v1/posts", RequestOptions::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedClient<C, P> {
    api: ApiClient<C>,
    tokens: P,
}

impl<C, P> AuthenticatedClient<C, P> {
    /// Wrap `api`, taking tokens from `tokens`.
    #[must_use]
    pub const fn new(api: ApiClient<C>, tokens: P) -> Self {
        Self { api, tokens }
    }

    /// The unauthenticated executor.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    /// The token provider.
    #[must_use]
    pub const fn token_provider(&self) -> &P {
        &self.tokens
    }
}

impl<C, P> AuthenticatedClient<C, P>
where
    C: HttpClient,
    P: TokenProvider,
{
    /// Whether the provider currently has a session.
    pub async fn is_signed_in(&self) -> bool {
        self.tokens.is_signed_in().await
    }

    /// Execute `request`, authenticated unless it opts out.
    ///
    /// # Errors
    ///
    /// - [`Error::Authentication`] (401) when the token provider fails; no
    ///   request is sent
    /// - any executor error, see [`ApiClient::send`]
    pub async fn request(&self, request: &ApiRequest) -> Result<ApiResponse<Payload>> {
        let mut outgoing = self.api.build_request(request)?;
        self.authorize(&mut outgoing, request.is_skip_auth()).await?;
        self.api.send(outgoing).await
    }

    /// Execute `request` and decode the body into `T`.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::request`]; decoding failures are
    /// [`Error::JsonDeserialization`].
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponse<T>> {
        self.request(request).await?.decode()
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::request`].
    pub async fn get(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        self.request(&ApiRequest::get(path).options(options)).await
    }

    /// `GET path`, decoded.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::request_as`].
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request_as(&ApiRequest::get(path).options(options)).await
    }

    /// `POST path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// Serialization failures, then see [`AuthenticatedClient::request`].
    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        self.write(Method::Post, path, body, options).await
    }

    /// `POST path` with `body` as JSON, decoded.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::post`].
    pub async fn post_as<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.post(path, body, options).await?.decode()
    }

    /// `PUT path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::post`].
    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        self.write(Method::Put, path, body, options).await
    }

    /// `PUT path` with `body` as JSON, decoded.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::post`].
    pub async fn put_as<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.put(path, body, options).await?.decode()
    }

    /// `PATCH path` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::post`].
    pub async fn patch<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        self.write(Method::Patch, path, body, options).await
    }

    /// `PATCH path` with `body` as JSON, decoded.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::post`].
    pub async fn patch_as<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.patch(path, body, options).await?.decode()
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::request`].
    pub async fn delete(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        self.request(&ApiRequest::delete(path).options(options)).await
    }

    /// `DELETE path`, decoded.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatedClient::request_as`].
    pub async fn delete_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        self.request_as(&ApiRequest::delete(path).options(options)).await
    }

    async fn write<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse<Payload>> {
        let request = ApiRequest::with_json(method, path, body)?.options(options);
        self.request(&request).await
    }

    async fn authorize(&self, request: &mut Request<Bytes>, skip_auth: bool) -> Result<()> {
        request.remove_header(AUTHORIZATION);
        if skip_auth {
            return Ok(());
        }

        match self.tokens.token().await {
            Ok(Some(token)) if !token.is_empty() => {
                request.set_header(AUTHORIZATION, format!("Bearer {token}"));
            }
            Ok(_) => {
                warn!(url = %request.url(), "no authentication token available, sending request without Authorization");
            }
            Err(err) => {
                error!(error = %err, "failed to obtain authentication token");
                return Err(Error::authentication(TOKEN_UNAVAILABLE));
            }
        }
        Ok(())
    }
}
