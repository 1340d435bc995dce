//! Bearer token sources.
//!
//! The identity provider is an external collaborator: the client only needs
//! "give me the current token, if any". [`TokenProvider`] is that seam, and is
//! passed explicitly to the authenticated client so the same code runs in UI
//! sessions, batch jobs and tests.

use std::future::Future;
use std::sync::Arc;

use derive_more::{Display, Error};

/// Failure reported by a [`TokenProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct TokenError {
    #[error(not(source))]
    message: String,
}

impl TokenError {
    /// Create a token error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The provider's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Source of short-lived bearer tokens.
pub trait TokenProvider: Send + Sync {
    /// Fetch the current token.
    ///
    /// `Ok(None)` means nobody is signed in; the request then goes out
    /// without credentials and the server decides.
    fn token(&self) -> impl Future<Output = Result<Option<String>, TokenError>> + Send;

    /// Returns `true` when a non-empty token is currently available.
    fn is_signed_in(&self) -> impl Future<Output = bool> + Send {
        async move { matches!(self.token().await, Ok(Some(token)) if !token.is_empty()) }
    }
}

impl<P: TokenProvider> TokenProvider for Arc<P> {
    fn token(&self) -> impl Future<Output = Result<Option<String>, TokenError>> + Send {
        (**self).token()
    }
}

/// A fixed token, or none.
///
/// Useful for server-side callers that already hold a token, and for
/// anonymous access with `StaticToken::none()`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StaticToken(Option<Arc<str>>);

impl StaticToken {
    /// Always return `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(Arc::from(token.into())))
    }

    /// Never return a token.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>, TokenError> {
        Ok(self.0.as_deref().map(str::to_string))
    }
}

/// Adapter turning an async closure into a [`TokenProvider`].
///
/// # Example
///
/// ```ignore
/// use konthokosh_core::{TokenFn, TokenProvider};
///
/// let session = session.clone();
/// let provider = TokenFn::new(move || {
///     let session = session.clone();
///     async move { session.fresh_jwt().await.map_err(|e| TokenError::new(e.to_string())) }
/// });
/// ```
#[derive(Clone)]
pub struct TokenFn<F> {
    fetch: F,
}

impl<F> TokenFn<F> {
    /// Wrap `fetch`.
    pub const fn new<Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Option<String>, TokenError>>,
    {
        Self { fetch }
    }
}

impl<F> std::fmt::Debug for TokenFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenFn").finish_non_exhaustive()
    }
}

impl<F, Fut> TokenProvider for TokenFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<String>, TokenError>> + Send,
{
    fn token(&self) -> impl Future<Output = Result<Option<String>, TokenError>> + Send {
        (self.fetch)()
    }
}
