//! HTTP transport trait.
//!
//! [`HttpClient`] is the seam between request building and the network: the
//! executor prepares a fully resolved [`Request`] and the transport performs
//! it. The hyper-based client in the `konthokosh` crate is the production
//! implementation; tests can substitute a recording fake.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP transport trait.
///
/// Implementations perform exactly one exchange: no retries, no status
/// interpretation. A non-2xx status is still `Ok`.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained:
    /// - [`Error::Connection`](crate::Error::Connection) / [`Error::Tls`](crate::Error::Tls)
    /// - [`Error::Timeout`](crate::Error::Timeout)
    /// - [`Error::InvalidRequest`](crate::Error::InvalidRequest)
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        (**self).execute(request)
    }
}
