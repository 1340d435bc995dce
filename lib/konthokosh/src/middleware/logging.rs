//! Exchange logging middleware.
//!
//! Logs every transport exchange with `tracing`. Bearer tokens never reach the
//! logs: header dumps at debug level replace the `Authorization` value.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED: &str = "<redacted>";

/// Layer that adds exchange logging.
///
/// # Example
///
/// ```ignore
/// use konthokosh::HyperClient;
/// use konthokosh::middleware::LoggingLayer;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Request headers (redacted) plus the summary.
    Debug,
    /// Summary only.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a logging layer that logs summaries at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that also logs request headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and their outcome.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

/// Copy of `headers` safe to log.
pub(crate) fn redacted_headers<'a>(
    headers: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> BTreeMap<String, String> {
    headers
        .into_iter()
        .map(|(name, value)| {
            let value = if name.eq_ignore_ascii_case("authorization") {
                REDACTED.to_string()
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let authenticated = request.header("authorization").is_some();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            headers = ?redacted_headers(request.headers()),
                            body_bytes = request.body().map_or(0, Bytes::len),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(authenticated, "sending request");
                    }
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Ok(response) => {
                        warn!(
                            status = response.status(),
                            elapsed_ms,
                            "request failed with HTTP error"
                        );
                    }
                    Err(err) => {
                        warn!(error = %err, status = err.status(), elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use konthokosh_core::Method;
    use tower::{ServiceExt, service_fn};
    use url::Url;

    use super::*;

    #[test]
    fn logging_layer_levels() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }

    #[test]
    fn authorization_is_redacted() {
        let headers = HashMap::from([
            ("Authorization".to_string(), "Bearer secret".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]);

        let logged = redacted_headers(&headers);

        assert_eq!(logged.get("Authorization").map(String::as_str), Some(REDACTED));
        assert_eq!(
            logged.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn passes_results_through() {
        let inner = service_fn(|request: Request<Bytes>| async move {
            if request.url().path() == "/fail" {
                Err(Error::Timeout)
            } else {
                Ok(Response::new(204, HashMap::new(), Bytes::new()))
            }
        });
        let service = LoggingLayer::debug().layer(inner);

        let ok = Request::builder(Method::Get, Url::parse("http://backend/ok").expect("url"))
            .header("Authorization", "Bearer secret")
            .build();
        let response = service.clone().oneshot(ok).await.expect("response");
        assert_eq!(response.status(), 204);

        let fail = Request::builder(Method::Get, Url::parse("http://backend/fail").expect("url"))
            .build();
        let err = service.oneshot(fail).await.expect_err("timeout");
        assert!(err.is_timeout());
    }
}
