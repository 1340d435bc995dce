//! Error types for the KonthoKosh client.
//!
//! Every failure the client can produce is an [`Error`]. Each variant maps to
//! an HTTP-style status through [`Error::status`] so callers (and the
//! [`display_message`](crate::display_message) classifier) only ever deal with
//! one error shape:
//!
//! | Kind | Variants | Status |
//! |------|----------|--------|
//! | Network | [`Error::Connection`], [`Error::Tls`] | `0` |
//! | Timeout | [`Error::Timeout`] | `408` |
//! | Authentication | [`Error::Authentication`] | `401` |
//! | HTTP | [`Error::Http`] | response status |
//! | Contract violation | [`Error::ContractViolation`] | envelope or response status |
//! | Local | [`Error::InvalidRequest`], [`Error::InvalidUrl`], JSON errors | `0` |

use derive_more::{Display, Error, From};

use crate::Payload;

/// Status reported for failures that never produced a response.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Status reported when a request is aborted by the client timeout.
pub const TIMEOUT_STATUS: u16 = 408;

/// Status reported when the token provider fails.
pub const AUTHENTICATION_STATUS: u16 = 401;

/// Main error type for KonthoKosh operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Response received with a non-2xx status.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Parsed response body, kept for diagnostics.
        #[error(not(source))]
        payload: Option<Payload>,
    },

    /// Transport failure before any response was received.
    #[display("network error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request aborted after the configured timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The token provider failed to issue a token.
    #[display("authentication error: {_0}")]
    #[from(skip)]
    Authentication(#[error(not(source))] String),

    /// Transport succeeded but the body does not honor the backend contract.
    #[display("contract violation ({status}): {message}")]
    #[from(skip)]
    ContractViolation {
        /// Status reported by the envelope, or the transport status.
        status: u16,
        /// Error message.
        message: String,
        /// Parsed response body, if any.
        #[error(not(source))]
        payload: Option<Payload>,
    },

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "data.pagination.page").
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            payload: None,
        }
    }

    /// Create an HTTP error carrying the parsed response body.
    #[must_use]
    pub fn http_with_payload(status: u16, message: impl Into<String>, payload: Payload) -> Self {
        Self::Http {
            status,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a contract violation.
    #[must_use]
    pub fn contract_violation(status: u16, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            status,
            message: message.into(),
            payload: None,
        }
    }

    /// Create a contract violation carrying the offending body.
    #[must_use]
    pub fn contract_violation_with_payload(
        status: u16,
        message: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self::ContractViolation {
            status,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// HTTP-style status of this error.
    ///
    /// `0` for failures without a response, `408` for timeouts and `401` when
    /// no token could be obtained.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } | Self::ContractViolation { status, .. } => *status,
            Self::Timeout => TIMEOUT_STATUS,
            Self::Authentication(_) => AUTHENTICATION_STATUS,
            Self::Connection(_)
            | Self::Tls(_)
            | Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::JsonDeserialization { .. }
            | Self::InvalidUrl(_) => NETWORK_ERROR_STATUS,
        }
    }

    /// The message without the kind prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } | Self::ContractViolation { message, .. } => {
                message.clone()
            }
            Self::Connection(message)
            | Self::Tls(message)
            | Self::Authentication(message)
            | Self::InvalidRequest(message) => message.clone(),
            Self::Timeout => "Request timeout".to_string(),
            Self::JsonSerialization(err) => err.to_string(),
            Self::JsonDeserialization { path, message } => format!("{path}: {message}"),
            Self::InvalidUrl(err) => err.to_string(),
        }
    }

    /// Replace the message, keeping the kind, status and payload.
    ///
    /// Variants without a free-form message are returned unchanged.
    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Http {
                status, payload, ..
            } => Self::Http {
                status,
                message: message.into(),
                payload,
            },
            Self::ContractViolation {
                status, payload, ..
            } => Self::ContractViolation {
                status,
                message: message.into(),
                payload,
            },
            Self::Authentication(_) => Self::Authentication(message.into()),
            Self::Connection(_) => Self::Connection(message.into()),
            other => other,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if the request never got a response from the network.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_))
    }

    /// Returns `true` if the token provider failed.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns `true` if the response broke the backend envelope contract.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        let status = self.status();
        status >= 400 && status < 500
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        let status = self.status();
        status >= 500 && status < 600
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// The parsed response body, when the failure carried one.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Http { payload, .. } | Self::ContractViolation { payload, .. } => {
                payload.as_ref()
            }
            _ => None,
        }
    }

    /// Try to decode the diagnostic payload into a typed value.
    ///
    /// Returns `None` when there is no payload.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct Rejection {
    ///     message: String,
    /// }
    ///
    /// if let Some(Ok(rejection)) = err.decode_payload::<Rejection>() {
    ///     tracing::warn!(reason = %rejection.message, "backend rejected request");
    /// }
    /// ```
    pub fn decode_payload<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.payload().map(Payload::decode)
    }

    /// User-facing message for this error, see [`display_message`](crate::display_message).
    #[must_use]
    pub fn user_message(&self) -> String {
        crate::display_message(self.status(), &self.message())
    }
}
