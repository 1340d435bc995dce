//! Parsed response bodies.

use bytes::Bytes;
use serde_json::Value;

use crate::{Error, Result};

/// MIME type that selects JSON parsing of a response body.
pub const APPLICATION_JSON: &str = "application/json";

/// Returns `true` if a `Content-Type` value denotes a JSON body.
///
/// Parameters such as `charset` are ignored, and the match is on the
/// substring so `application/json; charset=utf-8` qualifies.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains(APPLICATION_JSON)
}

/// A response body parsed according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body of a response whose content type is JSON.
    Json(Value),
    /// Any other body, decoded as UTF-8 text.
    Text(String),
}

impl Payload {
    /// Parse a raw body.
    ///
    /// # Errors
    ///
    /// A JSON content type with a malformed body yields an
    /// [`Error::ContractViolation`] carrying `status` and the raw text.
    pub fn parse(status: u16, content_type: Option<&str>, body: &Bytes) -> Result<Self> {
        let text = String::from_utf8_lossy(body);

        // An empty body is never malformed, whatever the header claims.
        if body.is_empty() || !content_type.is_some_and(is_json_content_type) {
            return Ok(Self::Text(text.into_owned()));
        }

        serde_json::from_slice(body).map(Self::Json).map_err(|err| {
            Error::contract_violation_with_payload(
                status,
                format!("malformed JSON body: {err}"),
                Self::Text(text.into_owned()),
            )
        })
    }

    /// The JSON value, if this is a JSON payload.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The text, if this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Returns `true` for an empty text body (e.g. `204 No Content`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Decode into a typed value.
    ///
    /// Text payloads are decoded as a JSON string, so `String` targets accept
    /// both kinds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonDeserialization`] with the failing path.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        match self {
            Self::Json(value) => crate::from_value(value.clone()),
            Self::Text(text) => crate::from_value(Value::String(text.clone())),
        }
    }
}
