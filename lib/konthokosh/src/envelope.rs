//! The backend's response envelope and pagination types.

use konthokosh_core::Payload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The JSON wrapper the backend puts around every answer.
///
/// `status_code` is the backend's logical status. It can disagree with the
/// transport status (an HTTP 200 carrying a failed operation), so callers
/// check both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Logical status; `0` when the backend left it out.
    #[serde(default)]
    pub status_code: u16,
    /// Logical success flag.
    pub success: bool,
    /// Human readable outcome.
    #[serde(default)]
    pub message: Option<String>,
    /// The payload; `null` or missing on failure and for some empty results.
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode an envelope from a response payload.
    ///
    /// # Errors
    ///
    /// A body that is not an envelope of `T` is an
    /// [`Error::ContractViolation`] with the transport `status` and the body.
    pub fn from_payload(status: u16, payload: &Payload) -> Result<Self> {
        payload.decode().map_err(|err| {
            Error::contract_violation_with_payload(
                status,
                format!("Unexpected response shape: {}", err.message()),
                payload.clone(),
            )
        })
    }
}

impl<T> Envelope<T> {
    /// The logical status, or `transport_status` when the envelope has none.
    #[must_use]
    pub const fn effective_status(&self, transport_status: u16) -> u16 {
        if self.status_code == 0 {
            transport_status
        } else {
            self.status_code
        }
    }

    /// Contract violation describing this envelope.
    ///
    /// Uses the envelope message, or `fallback` when it is missing or blank.
    #[must_use]
    pub fn violation(&self, transport_status: u16, fallback: &str, payload: Payload) -> Error {
        let message = self
            .message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback);
        Error::contract_violation_with_payload(
            self.effective_status(transport_status),
            message,
            payload,
        )
    }
}

/// Pagination metadata of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, starting at 1.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Items across all pages.
    pub total_count: u64,
    /// Number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Whether a page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Data section of a paginated envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData<T> {
    /// Items of this page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items of this page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

impl<T> From<PageData<T>> for Page<T> {
    fn from(page: PageData<T>) -> Self {
        Self {
            items: page.data,
            pagination: page.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_paginated_envelope() {
        let payload = Payload::Json(json!({
            "statusCode": 200,
            "success": true,
            "message": "ok",
            "data": {
                "data": [1, 2],
                "pagination": {"page": 2, "size": 2, "totalCount": 5, "totalPages": 3}
            }
        }));

        let envelope = Envelope::<PageData<u8>>::from_payload(200, &payload).expect("envelope");
        let page = Page::from(envelope.data.expect("data"));

        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.pagination.total_count, 5);
        assert!(page.pagination.has_next());
    }

    #[test]
    fn missing_optional_fields_default() {
        let payload = Payload::Json(json!({"success": false, "data": null}));
        let envelope = Envelope::<u8>::from_payload(200, &payload).expect("envelope");

        assert_eq!(envelope.status_code, 0);
        assert_eq!(envelope.effective_status(200), 200);
        assert!(envelope.message.is_none());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn data_can_be_left_out() {
        let payload = Payload::Json(json!({"statusCode": 404, "success": false}));
        let envelope =
            Envelope::<PageData<u8>>::from_payload(200, &payload).expect("envelope");

        assert_eq!(envelope.status_code, 404);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn wrong_shape_is_contract_violation() {
        let payload = Payload::Text("<html>".to_string());
        let err = Envelope::<u8>::from_payload(200, &payload).expect_err("not an envelope");

        assert!(err.is_contract_violation());
        assert_eq!(err.status(), 200);
        assert_eq!(err.payload(), Some(&payload));
    }

    #[test]
    fn violation_prefers_envelope_message() {
        let envelope = Envelope::<u8> {
            status_code: 422,
            success: false,
            message: Some("Post too long".to_string()),
            data: None,
        };
        let err = envelope.violation(200, "Failed", Payload::Text(String::new()));
        assert_eq!(err.status(), 422);
        assert_eq!(err.message(), "Post too long");

        let blank = Envelope::<u8> {
            message: Some("  ".to_string()),
            ..envelope
        };
        assert_eq!(
            blank.violation(200, "Failed", Payload::Text(String::new())).message(),
            "Failed"
        );
    }
}
