//! Body serialization utilities.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use konthokosh_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct NewPost { post: String }
///
/// let post = NewPost { post: "hello".to_string() };
/// let bytes = to_json(&post).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"post":"hello"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "data.pagination.page").
///
/// # Example
///
/// ```
/// use konthokosh_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Post { id: u64 }
///
/// let post: Post = from_json(br#"{"id":5}"#).expect("deserialize");
/// assert_eq!(post, Post { id: 5 });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already parsed JSON value, with path-aware error messages.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if the value does not match `T`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Pagination {
        page: u32,
        size: u32,
    }

    #[test]
    fn to_json_serialize() {
        let bytes = to_json(&Pagination { page: 2, size: 10 }).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"page":2,"size":10}"#);
    }

    #[test]
    fn from_json_reports_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Envelope {
            #[allow(dead_code)]
            pagination: Pagination,
        }

        let err = from_json::<Envelope>(br#"{"pagination":{"page":"two","size":10}}"#)
            .expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains("pagination.page"), "got: {message}");
    }

    #[test]
    fn from_value_roundtrip() {
        let value = serde_json::json!({"page": 1, "size": 20});
        let pagination: Pagination = from_value(value).expect("deserialize");
        assert_eq!(pagination, Pagination { page: 1, size: 20 });
    }

    #[test]
    fn from_value_reports_missing_field() {
        let value = serde_json::json!({"page": 1});
        let err = from_value::<Pagination>(value).expect_err("should fail");
        assert!(err.to_string().contains("size"), "got: {err}");
    }
}
