//! HTTP method types.

use derive_more::Display;

/// HTTP request method used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Fetch a resource.
    #[display("GET")]
    Get,
    /// Create a resource.
    #[display("POST")]
    Post,
    /// Replace a resource.
    #[display("PUT")]
    Put,
    /// Partially update a resource.
    #[display("PATCH")]
    Patch,
    /// Remove a resource.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Returns `true` for the verbs that carry a JSON body.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if the method is idempotent.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Delete)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn write_verbs() {
        assert!(Method::Post.is_write());
        assert!(Method::Put.is_write());
        assert!(Method::Patch.is_write());
        assert!(!Method::Get.is_write());
        assert!(!Method::Delete.is_write());
    }

    #[test]
    fn method_is_idempotent() {
        assert!(Method::Get.is_idempotent());
        assert!(Method::Put.is_idempotent());
        assert!(Method::Delete.is_idempotent());
        assert!(!Method::Post.is_idempotent());
        assert!(!Method::Patch.is_idempotent());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Patch), http::Method::PATCH);
        assert_eq!(http::Method::from(Method::Delete), http::Method::DELETE);
    }
}
