//! User-facing error messages.

/// Shown for status 400.
pub const INVALID_INPUT: &str = "Invalid request. Please check your input.";
/// Shown for status 401.
pub const REAUTHENTICATE: &str = "Authentication failed. Please log in again.";
/// Shown for status 403.
pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
/// Shown for status 404.
pub const NOT_FOUND: &str = "The requested resource was not found.";
/// Shown for status 429.
pub const RATE_LIMITED: &str = "Too many requests. Please try again later.";
/// Shown for status 500.
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
/// Fallback when the error carries no message.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Map a status and message to the string shown to end users.
///
/// Known statuses get a fixed sentence; anything else falls back to
/// `message`, or [`UNEXPECTED_ERROR`] when it is blank.
///
/// # Example
///
/// ```
/// use konthokosh_core::display_message;
///
/// assert_eq!(display_message(404, "API request failed"), "The requested resource was not found.");
/// assert_eq!(display_message(0, "Network error: refused"), "Network error: refused");
/// assert_eq!(display_message(418, ""), "An unexpected error occurred.");
/// ```
#[must_use]
pub fn display_message(status: u16, message: &str) -> String {
    let fixed = match status {
        400 => INVALID_INPUT,
        401 => REAUTHENTICATE,
        403 => FORBIDDEN,
        404 => NOT_FOUND,
        429 => RATE_LIMITED,
        500 => SERVER_ERROR,
        _ if message.trim().is_empty() => UNEXPECTED_ERROR,
        _ => return message.to_string(),
    };
    fixed.to_string()
}
