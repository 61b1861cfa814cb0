//! Unified error interface.
//!
//! Every error type in the workspace implements [`ErrorCode`] so the
//! application layer, logging, and the CLI can handle failures uniformly:
//! a stable machine-readable code plus a recoverability flag.
//!
//! # Code Format
//!
//! - **UPPER_SNAKE_CASE**: e.g. `"ENGINE_TIMEOUT"`, `"SETTINGS_WRITE_FAILED"`
//! - **Domain-prefixed**: `"ENGINE_"`, `"SETTINGS_"`, `"APP_"`
//! - **Stable**: codes are an API contract and do not change once defined
//!
//! # Example
//!
//! ```
//! use vlf_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum InvokeError {
//!     BinaryMissing(String),
//!     Timeout,
//! }
//!
//! impl ErrorCode for InvokeError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::BinaryMissing(_) => "ENGINE_LAUNCH_FAILURE",
//!             Self::Timeout => "ENGINE_TIMEOUT",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Timeout)
//!     }
//! }
//!
//! assert_eq!(InvokeError::Timeout.code(), "ENGINE_TIMEOUT");
//! assert!(InvokeError::Timeout.is_recoverable());
//! ```

/// Stable error code plus recoverability, implemented by every error enum.
///
/// An error is recoverable when retrying may succeed or the user can take
/// corrective action (pick another file, fix a directory). It is not
/// recoverable when retry will produce the identical failure (malformed
/// engine payload, missing bundled binary).
pub trait ErrorCode {
    /// Returns the machine-readable code for this error.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or user action can clear this error.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error's code follows workspace conventions.
///
/// # Panics
///
/// Panics with a descriptive message if the code is empty, lacks the
/// expected prefix, or is not UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use vlf_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Oops;
///
/// impl ErrorCode for Oops {
///     fn code(&self) -> &'static str { "ENGINE_OOPS" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Oops, "ENGINE_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Asserts conventions across every variant of an error enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
