//! Error types for restwire.
//!
//! Protocol-level failures (bad request, no route, handler failure) are not
//! Rust errors: the dispatcher renders them as response payloads so the
//! transport collaborator never special-cases them. The types here cover the
//! remaining channels:
//!
//! - [`SendError`] - a programming error in handler code (double delivery)
//! - [`BoxError`] - the opaque failure type handlers return

use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Handlers return this from their failure path; the dispatcher copies its
/// `Display` text into the `detail` of the 500 response.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from delivering a response.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// `send()` was called on a response that has already been delivered.
    ///
    /// The first delivery took an owned snapshot of the payload, so the
    /// delivered data is intact; the second call is a bug in handler code
    /// and is surfaced rather than silently ignored.
    #[error("response has already been sent")]
    AlreadySent,
}
