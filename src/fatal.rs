//! Reporting of unrecoverable conditions.

use std::fmt::Display;

use tracing::error;

/// Logs `message` and aborts the process.
///
/// Only for broken internal invariants, never for conditions a caller could
/// handle; those are returned as [`crate::TreeError`].
#[cold]
pub fn fatal(message: impl Display) -> ! {
    error!("Fatal: {message}");
    std::process::abort()
}
