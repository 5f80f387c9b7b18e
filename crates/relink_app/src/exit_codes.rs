//! Process exit codes. Scripts rely on these; keep them stable.

use relink_engine::ReconcileError;

/// Run completed.
pub const EXIT_SUCCESS: u8 = 0;

/// Setup failed before any remote call (logger, runtime, HTTP client).
pub const EXIT_SETUP: u8 = 1;

// 2 is clap's usage-error code.

/// A page fetch failed (network, timeout, non-2xx status).
pub const EXIT_TRANSPORT: u8 = 3;

/// A page body did not have the expected shape.
pub const EXIT_RESPONSE_SHAPE: u8 = 4;

/// A redirect could not be created; later redirects were not attempted.
pub const EXIT_PUBLISH: u8 = 5;

/// The audit CSV could not be written.
pub const EXIT_REPORT: u8 = 6;

pub fn for_error(err: &ReconcileError) -> u8 {
    match err {
        ReconcileError::Transport(_) => EXIT_TRANSPORT,
        ReconcileError::ResponseShape(_) => EXIT_RESPONSE_SHAPE,
        ReconcileError::Publish(_) => EXIT_PUBLISH,
        ReconcileError::Report(_) => EXIT_REPORT,
    }
}
