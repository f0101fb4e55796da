//! Error handling and exit codes.

use liveterm_core::constants::exit_codes;
use liveterm_core::error::LiveError;

/// Map a library error to the process exit code.
pub fn exit_code(err: &LiveError) -> i32 {
    match err {
        LiveError::Io(_) => exit_codes::ERROR_IO,
        LiveError::Config(_) => exit_codes::ERROR_CONFIG,
        LiveError::AlreadyStopped => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for an application error, looking through the context chain
/// for a [`LiveError`].
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<LiveError>())
        .map_or(exit_codes::ERROR_GENERIC, exit_code)
}
