//! Error type shared by all live printers.

use std::io;

/// Error type for live printer lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    /// Writing to the terminal or spawning a redraw task failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stopped printer was asked to start again.
    #[error("printer was already stopped and cannot be restarted")]
    AlreadyStopped,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let err: LiveError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, LiveError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            LiveError::AlreadyStopped.to_string(),
            "printer was already stopped and cannot be restarted"
        );
        assert_eq!(
            LiveError::Config("bad delay".into()).to_string(),
            "configuration error: bad delay"
        );
    }
}
