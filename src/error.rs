use std::io;

use thiserror::Error;

/// Failure modes of [`open`](crate::open).
#[derive(Debug, Error)]
pub enum OpenError {
    /// The target could not be interpreted as a UTF-8 string.
    #[error("expected a target")]
    InvalidTarget,

    /// Spawning the opener failed, or probing for a bundled opener
    /// failed with something other than "not found".
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The opener wrote to its standard error stream. Only produced
    /// when waiting for the opener to exit; carries the decoded text.
    #[error("{0}")]
    Stderr(String),

    /// The opener exited with a positive status code. Only produced
    /// when waiting for the opener to exit.
    #[error("exited with code {0}")]
    ExitCode(i32),
}
