use std::ffi::NulError;
use std::io;

/// Errors that reach the read-eval loop.
///
/// Failures inside a forked child never show up here: the child reports
/// them itself and exits with a dedicated status.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("waitpid failed: {0}")]
    Wait(#[source] nix::Error),

    #[error("unable to install signal disposition: {0}")]
    Signal(#[source] io::Error),

    #[error("argument contains a NUL byte: {0}")]
    InvalidArgument(#[from] NulError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether the shell can keep reading commands after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShellError::InvalidArgument(_))
    }
}
