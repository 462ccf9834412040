// src/errors.rs

//! Crate-wide error type and result alias.

use nix::errno::Errno;
use thiserror::Error;

use crate::types::EXIT_FAILURE;

/// Fatal conditions that end a run before (or instead of) a verdict.
///
/// Command failures are not errors: they are reported through
/// [`crate::engine::Termination`] so that the command's own exit status can
/// be propagated.
#[derive(Error, Debug)]
pub enum XarmourError {
    #[error("No command specified.")]
    NoCommand,

    #[error("Could not start '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not reset SIGCHLD handling: {0}")]
    SignalReset(Errno),

    #[error("waitpid for '{command}' failed: {errno}")]
    WaitFailed { command: String, errno: Errno },

    #[error("Could not read input: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl XarmourError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

pub type Result<T> = std::result::Result<T, XarmourError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_exits_one() {
        let errors = [
            XarmourError::NoCommand,
            XarmourError::SignalReset(Errno::EINVAL),
            XarmourError::WaitFailed {
                command: "gpg".into(),
                errno: Errno::ECHILD,
            },
            XarmourError::Input(std::io::Error::other("closed")),
        ];
        for err in &errors {
            assert_eq!(err.exit_code(), EXIT_FAILURE);
        }
    }

    #[test]
    fn setup_failures_convert_transparently() {
        let err = XarmourError::from(anyhow::anyhow!("failed to install tracing subscriber"));
        assert!(matches!(err, XarmourError::Other(_)));
        assert_eq!(err.to_string(), "failed to install tracing subscriber");
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }
}
