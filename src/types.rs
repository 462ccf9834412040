use std::fmt;

use nix::errno::Errno;

/// Generic failure exit code (`EXIT_FAILURE`).
pub const EXIT_FAILURE: u8 = 1;

/// Exit code reserved for anomalous OS-level results (`EX_OSERR`).
pub const EX_OSERR: u8 = 71;

/// Offset added to a signal number when a command was killed by it.
pub const SIGNAL_EXIT_BASE: i32 = 128;

/// How the command for one armoured block terminated.
///
/// Produced once per completed block and consumed immediately by the
/// aggregation logic in [`crate::engine::RunTotals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The command exited with status 0.
    ExitedOk,
    /// The command exited with a non-zero status.
    ExitedFail(i32),
    /// The command was terminated by a signal.
    Signaled(i32),
    /// The wait primitive itself failed.
    WaitFailed(Errno),
    /// Neither a normal exit nor a signal; carries the raw wait status.
    Unknown(i32),
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::ExitedOk)
    }

    /// Exit code xarmour itself reports when this outcome is fatal.
    pub fn exit_code(&self) -> u8 {
        match *self {
            ExitOutcome::ExitedOk => 0,
            ExitOutcome::ExitedFail(code) => clamp_code(code),
            ExitOutcome::Signaled(signum) => clamp_code(SIGNAL_EXIT_BASE + signum),
            ExitOutcome::WaitFailed(_) => EXIT_FAILURE,
            ExitOutcome::Unknown(_) => EX_OSERR,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::ExitedOk => write!(f, "succeeded"),
            ExitOutcome::ExitedFail(code) => write!(f, "returned {code}"),
            ExitOutcome::Signaled(signum) => write!(f, "signaled {signum}"),
            ExitOutcome::WaitFailed(errno) => write!(f, "could not be waited for: {errno}"),
            ExitOutcome::Unknown(raw) => write!(f, "failed with {raw}"),
        }
    }
}

// Exit statuses are 8 bits wide; a failure code outside 1..=255 becomes 1.
fn clamp_code(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(EXIT_FAILURE)
}
