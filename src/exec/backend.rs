// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! The runtime talks to a [`ProcessRunner`] instead of spawning processes
//! itself. Production code uses [`super::SystemRunner`]; tests can provide a
//! runner that records what it was asked to do and returns scripted
//! outcomes.

use crate::errors::Result;
use crate::types::ExitOutcome;

pub const ENV_INDEX: &str = "XARMOUR_INDEX";
pub const ENV_COUNT: &str = "XARMOUR_COUNT";
pub const ENV_TIMES: &str = "XARMOUR_TIMES";
pub const ENV_LABEL: &str = "XARMOUR_LABEL";

/// Per-block values exposed to the command through its environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEnv<'a> {
    /// Zero-based index of the block.
    pub index: u64,
    /// Successful commands so far.
    pub count: u64,
    /// Success threshold, if threshold mode is active.
    pub times: Option<u64>,
    /// Label from the BEGIN marker, verbatim.
    pub label: &'a [u8],
}

/// Starts one command per armoured block.
pub trait ProcessRunner {
    type Process: BlockProcess;

    /// Name of the command, for diagnostics.
    fn command_name(&self) -> String;

    /// Start the command for a block, its input connected to a fresh pipe.
    ///
    /// Fails only when the process could not be created at all; a program
    /// that cannot be executed is reported through the returned process's
    /// outcome instead.
    fn spawn(&mut self, env: &BlockEnv<'_>) -> Result<Self::Process>;
}

/// A running command owned by the block that started it.
pub trait BlockProcess {
    /// Send bytes to the command's input. Write errors are ignored; they
    /// surface through the outcome of [`BlockProcess::finish`].
    fn write(&mut self, bytes: &[u8]);

    /// Close the command's input, wait for it to terminate and classify how
    /// it ended.
    fn finish(self) -> ExitOutcome;
}
