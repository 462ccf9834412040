// src/engine/totals.rs

//! Success accounting and the exit policy applied after each block.

use tracing::{debug, info};

use crate::types::{ExitOutcome, EXIT_FAILURE};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every block succeeded (no threshold configured).
    Completed,
    /// A command failed while no threshold was configured.
    CommandFailed(ExitOutcome),
    /// Threshold mode: enough commands succeeded.
    ThresholdMet { successes: u64, required: u64 },
    /// Threshold mode: too few commands succeeded.
    ThresholdMissed { successes: u64, required: u64 },
}

impl Termination {
    pub fn exit_code(&self) -> u8 {
        match self {
            Termination::Completed | Termination::ThresholdMet { .. } => 0,
            Termination::CommandFailed(outcome) => outcome.exit_code(),
            Termination::ThresholdMissed { .. } => EXIT_FAILURE,
        }
    }

    /// One-line message for standard error, if this termination has one.
    pub fn report(&self, program: &str, command: &str) -> Option<String> {
        match self {
            Termination::Completed => None,
            Termination::CommandFailed(outcome) => Some(format!("{program}: {command} {outcome}")),
            Termination::ThresholdMet {
                successes,
                required,
            } => Some(threshold_line(program, command, *successes, *required, "success")),
            Termination::ThresholdMissed {
                successes,
                required,
            } => Some(threshold_line(program, command, *successes, *required, "failed")),
        }
    }
}

fn threshold_line(program: &str, command: &str, successes: u64, required: u64, verdict: &str) -> String {
    let plural = if successes == 1 { "" } else { "es" };
    format!("{program}: {command}: {successes} success{plural}, {required} required: {verdict}")
}

/// Running totals for the whole run.
#[derive(Debug, Clone)]
pub struct RunTotals {
    success_count: u64,
    threshold: Option<u64>,
}

impl RunTotals {
    pub fn new(threshold: Option<u64>) -> Self {
        Self {
            success_count: 0,
            threshold,
        }
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn threshold(&self) -> Option<u64> {
        self.threshold
    }

    /// Account for one finished block.
    ///
    /// Returns `Some` when the run must stop now: a failure with no
    /// threshold configured. In threshold mode failures are tolerated and
    /// every block is processed.
    ///
    /// `ExitOutcome::WaitFailed` is expected to be handled by the caller
    /// before it gets here; if passed, it is treated as a failure.
    pub fn record(&mut self, outcome: ExitOutcome) -> Option<Termination> {
        if outcome.is_success() {
            self.success_count += 1;
            debug!(successes = self.success_count, "block succeeded");
            return None;
        }

        match self.threshold {
            Some(required) => {
                info!(
                    %outcome,
                    successes = self.success_count,
                    required,
                    "block failed; tolerated in threshold mode"
                );
                None
            }
            None => Some(Termination::CommandFailed(outcome)),
        }
    }

    /// Final decision at end of input.
    pub fn conclude(&self) -> Termination {
        match self.threshold {
            None => Termination::Completed,
            Some(required) if self.success_count >= required => Termination::ThresholdMet {
                successes: self.success_count,
                required,
            },
            Some(required) => Termination::ThresholdMissed {
                successes: self.success_count,
                required,
            },
        }
    }
}
