// src/engine/runtime.rs

use std::fmt;
use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::errors::{Result, XarmourError};
use crate::exec::{BlockEnv, BlockProcess, ProcessRunner};
use crate::scan::{LineReader, OpenBlock, ScanStep, Scanner};
use crate::types::ExitOutcome;

use super::totals::{RunTotals, Termination};
use super::RunOptions;

/// Drives the block scanner over an input stream and delegates process
/// handling to a `ProcessRunner`.
///
/// The scanner decides what each line means; this struct performs the IO:
/// reading lines, starting commands, forwarding bytes, reaping children and
/// applying the exit policy in [`RunTotals`].
pub struct Runtime<R: ProcessRunner> {
    scanner: Scanner,
    totals: RunTotals,
    runner: R,
    options: RunOptions,
}

impl<R: ProcessRunner> fmt::Debug for Runtime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("scanner", &self.scanner)
            .field("totals", &self.totals)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner> Runtime<R> {
    pub fn new(runner: R, options: RunOptions) -> Self {
        Self {
            scanner: Scanner::new(),
            totals: RunTotals::new(options.threshold),
            runner,
            options,
        }
    }

    /// Process `input` to the end, or until a command failure ends the run.
    ///
    /// Blocks are handled strictly one after another: a command is always
    /// reaped before the next line is read.
    pub fn run<I: BufRead>(mut self, input: I) -> Result<Termination> {
        info!(
            command = %self.runner.command_name(),
            threshold = ?self.options.threshold,
            max_line = self.options.max_line,
            "xarmour runtime started"
        );

        let mut reader = LineReader::new(input, self.options.max_line);
        let mut line = Vec::new();
        let mut active: Option<R::Process> = None;

        while reader.next_line(&mut line)? {
            match self.scanner.feed(&line) {
                ScanStep::Ignore => {}
                ScanStep::Open(block) => {
                    let mut process = self.start(&block)?;
                    process.write(&line);
                    active = Some(process);
                }
                ScanStep::Forward => {
                    if let Some(process) = active.as_mut() {
                        process.write(&line);
                    }
                }
                ScanStep::Close(block) => {
                    let Some(mut process) = active.take() else {
                        continue;
                    };
                    process.write(&line);
                    if let Some(end) = self.complete(&block, process.finish())? {
                        return Ok(end);
                    }
                }
            }
        }

        if let (Some(block), Some(process)) = (self.scanner.finish(), active.take()) {
            self.abandon(&block, process);
        }

        let end = self.totals.conclude();
        info!(
            successes = self.totals.success_count(),
            ?end,
            "input exhausted"
        );
        Ok(end)
    }

    fn start(&mut self, block: &OpenBlock) -> Result<R::Process> {
        let env = BlockEnv {
            index: block.index,
            count: self.totals.success_count(),
            times: self.totals.threshold(),
            label: &block.label,
        };
        debug!(
            index = block.index,
            label = %String::from_utf8_lossy(&block.label),
            "BEGIN marker matched; starting command"
        );
        self.runner.spawn(&env)
    }

    fn complete(&mut self, block: &OpenBlock, outcome: ExitOutcome) -> Result<Option<Termination>> {
        info!(
            index = block.index,
            label = %String::from_utf8_lossy(&block.label),
            %outcome,
            "block finished"
        );

        if let ExitOutcome::WaitFailed(errno) = outcome {
            return Err(XarmourError::WaitFailed {
                command: self.runner.command_name(),
                errno,
            });
        }

        Ok(self.totals.record(outcome))
    }

    // Input ended inside a block: reap the child, but its result is
    // neither counted nor reported.
    fn abandon(&mut self, block: &OpenBlock, process: R::Process) {
        let outcome = process.finish();
        match outcome {
            ExitOutcome::WaitFailed(errno) => warn!(
                index = block.index,
                %errno,
                "could not reap command of unterminated block"
            ),
            _ => debug!(
                index = block.index,
                label = %String::from_utf8_lossy(&block.label),
                %outcome,
                "input ended inside block; result ignored"
            ),
        }
    }
}
