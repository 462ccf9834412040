// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod scan;
pub mod types;

use tracing::debug;

use crate::cli::CliArgs;
use crate::engine::{Runtime, Termination};
use crate::errors::Result;
use crate::exec::{ProcessRunner, SystemRunner};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the system process runner for the configured command
/// - the runtime (scanner + exit policy) over standard input
/// - the final summary line on standard error
pub fn run(args: CliArgs, program: &str) -> Result<Termination> {
    let options = args.run_options();
    let runner = SystemRunner::new(program, args.command)?;
    let command = runner.command_name();

    let stdin = std::io::stdin();
    let end = Runtime::new(runner, options).run(stdin.lock())?;

    if let Some(line) = end.report(program, &command) {
        eprintln!("{line}");
    }

    debug!(exit_code = end.exit_code(), "run complete");
    Ok(end)
}
