// src/exec/system.rs

//! Real process runner built on `std::process`.

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use tracing::{debug, info};

use crate::errors::{Result, XarmourError};
use crate::types::{ExitOutcome, EXIT_FAILURE};

use super::backend::{
    BlockEnv, BlockProcess, ProcessRunner, ENV_COUNT, ENV_INDEX, ENV_LABEL, ENV_TIMES,
};

/// Runs the configured command (no shell) once per block.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: String,
    argv: Vec<OsString>,
}

impl SystemRunner {
    /// `program` is the name xarmour reports itself as in diagnostics;
    /// `argv` is the command followed by its arguments.
    pub fn new(program: impl Into<String>, argv: Vec<OsString>) -> Result<Self> {
        if argv.is_empty() {
            return Err(XarmourError::NoCommand);
        }
        Ok(Self {
            program: program.into(),
            argv,
        })
    }

    fn command(&self, env: &BlockEnv<'_>) -> Command {
        let mut cmd = Command::new(&self.argv[0]);
        cmd.args(&self.argv[1..])
            .stdin(Stdio::piped())
            .env(ENV_INDEX, env.index.to_string())
            .env(ENV_COUNT, env.count.to_string())
            .env(ENV_LABEL, OsStr::from_bytes(env.label));

        match env.times {
            Some(times) => cmd.env(ENV_TIMES, times.to_string()),
            None => cmd.env_remove(ENV_TIMES),
        };

        cmd
    }
}

impl ProcessRunner for SystemRunner {
    type Process = SystemProcess;

    fn command_name(&self) -> String {
        self.argv[0].to_string_lossy().into_owned()
    }

    fn spawn(&mut self, env: &BlockEnv<'_>) -> Result<SystemProcess> {
        restore_default_sigchld()?;

        match self.command(env).spawn() {
            Ok(mut child) => {
                info!(
                    index = env.index,
                    label = %String::from_utf8_lossy(env.label),
                    pid = child.id(),
                    "started command for block"
                );
                let stdin = child.stdin.take();
                Ok(SystemProcess::Running { child, stdin })
            }
            Err(err) if is_exec_failure(&err) => {
                eprintln!(
                    "{}: Could not execute '{}', giving up: {}",
                    self.program,
                    self.command_name(),
                    err
                );
                Ok(SystemProcess::NotExecuted)
            }
            Err(source) => Err(XarmourError::SpawnFailed {
                command: self.command_name(),
                source,
            }),
        }
    }
}

/// Command started by [`SystemRunner`].
#[derive(Debug)]
pub enum SystemProcess {
    Running {
        child: Child,
        stdin: Option<ChildStdin>,
    },
    /// The program could not be executed. Input is discarded and the block
    /// ends as a plain failure with status 1.
    NotExecuted,
}

impl BlockProcess for SystemProcess {
    fn write(&mut self, bytes: &[u8]) {
        if let SystemProcess::Running {
            stdin: Some(stdin), ..
        } = self
        {
            if let Err(e) = stdin.write_all(bytes) {
                debug!(error = %e, "write to command input failed; ignoring");
            }
        }
    }

    fn finish(self) -> ExitOutcome {
        match self {
            SystemProcess::Running { mut child, stdin } => {
                // EOF for the child.
                drop(stdin);
                wait_for(&mut child)
            }
            SystemProcess::NotExecuted => ExitOutcome::ExitedFail(i32::from(EXIT_FAILURE)),
        }
    }
}

fn wait_for(child: &mut Child) -> ExitOutcome {
    loop {
        match child.wait() {
            Ok(status) => return classify(status),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return ExitOutcome::WaitFailed(Errno::from_raw(e.raw_os_error().unwrap_or(0)));
            }
        }
    }
}

/// Map a wait status onto an [`ExitOutcome`].
pub fn classify(status: ExitStatus) -> ExitOutcome {
    if let Some(code) = status.code() {
        if code == 0 {
            ExitOutcome::ExitedOk
        } else {
            ExitOutcome::ExitedFail(code)
        }
    } else if let Some(signum) = status.signal() {
        ExitOutcome::Signaled(signum)
    } else {
        ExitOutcome::Unknown(status.into_raw())
    }
}

/// Put SIGCHLD back to its default disposition so an inherited `SIG_IGN`
/// cannot make the kernel reap children before we wait for them.
fn restore_default_sigchld() -> Result<()> {
    // SAFETY: SIG_DFL installs no handler code.
    unsafe { signal(Signal::SIGCHLD, SigHandler::SigDfl) }
        .map(drop)
        .map_err(XarmourError::SignalReset)
}

// Errors that can only come from pipe/fork are fatal; everything else is
// the exec step failing in the child.
fn is_exec_failure(err: &io::Error) -> bool {
    match err.raw_os_error() {
        Some(raw) => !matches!(
            Errno::from_raw(raw),
            Errno::EAGAIN | Errno::ENOMEM | Errno::EMFILE | Errno::ENFILE | Errno::ENOSYS
        ),
        None => true,
    }
}
