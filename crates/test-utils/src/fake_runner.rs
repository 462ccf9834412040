use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use xarmour::errors::{Result, XarmourError};
use xarmour::exec::{BlockEnv, BlockProcess, ProcessRunner};
use xarmour::types::ExitOutcome;

/// What the fake runner saw for one spawned block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub index: u64,
    pub count: u64,
    pub times: Option<u64>,
    pub label: Vec<u8>,
    /// Bytes written to the "command" input.
    pub input: Vec<u8>,
    /// Whether the process was finished (input closed and reaped).
    pub finished: bool,
}

impl SpawnRecord {
    pub fn input_str(&self) -> String {
        String::from_utf8_lossy(&self.input).into_owned()
    }
}

/// A fake runner that:
/// - records every spawn with its environment and input bytes
/// - returns scripted outcomes in order, then `ExitedOk` once exhausted
/// - optionally fails to spawn at a given block index
pub struct FakeRunner {
    outcomes: VecDeque<ExitOutcome>,
    spawned: Arc<Mutex<Vec<SpawnRecord>>>,
    fail_spawn_at: Option<u64>,
}

impl FakeRunner {
    pub fn new(spawned: Arc<Mutex<Vec<SpawnRecord>>>) -> Self {
        Self {
            outcomes: VecDeque::new(),
            spawned,
            fail_spawn_at: None,
        }
    }

    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = ExitOutcome>) -> Self {
        self.outcomes.extend(outcomes);
        self
    }

    pub fn failing_spawn_at(mut self, index: u64) -> Self {
        self.fail_spawn_at = Some(index);
        self
    }
}

impl ProcessRunner for FakeRunner {
    type Process = FakeProcess;

    fn command_name(&self) -> String {
        "fake-command".to_string()
    }

    fn spawn(&mut self, env: &BlockEnv<'_>) -> Result<FakeProcess> {
        if self.fail_spawn_at == Some(env.index) {
            return Err(XarmourError::SpawnFailed {
                command: self.command_name(),
                source: std::io::Error::other("scripted spawn failure"),
            });
        }

        let slot = {
            let mut guard = self.spawned.lock().unwrap();
            guard.push(SpawnRecord {
                index: env.index,
                count: env.count,
                times: env.times,
                label: env.label.to_vec(),
                input: Vec::new(),
                finished: false,
            });
            guard.len() - 1
        };

        Ok(FakeProcess {
            spawned: Arc::clone(&self.spawned),
            slot,
            outcome: self.outcomes.pop_front().unwrap_or(ExitOutcome::ExitedOk),
        })
    }
}

pub struct FakeProcess {
    spawned: Arc<Mutex<Vec<SpawnRecord>>>,
    slot: usize,
    outcome: ExitOutcome,
}

impl BlockProcess for FakeProcess {
    fn write(&mut self, bytes: &[u8]) {
        let mut guard = self.spawned.lock().unwrap();
        guard[self.slot].input.extend_from_slice(bytes);
    }

    fn finish(self) -> ExitOutcome {
        let mut guard = self.spawned.lock().unwrap();
        guard[self.slot].finished = true;
        self.outcome
    }
}
