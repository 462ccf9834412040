// src/scan/scanner.rs

//! Pure block-scanning state machine.
//!
//! The scanner consumes input chunks and tells the caller what to do with
//! each one. It owns no process handles and performs no IO, so every
//! transition can be unit tested directly.

use super::marker::{begin_label, end_label};

/// The block currently being forwarded to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub label: Vec<u8>,
    pub index: u64,
}

/// What the caller must do with the chunk passed to [`Scanner::feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// Outside any block: drop the chunk.
    Ignore,
    /// A BEGIN marker opened a block: start its command, then forward the
    /// chunk to it.
    Open(OpenBlock),
    /// Inside a block: forward the chunk.
    Forward,
    /// The matching END marker: forward the chunk, then finish the block.
    Close(OpenBlock),
}

#[derive(Debug, Default)]
pub struct Scanner {
    active: Option<OpenBlock>,
    next_index: u64,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&OpenBlock> {
        self.active.as_ref()
    }

    /// Index the next opened block will receive.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn feed(&mut self, line: &[u8]) -> ScanStep {
        let Some(open) = &self.active else {
            return match begin_label(line) {
                Some(label) => {
                    let block = OpenBlock {
                        label: label.to_vec(),
                        index: self.next_index,
                    };
                    self.active = Some(block.clone());
                    ScanStep::Open(block)
                }
                None => ScanStep::Ignore,
            };
        };

        match end_label(line) {
            Some(label) if label == open.label.as_slice() => {
                let closed = open.clone();
                self.active = None;
                self.next_index += 1;
                ScanStep::Close(closed)
            }
            _ => ScanStep::Forward,
        }
    }

    /// End of input. Returns the block left open, if any.
    pub fn finish(&mut self) -> Option<OpenBlock> {
        self.active.take()
    }
}
