// src/engine/mod.rs

//! Run engine for xarmour.
//!
//! - [`totals`] holds the success counter and the exit policy.
//! - [`runtime`] is the IO shell that reads input, feeds the scanner and
//!   drives a [`crate::exec::ProcessRunner`].

use crate::scan::DEFAULT_MAX_LINE;

/// Options fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Minimum number of successful commands (threshold mode), if set.
    pub threshold: Option<u64>,
    /// Longest input chunk handed to the scanner, in bytes.
    pub max_line: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            threshold: None,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

pub mod runtime;
pub mod totals;

pub use runtime::Runtime;
pub use totals::{RunTotals, Termination};
