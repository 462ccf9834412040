// src/scan/mod.rs

//! Input scanning.
//!
//! - [`reader`] splits standard input into bounded line chunks.
//! - [`marker`] recognises BEGIN/END marker lines and extracts labels.
//! - [`scanner`] is the pure state machine tracking the open block.

pub mod marker;
pub mod reader;
pub mod scanner;

pub use marker::{begin_label, end_label, MAX_LABEL_LEN};
pub use reader::{LineReader, DEFAULT_MAX_LINE};
pub use scanner::{OpenBlock, ScanStep, Scanner};
