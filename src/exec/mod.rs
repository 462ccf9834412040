// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `ProcessRunner` / `BlockProcess` traits the
//!   runtime uses, plus the environment variable names exposed to commands.
//! - [`system`] is the production runner: one `std::process::Command` per
//!   block, input fed through a pipe, reaped with a blocking wait.

pub mod backend;
pub mod system;

pub use backend::{
    BlockEnv, BlockProcess, ProcessRunner, ENV_COUNT, ENV_INDEX, ENV_LABEL, ENV_TIMES,
};
pub use system::{classify, SystemProcess, SystemRunner};
