//! Koi - a YAML-based task runner
//!
//! Koi reads named tasks from a `koi.yml` file and runs a selection of them
//! in order. Each task has optional setup (`dependencies`), required
//! `commands` and optional `cleanup`; the first failing task stops the run
//! and the rest are reported as skipped.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod ui;

// Re-export commonly used types
pub use error::{KoiError, Result};

/// Current version of Koi
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
