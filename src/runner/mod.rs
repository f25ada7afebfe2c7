//! Task execution engine
//!
//! This module handles task selection, the phases of a single task and the
//! fail-fast run loop over a resolved task order.

pub mod command;
pub mod context;
pub mod orchestrator;
pub mod registry;
pub mod report;
pub mod selection;
pub mod task;

// Re-export main types
pub use command::*;
pub use context::*;
pub use orchestrator::*;
pub use registry::*;
pub use report::*;
pub use selection::*;
pub use task::*;
