//! Run report
//!
//! Terminal record of a run, produced once by the orchestrator.

use crate::runner::{TaskOutcome, TaskStatus};
use std::time::Duration;

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    /// Not attempted because an earlier task failed
    pub skipped: Vec<String>,
    /// Tasks whose cleanup failed, whatever their status
    pub cleanup_failures: Vec<String>,
    /// Attempted tasks, in run order
    pub outcomes: Vec<TaskOutcome>,
    pub elapsed: Duration,
}

impl RunReport {
    pub(crate) fn record(&mut self, outcome: TaskOutcome) {
        match outcome.status {
            TaskStatus::Succeeded => self.succeeded.push(outcome.name.clone()),
            TaskStatus::Failed => self.failed.push(outcome.name.clone()),
        }
        if outcome.cleanup_failed {
            self.cleanup_failures.push(outcome.name.clone());
        }
        self.outcomes.push(outcome);
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of tasks that were run
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
