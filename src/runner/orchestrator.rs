//! Run loop
//!
//! Runs resolved tasks one after another and stops at the first failure.

use crate::error::SelectionResult;
use crate::runner::{CommandExecutor, Context, RunReport, Task, TaskRegistry};
use std::time::Instant;

/// Drives a run over a resolved task order
pub struct Orchestrator<'a, E: CommandExecutor> {
    registry: &'a TaskRegistry,
    executor: E,
    ctx: &'a Context,
}

impl<'a, E: CommandExecutor> Orchestrator<'a, E> {
    pub fn new(registry: &'a TaskRegistry, executor: E, ctx: &'a Context) -> Self {
        Orchestrator {
            registry,
            executor,
            ctx,
        }
    }

    /// Run `order` and report what happened.
    ///
    /// Every name is looked up before the first task starts, so an unknown
    /// name never leaves a half-finished run behind. After a task fails the
    /// remaining names go to `skipped` untouched.
    pub fn run(&mut self, order: &[String]) -> SelectionResult<RunReport> {
        let registry = self.registry;
        let tasks = order
            .iter()
            .map(|name| registry.lookup(name))
            .collect::<SelectionResult<Vec<&Task>>>()?;

        let start = Instant::now();
        let mut report = RunReport::default();

        let mut remaining = tasks.into_iter();
        for task in remaining.by_ref() {
            let outcome = task.run(&mut self.executor, self.ctx);
            let failed = !outcome.succeeded();
            report.record(outcome);
            if failed {
                break;
            }
        }

        report.skipped = remaining.map(|task| task.name.clone()).collect();
        for name in &report.skipped {
            self.ctx.print_debug(&format!("Skipping task '{}'", name));
        }

        report.elapsed = start.elapsed();
        Ok(report)
    }

    /// Give back the executor, e.g. to inspect a test recorder
    pub fn into_executor(self) -> E {
        self.executor
    }
}
