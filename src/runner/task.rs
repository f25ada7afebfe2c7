//! Task execution types and logic
//!
//! This module contains the runtime representation of tasks and the phase
//! runner that executes them.

use crate::config;
use crate::error::{ConfigResult, ExecutionResult};
use crate::runner::{CommandExecutor, Context};
use std::fmt;
use std::time::{Duration, Instant};

/// Runtime task representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task name
    pub name: String,

    /// Longer description
    pub description: Option<String>,

    /// Setup commands
    pub dependencies: Vec<String>,

    /// Main commands, never empty
    pub commands: Vec<String>,

    /// Teardown commands
    pub cleanup: Vec<String>,
}

/// One of the three ordered stages of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Dependencies,
    Commands,
    Cleanup,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Dependencies => "dependencies",
            Phase::Commands => "commands",
            Phase::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an attempted task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed,
}

/// What happened when a task was run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub name: String,
    pub status: TaskStatus,
    /// Phase that decided a `Failed` status
    pub failed_phase: Option<Phase>,
    /// Cleanup failed; does not affect `status`
    pub cleanup_failed: bool,
    pub elapsed: Duration,
}

impl TaskOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

impl Task {
    /// Create a new task from configuration
    pub fn from_config(name: String, config: config::TaskConfig) -> ConfigResult<Self> {
        config::validate_task(&name, &config)?;

        Ok(Task {
            name,
            description: config.description,
            dependencies: config.dependencies,
            commands: config.commands,
            cleanup: config.cleanup,
        })
    }

    /// Commands of a phase
    pub fn phase(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::Dependencies => &self.dependencies,
            Phase::Commands => &self.commands,
            Phase::Cleanup => &self.cleanup,
        }
    }

    /// Run dependencies, then commands, then cleanup.
    ///
    /// Commands are skipped when dependencies fail. Cleanup always runs and
    /// its failure is logged without changing the task's status.
    pub fn run<E: CommandExecutor>(&self, executor: &mut E, ctx: &Context) -> TaskOutcome {
        let start = Instant::now();
        ctx.print_start(&format!("{}:", self.name.to_uppercase()));

        let mut failed_phase = None;
        for phase in [Phase::Dependencies, Phase::Commands] {
            if let Err(e) = run_phase(phase, self.phase(phase), executor, ctx) {
                ctx.print_error(&format!("{} {} failed: {}", self.name, phase, e));
                failed_phase = Some(phase);
                break;
            }
        }

        let cleanup_failed = match run_phase(Phase::Cleanup, &self.cleanup, executor, ctx) {
            Ok(()) => false,
            Err(e) => {
                ctx.print_error(&format!("{} cleanup failed: {}", self.name, e));
                true
            }
        };

        let elapsed = start.elapsed();
        let status = if failed_phase.is_none() {
            ctx.print_success(&format!(
                "{} succeeded! Took: {:.2?}",
                self.name.to_uppercase(),
                elapsed
            ));
            TaskStatus::Succeeded
        } else {
            ctx.print_error(&format!("{} failed", self.name.to_uppercase()));
            TaskStatus::Failed
        };

        TaskOutcome {
            name: self.name.clone(),
            status,
            failed_phase,
            cleanup_failed,
            elapsed,
        }
    }
}

/// Run the commands of one phase in order, stopping at the first failure
pub fn run_phase<E: CommandExecutor>(
    phase: Phase,
    commands: &[String],
    executor: &mut E,
    ctx: &Context,
) -> ExecutionResult<()> {
    if !commands.is_empty() {
        ctx.print_debug(&format!("Running {} ({} command(s))", phase, commands.len()));
    }
    for command in commands {
        executor.execute(command, ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ExecutionError};
    use crate::runner::Verbosity;
    use std::collections::HashSet;

    /// Records every command and fails the ones listed in `failing`
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        failing: HashSet<String>,
    }

    impl Recorder {
        fn failing(commands: &[&str]) -> Self {
            Recorder {
                calls: Vec::new(),
                failing: commands.iter().map(|c| c.to_string()).collect(),
            }
        }
    }

    impl CommandExecutor for Recorder {
        fn execute(&mut self, command: &str, _ctx: &Context) -> ExecutionResult<()> {
            self.calls.push(command.to_string());
            if self.failing.contains(command) {
                return Err(ExecutionError::CommandFailed {
                    command: command.to_string(),
                    code: Some(1),
                });
            }
            Ok(())
        }
    }

    fn ctx() -> Context {
        Context::new().with_verbosity(Verbosity::Quiet)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn task() -> Task {
        Task {
            name: "build".to_string(),
            description: None,
            dependencies: strings(&["dep1", "dep2"]),
            commands: strings(&["cmd1", "cmd2"]),
            cleanup: strings(&["clean1", "clean2"]),
        }
    }

    #[test]
    fn test_from_config_requires_commands() {
        let config = config::TaskConfig {
            description: Some("nothing to do".to_string()),
            ..config::TaskConfig::default()
        };
        let result = Task::from_config("empty".to_string(), config);
        assert!(matches!(result, Err(ConfigError::MissingCommands(_))));
    }

    #[test]
    fn test_phases_run_in_order() {
        let mut recorder = Recorder::default();
        let outcome = task().run(&mut recorder, &ctx());

        assert_eq!(outcome.status, TaskStatus::Succeeded);
        assert_eq!(outcome.failed_phase, None);
        assert!(!outcome.cleanup_failed);
        assert_eq!(
            recorder.calls,
            strings(&["dep1", "dep2", "cmd1", "cmd2", "clean1", "clean2"])
        );
    }

    #[test]
    fn test_dependency_failure_skips_commands_but_runs_cleanup() {
        let mut recorder = Recorder::failing(&["dep1"]);
        let outcome = task().run(&mut recorder, &ctx());

        assert_eq!(outcome.status, TaskStatus::Failed);
        assert_eq!(outcome.failed_phase, Some(Phase::Dependencies));
        assert_eq!(recorder.calls, strings(&["dep1", "clean1", "clean2"]));
    }

    #[test]
    fn test_command_failure_stops_phase() {
        let mut recorder = Recorder::failing(&["cmd1"]);
        let outcome = task().run(&mut recorder, &ctx());

        assert_eq!(outcome.status, TaskStatus::Failed);
        assert_eq!(outcome.failed_phase, Some(Phase::Commands));
        assert_eq!(
            recorder.calls,
            strings(&["dep1", "dep2", "cmd1", "clean1", "clean2"])
        );
    }

    #[test]
    fn test_cleanup_failure_keeps_success() {
        let mut recorder = Recorder::failing(&["clean1"]);
        let outcome = task().run(&mut recorder, &ctx());

        assert!(outcome.succeeded());
        assert!(outcome.cleanup_failed);
        assert_eq!(recorder.calls.last().map(String::as_str), Some("clean1"));
    }

    #[test]
    fn test_cleanup_failure_keeps_failure() {
        let mut recorder = Recorder::failing(&["cmd2", "clean1"]);
        let outcome = task().run(&mut recorder, &ctx());

        assert_eq!(outcome.status, TaskStatus::Failed);
        assert_eq!(outcome.failed_phase, Some(Phase::Commands));
        assert!(outcome.cleanup_failed);
    }

    #[test]
    fn test_run_phase_empty_is_ok() {
        let mut recorder = Recorder::default();
        assert!(run_phase(Phase::Cleanup, &[], &mut recorder, &ctx()).is_ok());
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Dependencies.to_string(), "dependencies");
        assert_eq!(Phase::Commands.to_string(), "commands");
        assert_eq!(Phase::Cleanup.to_string(), "cleanup");
    }
}
