//! Command execution
//!
//! This module handles executing shell commands.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::Context;
use std::process::{Command as StdCommand, Stdio};

/// Runs a single shell command and reports whether it succeeded.
///
/// The phase runner only ever talks to this trait, so tests can swap the
/// shell for a recorder.
pub trait CommandExecutor {
    fn execute(&mut self, command: &str, ctx: &Context) -> ExecutionResult<()>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &mut E {
    fn execute(&mut self, command: &str, ctx: &Context) -> ExecutionResult<()> {
        (**self).execute(command, ctx)
    }
}

/// Executor that spawns commands through the context's interpreter
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&mut self, command: &str, ctx: &Context) -> ExecutionResult<()> {
        execute_command(command, ctx)
    }
}

/// Execute a command in the given context
pub fn execute_command(cmd: &str, ctx: &Context) -> ExecutionResult<()> {
    ctx.print_command(cmd);

    let (program, interpreter_args) =
        ctx.interpreter
            .split_first()
            .ok_or_else(|| ExecutionError::Spawn {
                command: cmd.to_string(),
                error: "no interpreter configured".to_string(),
            })?;

    let mut command = StdCommand::new(program);
    command.args(interpreter_args);
    command.arg(cmd);
    command.current_dir(&ctx.working_dir);

    command.stdin(Stdio::inherit());
    if ctx.silent {
        command.stdout(Stdio::null());
        command.stderr(Stdio::null());
    } else {
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());
    }

    let status = command.status().map_err(|e| ExecutionError::Spawn {
        command: cmd.to_string(),
        error: e.to_string(),
    })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed {
            command: cmd.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}
