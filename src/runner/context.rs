//! Execution context for task running
//!
//! The context carries the run settings shared by every task: where commands
//! run, which interpreter runs them and how much gets printed.

use colored::Colorize;
use std::env;
use std::path::PathBuf;

/// Execution settings for one invocation
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory commands run in
    pub working_dir: PathBuf,

    /// Interpreter prefix for every command (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Discard the output of running commands
    pub silent: bool,

    /// Don't echo commands before running them
    pub mute_commands: bool,

    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            silent: false,
            mute_commands: false,
            verbosity: Verbosity::Normal,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Discard command output
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Stop echoing commands
    pub fn with_mute_commands(mut self, mute: bool) -> Self {
        self.mute_commands = mute;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message.cyan());
        }
    }

    /// Print a task header
    pub fn print_start(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message.yellow());
        }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            eprintln!("{}", message.green());
        }
    }

    /// Print a command about to run
    pub fn print_command(&self, command: &str) {
        if !self.mute_commands && self.verbosity >= Verbosity::Normal {
            eprintln!("{}", command.bright_blue());
        }
    }

    /// Print error message; errors are shown at every verbosity
    pub fn print_error(&self, message: &str) {
        eprintln!("{}", message.red());
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("{}", message.purple());
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
