//! Error types for Koi

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Koi operations
pub type Result<T> = std::result::Result<T, KoiError>;

/// Main error type for Koi
#[derive(Error, Debug)]
pub enum KoiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task selection errors
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Command execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Config file '{0}' is empty")]
    Empty(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No tasks are defined")]
    NoTasks,

    #[error("'commands' in task '{0}' cannot be empty or missing")]
    MissingCommands(String),

    #[error("'{}' cannot be empty when declared", crate::config::PIPELINE_KEY)]
    EmptyPipeline,

    #[error("Suite '{0}' cannot be empty")]
    EmptySuite(String),

    #[error("'interpreter' cannot be empty when declared")]
    EmptyInterpreter,
}

/// Errors raised while resolving which tasks to run
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Task '{0}' is not defined")]
    UnknownTask(String),

    #[error("No task selected: pass --task, --run-all, --run or declare a pipeline")]
    NoTaskSelected,

    #[error("Task '{0}' is selected more than once (use --allow-duplicates)")]
    DuplicateTask(String),

    #[error("Suite '{0}' is not defined")]
    UnknownSuite(String),
}

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Command `{command}` {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Command `{command}` could not be started: {error}")]
    Spawn { command: String, error: String },
}

impl ExecutionError {
    /// The command string that failed
    pub fn command(&self) -> &str {
        match self {
            ExecutionError::CommandFailed { command, .. } => command,
            ExecutionError::Spawn { command, .. } => command,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("failed with exit code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for selection operations
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
