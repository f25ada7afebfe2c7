//! Common test utilities

#![allow(dead_code)]

use koi::error::{ExecutionError, ExecutionResult};
use koi::runner::{CommandExecutor, Context};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with a koi.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("koi.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with an empty subdirectory next to it
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, config_path) = create_test_config(content);
    let sub_dir = temp_dir.path().join("subdir");
    fs::create_dir(&sub_dir).unwrap();
    (temp_dir, config_path, sub_dir)
}

/// Executor that records commands instead of running them
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub calls: Vec<String>,
    pub failing: HashSet<String>,
}

impl RecordingExecutor {
    pub fn failing(commands: &[&str]) -> Self {
        RecordingExecutor {
            calls: Vec::new(),
            failing: commands.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls.iter().filter(|c| *c == command).count()
    }
}

impl CommandExecutor for RecordingExecutor {
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

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
