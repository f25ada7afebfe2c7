//! Task registry
//!
//! Name-to-task lookup built once per invocation from a validated config.

use crate::config::{self, Config, DEFAULT_SUITE};
use crate::error::{ConfigResult, SelectionError, SelectionResult};
use crate::runner::Task;
use indexmap::IndexMap;

/// Read-only set of tasks, in declaration order
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: IndexMap<String, Task>,
    pipeline: Vec<String>,
    suites: IndexMap<String, Vec<String>>,
}

impl TaskRegistry {
    /// Validate a config and build the registry from it
    pub fn from_config(config: Config) -> ConfigResult<Self> {
        config::validate_config(&config)?;

        let tasks = config
            .tasks
            .into_iter()
            .map(|(name, task)| Task::from_config(name.clone(), task).map(|task| (name, task)))
            .collect::<ConfigResult<IndexMap<_, _>>>()?;

        let pipeline = config
            .pipeline
            .or_else(|| config.suites.get(DEFAULT_SUITE).cloned())
            .unwrap_or_default();

        Ok(TaskRegistry {
            tasks,
            pipeline,
            suites: config.suites,
        })
    }

    /// Build a registry directly from tasks
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>, pipeline: Vec<String>) -> Self {
        TaskRegistry {
            tasks: tasks
                .into_iter()
                .map(|task| (task.name.clone(), task))
                .collect(),
            pipeline,
            suites: IndexMap::new(),
        }
    }

    /// Add a named suite
    pub fn with_suite(mut self, name: impl Into<String>, tasks: Vec<String>) -> Self {
        self.suites.insert(name.into(), tasks);
        self
    }

    /// Look up a task by name
    pub fn lookup(&self, name: &str) -> SelectionResult<&Task> {
        self.tasks
            .get(name)
            .ok_or_else(|| SelectionError::UnknownTask(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Every task name in declaration order
    pub fn all_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn has_pipeline(&self) -> bool {
        !self.pipeline.is_empty()
    }

    /// The declared pipeline, empty when none was declared
    pub fn pipeline(&self) -> &[String] {
        &self.pipeline
    }

    /// Task names of a named suite
    pub fn suite(&self, name: &str) -> SelectionResult<&[String]> {
        self.suites
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SelectionError::UnknownSuite(name.to_string()))
    }

    /// Every suite name in declaration order
    pub fn suite_names(&self) -> Vec<String> {
        self.suites.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
