//! Task selection
//!
//! Turns command-line selection input and the registry into the ordered list
//! of task names a run will attempt. Resolution never runs anything, so every
//! selection mistake surfaces before the first command.

use crate::error::{SelectionError, SelectionResult};
use crate::runner::TaskRegistry;
use std::collections::HashSet;

/// Where the resolved order came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Task names given on the command line
    Explicit,
    /// Every registered task
    All,
    /// A named suite from the config
    Suite,
    /// The config's pipeline declaration
    Pipeline,
}

/// What the invocation asked to run
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub tasks: Vec<String>,
    pub run_all: bool,
    pub suite: Option<String>,
    pub skip: HashSet<String>,
    pub allow_duplicates: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select explicit tasks, in order
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Select every registered task
    pub fn with_run_all(mut self, run_all: bool) -> Self {
        self.run_all = run_all;
        self
    }

    /// Select a named suite
    pub fn with_suite(mut self, suite: Option<String>) -> Self {
        self.suite = suite;
        self
    }

    /// Exclude tasks from whatever gets selected
    pub fn with_skip<I, S>(mut self, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = skip.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Which rule picks the tasks, or `None` when nothing is selected
    pub fn source(&self, registry: &TaskRegistry) -> Option<SelectionSource> {
        if !self.tasks.is_empty() {
            Some(SelectionSource::Explicit)
        } else if self.run_all {
            Some(SelectionSource::All)
        } else if self.suite.is_some() {
            Some(SelectionSource::Suite)
        } else if registry.has_pipeline() {
            Some(SelectionSource::Pipeline)
        } else {
            None
        }
    }

    /// Resolve the ordered list of tasks to run
    pub fn resolve(&self, registry: &TaskRegistry) -> SelectionResult<Vec<String>> {
        let candidates = match self.source(registry) {
            Some(SelectionSource::Explicit) => self.tasks.clone(),
            Some(SelectionSource::All) => registry.all_names(),
            Some(SelectionSource::Suite) => {
                let name = self.suite.as_deref().unwrap_or_default();
                registry.suite(name)?.to_vec()
            }
            Some(SelectionSource::Pipeline) => registry.pipeline().to_vec(),
            None => return Err(SelectionError::NoTaskSelected),
        };

        // Skip names are checked in sorted order so the reported one is stable
        let mut skip: Vec<&String> = self.skip.iter().collect();
        skip.sort();
        if let Some(unknown) = skip.into_iter().find(|name| !registry.contains(name)) {
            return Err(SelectionError::UnknownTask(unknown.clone()));
        }

        let order: Vec<String> = candidates
            .into_iter()
            .filter(|name| !self.skip.contains(name))
            .collect();

        let mut seen = HashSet::new();
        for name in &order {
            if !registry.contains(name) {
                return Err(SelectionError::UnknownTask(name.clone()));
            }
            if !seen.insert(name.as_str()) && !self.allow_duplicates {
                return Err(SelectionError::DuplicateTask(name.clone()));
            }
        }

        if order.is_empty() {
            return Err(SelectionError::NoTaskSelected);
        }

        Ok(order)
    }
}
