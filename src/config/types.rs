//! Core configuration types
//!
//! This module defines the data structures that represent a koi.yml configuration file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// YAML key of the default pipeline declaration.
///
/// The pipeline lives beside `tasks`, never inside it, so no task name can
/// shadow it and it is never enumerated as a task.
pub const PIPELINE_KEY: &str = "pipeline";

/// Suite used as the default sequence when no `pipeline` is declared
pub const DEFAULT_SUITE: &str = "main";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Project name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Project usage description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Interpreter used to run every command (e.g., ["bash", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Task names run in order when nothing is selected on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Vec<String>>,

    /// Named task sequences, run with `--run <SUITE>`
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub suites: IndexMap<String, Vec<String>>,

    /// Tasks in declaration order
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: IndexMap<String, TaskConfig>,
}

/// A task definition as written in the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Setup commands run before `commands`
    #[serde(
        default,
        alias = "pre_run",
        alias = "pre",
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_command_list"
    )]
    pub dependencies: Vec<String>,

    /// Main commands
    #[serde(default, alias = "cmd", deserialize_with = "deserialize_command_list")]
    pub commands: Vec<String>,

    /// Teardown commands, run even when the main commands fail
    #[serde(
        default,
        alias = "post_run",
        alias = "post",
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_command_list"
    )]
    pub cleanup: Vec<String>,
}

/// Custom deserializer for the task table.
///
/// Goes through `serde_yaml::Mapping` so duplicate task names are rejected
/// instead of silently overwritten.
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<IndexMap<String, TaskConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::{Mapping, Value};

    let value = Value::deserialize(deserializer)?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        _ => return Err(D::Error::custom("tasks must be a mapping of task names")),
    };

    let mut tasks = IndexMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let name = match key {
            Value::String(name) => name,
            other => {
                return Err(D::Error::custom(format!(
                    "task names must be strings, found {:?}",
                    other
                )))
            }
        };
        let task = match value {
            Value::Null => TaskConfig::default(),
            value => TaskConfig::deserialize(value)
                .map_err(|e| D::Error::custom(format!("task '{}': {}", name, e)))?,
        };
        tasks.insert(name, task);
    }

    Ok(tasks)
}

/// Custom deserializer for command fields that handles both single values and arrays
fn deserialize_command_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        // Single command
        Value::String(s) => Ok(vec![s]),
        // Array of commands
        Value::Sequence(seq) => seq
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(D::Error::custom("each command must be a string")),
            })
            .collect(),
        // Null or not present
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("commands must be a string or array of strings")),
    }
}
