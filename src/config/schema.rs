//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::{Config, TaskConfig, DEFAULT_SUITE, PIPELINE_KEY};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if config.tasks.is_empty() {
        return Err(ConfigError::NoTasks);
    }

    for (name, task) in &config.tasks {
        validate_task(name, task)?;
    }

    if let Some(pipeline) = &config.pipeline {
        if pipeline.is_empty() {
            return Err(ConfigError::EmptyPipeline);
        }
        if config.suites.contains_key(DEFAULT_SUITE) {
            return Err(ConfigError::Invalid(format!(
                "'{}' and suite '{}' both declare the default sequence",
                PIPELINE_KEY, DEFAULT_SUITE
            )));
        }
    }

    for (name, suite) in &config.suites {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid("suite names cannot be blank".to_string()));
        }
        if suite.is_empty() {
            return Err(ConfigError::EmptySuite(name.clone()));
        }
    }

    if let Some(interpreter) = &config.interpreter {
        if interpreter.first().map_or(true, |program| program.trim().is_empty()) {
            return Err(ConfigError::EmptyInterpreter);
        }
    }

    Ok(())
}

/// Validate a single task
pub fn validate_task(name: &str, task: &TaskConfig) -> ConfigResult<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::Invalid("task names cannot be blank".to_string()));
    }

    if task.commands.iter().all(|cmd| cmd.trim().is_empty()) {
        return Err(ConfigError::MissingCommands(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn task(commands: &[&str]) -> TaskConfig {
        TaskConfig {
            commands: commands.iter().map(|c| c.to_string()).collect(),
            ..TaskConfig::default()
        }
    }

    fn config_with(tasks: Vec<(&str, TaskConfig)>) -> Config {
        Config {
            tasks: tasks
                .into_iter()
                .map(|(name, task)| (name.to_string(), task))
                .collect::<IndexMap<_, _>>(),
            ..Config::default()
        }
    }

    #[test]
    fn test_validate_valid_config() {
        let config = config_with(vec![("test", task(&["echo test"]))]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_no_tasks() {
        let config = Config::default();
        assert!(matches!(validate_config(&config), Err(ConfigError::NoTasks)));
    }

    #[test]
    fn test_validate_missing_commands() {
        let config = config_with(vec![
            ("ok", task(&["echo ok"])),
            ("broken", task(&[])),
        ]);
        match validate_config(&config) {
            Err(ConfigError::MissingCommands(name)) => assert_eq!(name, "broken"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_blank_commands() {
        let config = config_with(vec![("blank", task(&["", "   "]))]);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingCommands(_))
        ));
    }

    #[test]
    fn test_validate_empty_pipeline() {
        let mut config = config_with(vec![("test", task(&["echo test"]))]);
        config.pipeline = Some(vec![]);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::EmptyPipeline)
        ));
    }

    #[test]
    fn test_validate_empty_interpreter() {
        let mut config = config_with(vec![("test", task(&["echo test"]))]);
        config.interpreter = Some(vec![]);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::EmptyInterpreter)
        ));
    }

    #[test]
    fn test_pipeline_with_unknown_task_is_left_to_selection() {
        let mut config = config_with(vec![("test", task(&["echo test"]))]);
        config.pipeline = Some(vec!["typo".to_string()]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_suite() {
        let mut config = config_with(vec![("test", task(&["echo test"]))]);
        config.suites.insert("release".to_string(), vec![]);
        match validate_config(&config) {
            Err(ConfigError::EmptySuite(name)) => assert_eq!(name, "release"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_pipeline_and_main_suite_conflict() {
        let mut config = config_with(vec![("test", task(&["echo test"]))]);
        config.pipeline = Some(vec!["test".to_string()]);
        config
            .suites
            .insert(DEFAULT_SUITE.to_string(), vec!["test".to_string()]);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
