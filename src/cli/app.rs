//! Main CLI application

use crate::config::{parse_config_auto, parse_config_file, Config};
use crate::runner::{Context, Orchestrator, Selection, ShellExecutor, TaskRegistry, Verbosity};
use crate::ui;
use anyhow::Context as _;
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use clap_complete::Shell;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI application
pub struct App {
    /// Parsed configuration
    config: Config,
    /// Tasks built from the configuration
    registry: TaskRegistry,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app from the discovered configuration file
    pub fn new() -> anyhow::Result<Self> {
        let (config, config_path) = parse_config_auto()?;
        Self::from_config(config, config_path)
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> anyhow::Result<Self> {
        let config = parse_config_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        Self::from_config(config, path)
    }

    fn from_config(config: Config, config_path: PathBuf) -> anyhow::Result<Self> {
        let registry = TaskRegistry::from_config(config.clone())
            .with_context(|| format!("invalid config {}", config_path.display()))?;

        Ok(App {
            config,
            registry,
            config_path,
        })
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Build the execution context for this config and the given flags
    pub fn context(&self, matches: &ArgMatches) -> Context {
        let mut ctx = Context::new()
            .with_working_dir(config_dir(&self.config_path))
            .with_silent(matches.get_flag("silent"))
            .with_mute_commands(matches.get_flag("mute-commands"))
            .with_verbosity(get_verbosity(matches));

        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        ctx
    }

    /// Run the application with parsed command line arguments
    pub fn run(self, matches: &ArgMatches) -> anyhow::Result<ExitCode> {
        let ctx = self.context(matches);
        ctx.print_debug(&format!("Using config {}", self.config_path.display()));

        if matches.get_flag("all") {
            ui::print_task_list(&self.registry);
            return Ok(ExitCode::SUCCESS);
        }

        if let Some(names) = matches.get_many::<String>("describe") {
            let tasks = names
                .map(|name| self.registry.lookup(name))
                .collect::<Result<Vec<_>, _>>()?;
            ui::print_task_descriptions(&tasks);
            return Ok(ExitCode::SUCCESS);
        }

        let selection = get_selection(matches);
        let order = selection.resolve(&self.registry)?;

        if matches.get_flag("flow") {
            ui::print_flow(&order);
            return Ok(ExitCode::SUCCESS);
        }

        // A single named task runs without the banner and run summary
        let show_summary = selection.tasks.len() != 1;
        if show_summary {
            ui::print_banner(
                &ctx,
                self.config.name.as_deref(),
                selection.source(&self.registry),
            );
        }

        let mut orchestrator = Orchestrator::new(&self.registry, ShellExecutor, &ctx);
        let report = orchestrator.run(&order)?;
        if show_summary {
            ui::print_report(&report, &ctx);
        }

        Ok(ExitCode::from(report.exit_code()))
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("koi")
        .version(env!("CARGO_PKG_VERSION"))
        .about("CLI task runner & automation tool")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Path to koi.yml config file"),
        )
        .arg(
            Arg::new("task")
                .short('t')
                .long("task")
                .value_name("TASKS")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Run selected task(s) in the given order"),
        )
        .arg(
            Arg::new("run-all")
                .long("run-all")
                .action(ArgAction::SetTrue)
                .conflicts_with("task")
                .help("Run every task from the config"),
        )
        .arg(
            Arg::new("run")
                .short('r')
                .long("run")
                .value_name("SUITE")
                .conflicts_with_all(["task", "run-all"])
                .help("Run a named suite from the config"),
        )
        .arg(
            Arg::new("skip")
                .long("skip")
                .value_name("TASKS")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Skip task(s) from the selection"),
        )
        .arg(
            Arg::new("allow-duplicates")
                .long("allow-duplicates")
                .action(ArgAction::SetTrue)
                .help("Allow a task to appear more than once in the selection"),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .action(ArgAction::SetTrue)
                .help("Hide output from running commands"),
        )
        .arg(
            Arg::new("mute-commands")
                .short('m')
                .long("mute-commands")
                .action(ArgAction::SetTrue)
                .help("Don't print shell commands"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only print command output and errors"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print verbose output"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Display all tasks from the config"),
        )
        .arg(
            Arg::new("flow")
                .long("flow")
                .action(ArgAction::SetTrue)
                .help("Display the tasks that would run, in order"),
        )
        .arg(
            Arg::new("describe")
                .short('d')
                .long("describe")
                .value_name("TASKS")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Display config for given task(s)"),
        )
        .group(
            ArgGroup::new("display")
                .args(["all", "flow", "describe"])
                .multiple(false),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(value_parser!(Shell))
                .exclusive(true)
                .help("Print a shell completion script"),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Get the task selection from matches
fn get_selection(matches: &ArgMatches) -> Selection {
    let strings = |id: &str| -> Vec<String> {
        matches
            .get_many::<String>(id)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    };

    Selection::new()
        .with_tasks(strings("task"))
        .with_run_all(matches.get_flag("run-all"))
        .with_suite(matches.get_one::<String>("run").cloned())
        .with_skip(strings("skip"))
        .with_allow_duplicates(matches.get_flag("allow-duplicates"))
}

/// Directory commands run in: the one holding the config file
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Run the CLI application with the process arguments
pub fn run() -> anyhow::Result<ExitCode> {
    run_from(env::args_os())
}

/// Run the CLI application with provided arguments
pub fn run_from<I, T>(args: I) -> anyhow::Result<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().get_matches_from(args);

    if matches.get_flag("no-color") {
        colored::control::set_override(false);
    }

    if let Some(shell) = matches.get_one::<Shell>("completions") {
        clap_complete::generate(*shell, &mut build_command(), "koi", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::new()?,
    };

    app.run(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        build_command()
            .try_get_matches_from(std::iter::once("koi").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_get_verbosity() {
        assert_eq!(get_verbosity(&matches(&[])), Verbosity::Normal);
        assert_eq!(get_verbosity(&matches(&["-q"])), Verbosity::Quiet);
        assert_eq!(get_verbosity(&matches(&["--verbose"])), Verbosity::Verbose);
    }

    #[test]
    fn test_get_selection() {
        let selection = get_selection(&matches(&[
            "--task", "lint", "format", "--skip", "test", "--allow-duplicates",
        ]));
        assert_eq!(selection.tasks, vec!["lint", "format"]);
        assert!(selection.skip.contains("test"));
        assert!(!selection.run_all);
        assert!(selection.allow_duplicates);
    }

    #[test]
    fn test_repeated_task_flags_append() {
        let selection = get_selection(&matches(&["-t", "a", "-t", "b"]));
        assert_eq!(selection.tasks, vec!["a", "b"]);
    }

    #[test]
    fn test_task_conflicts_with_run_all() {
        let result = build_command().try_get_matches_from(["koi", "--task", "a", "--run-all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_suite() {
        let selection = get_selection(&matches(&["-r", "release", "--skip", "lint"]));
        assert_eq!(selection.suite.as_deref(), Some("release"));
        assert!(get_selection(&matches(&[])).suite.is_none());

        let result = build_command().try_get_matches_from(["koi", "--run", "release", "-t", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_modes_are_exclusive() {
        let result = build_command().try_get_matches_from(["koi", "--all", "--flow"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_dir() {
        assert_eq!(
            config_dir(Path::new("/work/project/koi.yml")),
            PathBuf::from("/work/project")
        );
        assert_eq!(
            config_dir(Path::new("koi.yml")),
            env::current_dir().unwrap()
        );
    }
}
