//! Terminal presentation
//!
//! Renders run reports and the read-only display modes (task list, flow,
//! task descriptions). Data goes to stdout; run logs go through `Context`.

use crate::runner::{Context, Phase, RunReport, SelectionSource, Task, TaskRegistry};
use colored::*;

/// Width of the longest field label, "dependencies:"
const LABEL_WIDTH: usize = 13;

/// Kind of a summary line, decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Success,
    Info,
    Failure,
}

/// Join task names for display
pub fn format_names(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

/// Summary lines of a finished run
pub fn summary_lines(report: &RunReport) -> Vec<(LineKind, String)> {
    let mut lines = Vec::new();

    if report.is_success() {
        lines.push((
            LineKind::Success,
            format!("All tasks succeeded! {}", format_names(&report.succeeded)),
        ));
        lines.push((LineKind::Info, format!("Run took: {:.2?}", report.elapsed)));
    } else {
        lines.push((
            LineKind::Failure,
            format!("Unsuccessful run took: {:.2?}", report.elapsed),
        ));
        lines.push((
            LineKind::Failure,
            format!("Failed tasks: {}", format_names(&report.failed)),
        ));
        if !report.succeeded.is_empty() {
            lines.push((
                LineKind::Info,
                format!("Successful tasks: {}", format_names(&report.succeeded)),
            ));
        }
        if !report.skipped.is_empty() {
            lines.push((
                LineKind::Info,
                format!("Skipped tasks: {}", format_names(&report.skipped)),
            ));
        }
    }

    if !report.cleanup_failures.is_empty() {
        lines.push((
            LineKind::Failure,
            format!("Cleanup failed for: {}", format_names(&report.cleanup_failures)),
        ));
    }

    lines
}

/// Plain-text summary of a finished run
pub fn format_report(report: &RunReport) -> String {
    summary_lines(report)
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the run summary
pub fn print_report(report: &RunReport, ctx: &Context) {
    for (kind, line) in summary_lines(report) {
        match kind {
            LineKind::Success => ctx.print_success(&line),
            LineKind::Info => ctx.print_info(&line),
            LineKind::Failure => ctx.print_error(&line),
        }
    }
}

/// Print the opening line of a run
pub fn print_banner(ctx: &Context, project: Option<&str>, source: Option<SelectionSource>) {
    let what = match source {
        Some(SelectionSource::Pipeline) => " (pipeline)",
        Some(SelectionSource::All) => " (all tasks)",
        Some(SelectionSource::Suite) => " (suite)",
        _ => "",
    };
    match project {
        Some(name) => ctx.print_info(&format!("Let's go! {}{}", name, what)),
        None => ctx.print_info(&format!("Let's go!{}", what)),
    }
}

/// Print every task name, with its description when it has one
pub fn print_task_list(registry: &TaskRegistry) {
    for task in registry.iter() {
        match &task.description {
            Some(description) => println!("{}  {}", task.name.bold(), description.dimmed()),
            None => println!("{}", task.name.bold()),
        }
    }
}

/// Print a resolved task order, one name per line
pub fn print_flow(order: &[String]) {
    for name in order {
        println!("{}", name);
    }
}

/// Describe a task the way it is declared
pub fn format_task_description(task: &Task) -> String {
    let mut out = format!("{}:", task.name.to_uppercase().bold());

    if let Some(description) = &task.description {
        out.push_str(&format!("\n\t{} {}", label("description"), description));
    }

    for phase in [Phase::Dependencies, Phase::Commands, Phase::Cleanup] {
        let commands = task.phase(phase);
        if commands.is_empty() {
            continue;
        }
        let continuation = format!("\n\t{:width$} ", "", width = LABEL_WIDTH);
        out.push_str(&format!(
            "\n\t{} {}",
            label(phase.as_str()),
            commands.join(&continuation)
        ));
    }

    out
}

/// Print task descriptions separated by blank lines
pub fn print_task_descriptions(tasks: &[&Task]) {
    let descriptions: Vec<String> = tasks.iter().map(|t| format_task_description(t)).collect();
    println!("{}", descriptions.join("\n\n"));
}

fn label(name: &str) -> ColoredString {
    format!("{:width$}", format!("{}:", name), width = LABEL_WIDTH).yellow()
}
