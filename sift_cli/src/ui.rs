use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use sift_client::QueryOutcome;
use sift_core::filter::{CompiledFilter, Operator};
use sift_core::{Attribute, LIST_SEPARATOR};

static PROGRESS: LazyLock<MultiProgress> = LazyLock::new(MultiProgress::new);

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Shared progress area that log output is routed through.
pub fn progress() -> &'static MultiProgress {
    &PROGRESS
}

pub fn header(message: &str) {
    eprintln!("{}", style(message).bold().cyan());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("•").blue(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

pub fn error_with_details(message: &str, details: &str) {
    eprintln!(
        "{} {}: {}",
        style("✗").red().bold(),
        style(message).red(),
        style(details).dim()
    );
}

/// Only shown when the log level lets debug output through.
pub fn debug(message: &str) {
    if log::log_enabled!(log::Level::Debug) {
        eprintln!("{}", style(message).dim());
    }
}

/// Start a spinner in the shared progress area.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = PROGRESS.add(ProgressBar::new_spinner());
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(spinner_style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn json_output<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error_with_details("Failed to serialize output", &e.to_string()),
    }
}

pub fn pretty_output_compiled(compiled: &CompiledFilter) {
    if compiled.is_empty() {
        info("No usable conditions, the query runs without a filter");
        return;
    }
    for line in compiled_lines(compiled) {
        println!("{}", line);
    }
}

/// Raw and encoded text exactly as sent. The readable line only renames
/// list attribute keys and is labelled as such.
fn compiled_lines(compiled: &CompiledFilter) -> Vec<String> {
    let mut lines = vec![
        style("Raw").bold().to_string(),
        format!("  {}", compiled.raw),
    ];

    let readable = readable_list_keys(&compiled.raw);
    if readable != compiled.raw {
        lines.push(style("Readable (list separator shown as '.')").bold().to_string());
        lines.push(format!("  {}", readable));
    }

    lines.push(style("Encoded").bold().to_string());
    lines.push(format!("  {}", compiled.encoded));
    lines
}

pub fn pretty_output_attribute_list(attributes: &[Attribute]) {
    let width = attributes
        .iter()
        .map(|a| display_separator(&a.name).chars().count())
        .max()
        .unwrap_or(0);

    for attribute in attributes {
        let name = display_separator(&attribute.name);
        let origin = if attribute.is_custom { "custom" } else { "" };
        println!(
            "  {:width$}  {:10} {}",
            name,
            attribute.attribute_type.to_string(),
            style(origin).dim(),
            width = width
        );

        if let Some(values) = attribute.enum_values() {
            println!("  {:width$}  {}", "", style(values.join(", ")).dim(), width = width);
        }
        if let Some(schema) = attribute.schema() {
            for (field, field_type) in schema {
                println!("  {:width$}    {}: {}", "", field, field_type, width = width);
            }
        }
    }
}

pub fn pretty_output_operator_list(operators: &[Operator]) {
    if operators.is_empty() {
        info("No operators apply; list attributes are filtered through item conditions");
        return;
    }
    for operator in operators {
        println!("  {:14} {}", operator.code(), style(operator.label()).dim());
    }
}

pub fn pretty_output_outcome(outcome: &QueryOutcome) {
    let status = match (outcome.http_status, &outcome.status_text) {
        (Some(code), Some(text)) => format!("{} {}", code, text),
        (Some(code), None) => code.to_string(),
        (None, _) => "no response".to_string(),
    };

    if outcome.success {
        success(&format!("{} in {} ms", status, outcome.elapsed_ms));
    } else {
        error(&format!("{} in {} ms", status, outcome.elapsed_ms));
    }

    if let Some(failure) = &outcome.failure {
        error(&failure.to_string());
    }

    match &outcome.body {
        Some(body) => match serde_json::to_string_pretty(body) {
            Ok(text) => println!("{}", text),
            Err(_) => println!("{}", body),
        },
        None => info("Empty response body"),
    }
}

/// The reserved list separator is not printable, show it as a dot.
fn display_separator(text: &str) -> String {
    text.replace(LIST_SEPARATOR, ".")
}

/// Rewrite the escaped separator only where it follows a `data` key prefix.
///
/// A user value holding the literal text `\u0001` is escaped as `\\u0001`
/// in the raw JSON and stays untouched.
fn readable_list_keys(raw: &str) -> String {
    raw.replace("\"data\\u0001", "\"data.")
}
