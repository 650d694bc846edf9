//! Output formatting utilities.

use colored::Colorize;
use kc_client_policy::{messages, AlertVariant, Notifier, PolicyError};
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Notifier that prints editor alerts to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn add_alert(&self, message: &str, variant: AlertVariant) {
        let text = messages::text(message);
        match variant {
            AlertVariant::Success => success(text),
            AlertVariant::Info => info(text),
            AlertVariant::Warning => warning(text),
            AlertVariant::Danger => error(text),
        }
    }

    fn add_error(&self, key: &str, err: &PolicyError) {
        tracing::debug!(key, error = %err, "client policy error");
        error(messages::text(key));
    }
}

/// Outputs data in the specified format.
pub fn output<T: Tabled + serde::Serialize>(
    data: &[T],
    format: OutputFormat,
) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                let table = Table::new(data).with(Style::rounded()).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => {
            for item in data {
                print!("{}", render_yaml(&serde_json::to_value(item)?, 0));
                println!();
            }
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs a single item.
pub fn output_single<T: serde::Serialize>(item: &T, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            print!("{}", render_yaml(&serde_json::to_value(item)?, 0));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Renders a JSON value as YAML-like text.
fn render_yaml(value: &serde_json::Value, indent: usize) -> String {
    use serde_json::Value;

    let prefix = "  ".repeat(indent);
    match value {
        Value::Array(items) if items.is_empty() => format!("{prefix}[]\n"),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(_) | Value::Array(_) => {
                    format!("{prefix}-\n{}", render_yaml(item, indent + 1))
                }
                scalar => format!("{prefix}- {}\n", scalar_text(scalar)),
            })
            .collect(),
        Value::Object(map) if map.is_empty() => format!("{prefix}{{}}\n"),
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| match val {
                Value::Object(_) | Value::Array(_) => {
                    format!("{prefix}{key}:\n{}", render_yaml(val, indent + 1))
                }
                scalar => format!("{prefix}{key}: {}\n", scalar_text(scalar)),
            })
            .collect(),
        scalar => format!("{prefix}{}\n", scalar_text(scalar)),
    }
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prompts for confirmation.
pub fn confirm(message: &str) -> crate::CliResult<bool> {
    print!("{message} [y/N]: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}
