//! Configuration management commands.

use crate::cli::ConfigCommand;
use crate::config::OutputFormat;
use crate::output::{info, success};
use crate::{CliConfig, CliError};

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            apply_setting(config, &key, &value)?;
            config.save()?;
            success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &CliConfig) -> crate::CliResult<()> {
    info(&format!("Configuration file: {}", CliConfig::config_path()?.display()));
    println!();
    println!("server_url: {}", config.server_url);
    println!(
        "default_realm: {}",
        config.default_realm.as_deref().unwrap_or("(none)")
    );
    println!("output_format: {:?}", config.output_format);

    match config.access_token() {
        Some(_) => println!("auth: bearer token configured"),
        None if config.auth.is_some() => println!("auth: configured (no token)"),
        None => {}
    }

    Ok(())
}

/// Parses an output format name.
fn parse_output_format(value: &str) -> Option<OutputFormat> {
    match value.to_lowercase().as_str() {
        "table" => Some(OutputFormat::Table),
        "json" => Some(OutputFormat::Json),
        "yaml" => Some(OutputFormat::Yaml),
        "quiet" => Some(OutputFormat::Quiet),
        _ => None,
    }
}

/// Applies one `key = value` setting without saving.
fn apply_setting(config: &mut CliConfig, key: &str, value: &str) -> crate::CliResult<()> {
    match key {
        "server_url" | "server" => config.server_url = value.to_string(),
        "default_realm" | "realm" => {
            config.default_realm = match value {
                "" | "none" => None,
                realm => Some(realm.to_string()),
            };
        }
        "output_format" | "output" => {
            config.output_format = parse_output_format(value).ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "Unknown output format: {}. Supported: table, json, yaml, quiet",
                    value
                ))
            })?;
        }
        _ => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown configuration key: {}. Known keys: server_url, default_realm, output_format",
                key
            )));
        }
    }
    Ok(())
}

/// Reads one line after showing `label [current]: `.
fn prompt(label: &str, current: &str) -> crate::CliResult<String> {
    print!("{} [{}]: ", label, current);
    std::io::Write::flush(&mut std::io::stdout())?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Initializes configuration interactively.
fn init_config(config: &mut CliConfig) -> crate::CliResult<()> {
    info("Initializing Keycloak CLI configuration...");
    println!();

    let server = prompt("Server URL", &config.server_url)?;
    if !server.is_empty() {
        config.server_url = server;
    }

    let current_realm = config.default_realm.clone().unwrap_or_else(|| "(none)".to_string());
    let realm = prompt("Default realm", &current_realm)?;
    if !realm.is_empty() && realm != "(none)" {
        config.default_realm = Some(realm);
    }

    let current_format = format!("{:?}", config.output_format);
    let format = prompt("Output format (table/json/yaml/quiet)", &current_format)?;
    if let Some(format) = parse_output_format(&format) {
        config.output_format = format;
    }

    config.save()?;

    println!();
    success(&format!(
        "Configuration saved to: {}",
        CliConfig::config_path()?.display()
    ));
    Ok(())
}
