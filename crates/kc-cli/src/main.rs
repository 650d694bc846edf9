//! # Keycloak CLI
//!
//! Command-line tools for Keycloak client policy administration.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use kc_cli::{
    cli::{Cli, Command},
    commands::{run_client_policy, run_config},
    config::CliConfig,
    output::error,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so table/JSON output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    // Load configuration
    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let output = cli.output.unwrap_or(config.output_format);

    // Execute command
    let result = match cli.command {
        Command::ClientPolicy(cmd) => {
            run_client_policy(
                cmd,
                &config,
                cli.server.as_deref(),
                cli.realm.as_deref(),
                output,
            )
            .await
        }
        Command::Config(cmd) => run_config(cmd, &mut config),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        error(&e.to_string());
        std::process::exit(1);
    }
}
