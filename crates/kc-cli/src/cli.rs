//! CLI argument parsing.

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// Keycloak CLI - client policy administration.
#[derive(Debug, Parser)]
#[command(name = "kc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config).
    #[arg(short, long, env = "KC_SERVER_URL")]
    pub server: Option<String>,

    /// Default realm (overrides config).
    #[arg(short, long, env = "KC_REALM")]
    pub realm: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Client policy management commands.
    #[command(subcommand, name = "client-policy", alias = "cp")]
    ClientPolicy(ClientPolicyCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Client policy commands.
#[derive(Debug, Subcommand)]
pub enum ClientPolicyCommand {
    /// List the client policies of a realm.
    List {
        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// Show one policy with its conditions and profiles.
    Get {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// List the global and realm client profiles.
    Profiles {
        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// Create a new policy.
    Create {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Description.
        #[arg(long)]
        description: Option<String>,

        /// Create the policy disabled.
        #[arg(long)]
        disabled: bool,
    },

    /// Rename a policy or change its description.
    ///
    /// Without `--new-name` the policy is resubmitted from its name,
    /// description and enabled flag only, so its conditions and profiles
    /// are cleared. A rename keeps them.
    Update {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// New policy name.
        #[arg(long)]
        new_name: Option<String>,

        /// New description.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a policy.
    Delete {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Enable a policy.
    ///
    /// The policy is resubmitted from its name, description and enabled
    /// flag only, so its conditions and profiles are cleared.
    Enable {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// Disable a policy.
    ///
    /// The policy is resubmitted from its name, description and enabled
    /// flag only, so its conditions and profiles are cleared.
    Disable {
        /// Policy name.
        name: String,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Add client profiles to a policy.
    AddProfile {
        /// Policy name.
        name: String,

        /// Profile names.
        #[arg(required = true)]
        profiles: Vec<String>,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,
    },

    /// Remove a condition from a policy.
    RemoveCondition {
        /// Policy name.
        name: String,

        /// Position of the condition, as shown by `get`.
        index: usize,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// Remove a profile from a policy.
    RemoveProfile {
        /// Policy name.
        name: String,

        /// Position of the profile, as shown by `get`.
        index: usize,

        /// Realm name.
        #[arg(long)]
        realm: Option<String>,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}
