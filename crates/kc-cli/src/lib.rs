//! # kc-cli
//!
//! CLI tools for Keycloak client policy administration.
//!
//! This crate provides command-line utilities for:
//! - Listing client policies and client profiles of a realm
//! - Creating, renaming, enabling/disabling and deleting policies
//! - Adding profiles to and removing conditions/profiles from a policy
//! - Managing the CLI configuration file

#![forbid(unsafe_code)]
#![deny(missing_docs)]
// Allow some clippy lints for now - these are stylistic and will be addressed later
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::future_not_send)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
