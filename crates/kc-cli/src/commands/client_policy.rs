//! Client policy management commands.
//!
//! Each command drives a [`PolicyEditor`] the way the admin console page
//! does: load, edit, confirm, submit the whole collection.

use std::sync::Arc;

use kc_client_policy::{messages, ClientPoliciesApi, ClientPolicy, PolicyEditor};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::ClientPolicyCommand;
use crate::config::OutputFormat;
use crate::output::{confirm, error, info, output, output_single, warning, TerminalNotifier};
use crate::{CliConfig, CliError};

use super::ApiClient;

type Editor<A> = PolicyEditor<A, TerminalNotifier>;

/// Policy summary for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PolicyDisplay {
    /// Policy name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Whether the policy is enabled.
    pub enabled: bool,
    /// Number of conditions.
    #[tabled(rename = "Conditions")]
    pub conditions: usize,
    /// Number of profiles.
    #[tabled(rename = "Profiles")]
    pub profiles: usize,
}

impl From<&ClientPolicy> for PolicyDisplay {
    fn from(policy: &ClientPolicy) -> Self {
        Self {
            name: policy.name.clone(),
            description: policy.description.clone(),
            enabled: policy.enabled,
            conditions: policy.conditions.len(),
            profiles: policy.profiles.len(),
        }
    }
}

/// Profile summary for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ProfileDisplay {
    /// Profile name.
    pub name: String,
    /// Description.
    pub description: String,
    /// `global` or `realm`.
    pub scope: &'static str,
    /// Number of executors.
    #[tabled(rename = "Executors")]
    pub executors: usize,
}

/// Runs a client policy command.
pub async fn run_client_policy(
    cmd: ClientPolicyCommand,
    config: &CliConfig,
    server: Option<&str>,
    realm_arg: Option<&str>,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    let api = Arc::new(ApiClient::new(config, server)?);
    execute(cmd, api, config, realm_arg, output_format).await
}

/// Runs a client policy command against any admin API implementation.
pub async fn execute<A: ClientPoliciesApi>(
    cmd: ClientPolicyCommand,
    api: Arc<A>,
    config: &CliConfig,
    realm_arg: Option<&str>,
    output_format: OutputFormat,
) -> crate::CliResult<()> {
    match cmd {
        ClientPolicyCommand::List { realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            list_policies(api.as_ref(), &realm, output_format).await
        }
        ClientPolicyCommand::Get { name, realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let editor = open_policy(api, &realm, &name).await?;
            output_single(&editor.current(), output_format)
        }
        ClientPolicyCommand::Profiles { realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            list_profiles(api.as_ref(), &realm, output_format).await
        }
        ClientPolicyCommand::Create {
            name,
            realm,
            description,
            disabled,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = PolicyEditor::new(api, Arc::new(TerminalNotifier), realm, None);
            editor.load().await?;
            let form = editor.form_mut();
            form.name = name;
            form.description = description.unwrap_or_default();
            form.enabled = !disabled;
            editor.save().await?;
            Ok(())
        }
        ClientPolicyCommand::Update {
            name,
            realm,
            new_name,
            description,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            if new_name.as_deref().map_or(true, |new_name| new_name == name) {
                warn_cleared(&editor);
            }
            let form = editor.form_mut();
            if let Some(new_name) = new_name {
                form.name = new_name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            editor.save().await?;
            Ok(())
        }
        ClientPolicyCommand::Delete { name, realm, force } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            editor.request_delete_policy();
            finish_confirmation(&mut editor, force).await
        }
        ClientPolicyCommand::Enable { name, realm } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            if editor.form().enabled {
                info(&format!("Client policy '{}' is already enabled", name));
                return Ok(());
            }
            warn_cleared(&editor);
            editor.toggle_enabled(true).await?;
            Ok(())
        }
        ClientPolicyCommand::Disable { name, realm, force } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            if !editor.form().enabled {
                info(&format!("Client policy '{}' is already disabled", name));
                return Ok(());
            }
            warn_cleared(&editor);
            editor.toggle_enabled(false).await?;
            finish_confirmation(&mut editor, force).await
        }
        ClientPolicyCommand::AddProfile {
            name,
            profiles,
            realm,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            check_addable(&editor, &profiles)?;
            editor.add_profiles(&profiles).await?;
            Ok(())
        }
        ClientPolicyCommand::RemoveCondition {
            name,
            index,
            realm,
            force,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            editor.request_delete_condition(Some(index))?;
            finish_confirmation(&mut editor, force).await
        }
        ClientPolicyCommand::RemoveProfile {
            name,
            index,
            realm,
            force,
        } => {
            let realm = get_realm(config, realm.as_deref().or(realm_arg))?;
            let mut editor = open_policy(api, &realm, &name).await?;
            editor.request_delete_profile(Some(index))?;
            finish_confirmation(&mut editor, force).await
        }
    }
}

/// Gets the effective realm.
fn get_realm(config: &CliConfig, realm_arg: Option<&str>) -> crate::CliResult<String> {
    config
        .effective_realm(realm_arg)
        .ok_or_else(|| CliError::InvalidArgument("realm is required".to_string()))
}

/// Loads an editor for an existing policy.
async fn open_policy<A: ClientPoliciesApi>(
    api: Arc<A>,
    realm: &str,
    name: &str,
) -> crate::CliResult<Editor<A>> {
    let mut editor = PolicyEditor::new(api, Arc::new(TerminalNotifier), realm, Some(name.to_string()));
    editor.load().await?;
    if editor.current().is_none() {
        return Err(CliError::not_found("Client policy", name));
    }
    Ok(editor)
}

/// Rejects unknown profiles and profiles already on the policy.
fn check_addable<A: ClientPoliciesApi>(editor: &Editor<A>, profiles: &[String]) -> crate::CliResult<()> {
    for profile in profiles {
        if !editor.all_profiles().iter().any(|p| &p.name == profile) {
            return Err(CliError::not_found("Client profile", profile.clone()));
        }
        if editor.profiles().contains(profile) {
            return Err(CliError::InvalidArgument(format!(
                "profile '{}' is already part of the policy",
                profile
            )));
        }
    }
    Ok(())
}

/// Warns when saving the form will drop the policy's conditions or profiles.
fn warn_cleared<A: ClientPoliciesApi>(editor: &Editor<A>) {
    let conditions = editor.conditions().len();
    let profiles = editor.profiles().len();
    if conditions > 0 || profiles > 0 {
        warning(&format!(
            "Saving clears {} condition(s) and {} profile(s) of '{}'",
            conditions,
            profiles,
            editor.policy_name().unwrap_or_default()
        ));
    }
}

/// Prompts for the open confirmation, then runs or dismisses it.
async fn finish_confirmation<A: ClientPoliciesApi>(
    editor: &mut Editor<A>,
    force: bool,
) -> crate::CliResult<()> {
    let Some(pending) = editor.pending() else {
        return Ok(());
    };

    if !force {
        let mut prompt = messages::text(pending.title_key).to_string();
        if let Some(subject) = &pending.subject {
            prompt = format!("{} ({})", prompt, subject);
        }
        println!("{}", messages::text(pending.message_key));
        if !confirm(&prompt)? {
            editor.dismiss();
            error("Operation cancelled");
            return Ok(());
        }
    }

    editor.confirm().await?;
    Ok(())
}

/// Lists the policies of a realm.
async fn list_policies<A: ClientPoliciesApi>(
    api: &A,
    realm: &str,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let policies = api.list_policies(realm).await?;
    let rows: Vec<PolicyDisplay> = policies.policies.iter().map(PolicyDisplay::from).collect();
    output(&rows, format)
}

/// Lists the global and realm profiles.
async fn list_profiles<A: ClientPoliciesApi>(
    api: &A,
    realm: &str,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let profiles = api.list_profiles(realm, true).await?;
    let rows: Vec<ProfileDisplay> = profiles
        .global_profiles
        .iter()
        .map(|p| (p, "global"))
        .chain(profiles.profiles.iter().map(|p| (p, "realm")))
        .map(|(p, scope)| ProfileDisplay {
            name: p.name.clone(),
            description: p.description.clone(),
            scope,
            executors: p.executors.len(),
        })
        .collect();
    output(&rows, format)
}
