//! The client policy editor.
//!
//! Holds the state of one policy page: the cached policy collection, the
//! merged profile list, the form, the open confirmation and the last
//! navigation target. Every mutation resubmits the whole collection and
//! only replaces the cache once the server accepted it.
//!
//! ```text
//! Loading ──load()──▶ Ready(create)  ──save()──▶ Ready(edit)
//!                 └─▶ Ready(edit)
//! ```

use std::sync::Arc;

use crate::api::ClientPoliciesApi;
use crate::collection;
use crate::error::{PolicyError, PolicyResult};
use crate::form::PolicyForm;
use crate::messages;
use crate::model::{ClientPolicies, ClientPolicy, ClientProfile, PolicyCondition};
use crate::notify::{AlertVariant, Notifier};
use crate::routes::Route;

/// Whether the page creates a new policy or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No policy yet; conditions and profiles are hidden.
    Create,
    /// A policy exists; conditions and profiles are shown.
    Edit,
}

/// A condition or profile selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDetail {
    /// Position in the policy's list.
    pub index: usize,
    /// Condition type or profile name.
    pub name: String,
}

/// What a delete confirmation removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The whole policy.
    Policy,
    /// One condition of the policy.
    Condition(PolicyDetail),
    /// One profile reference of the policy.
    Profile(PolicyDetail),
}

impl DeleteRequest {
    /// Request raised by the condition dialog.
    ///
    /// Without a selected condition the dialog deletes the whole policy.
    #[must_use]
    pub fn condition(target: Option<PolicyDetail>) -> Self {
        target.map_or(Self::Policy, Self::Condition)
    }

    /// Request raised by the profile dialog.
    ///
    /// Without a selected profile the dialog deletes the whole policy.
    #[must_use]
    pub fn profile(target: Option<PolicyDetail>) -> Self {
        target.map_or(Self::Policy, Self::Profile)
    }
}

/// Action run when a confirmation is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete something.
    Delete(DeleteRequest),
    /// Flip the enabled flag and save.
    Disable,
}

/// An open yes/no dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Dialog title key.
    pub title_key: &'static str,
    /// Dialog body key.
    pub message_key: &'static str,
    /// Label of the continue button.
    pub continue_label: &'static str,
    /// Name interpolated into the body (policy, condition or profile).
    pub subject: Option<String>,
    /// What happens on confirm.
    pub action: ConfirmAction,
}

/// Editor for one client policy of a realm.
pub struct PolicyEditor<A, N>
where
    A: ClientPoliciesApi,
    N: Notifier,
{
    api: Arc<A>,
    notifier: Arc<N>,
    realm: String,
    policy_name: Option<String>,
    policies: Option<Vec<ClientPolicy>>,
    profiles: Vec<ClientProfile>,
    current: Option<ClientPolicy>,
    form: PolicyForm,
    sections_visible: bool,
    pending: Option<Confirmation>,
    location: Option<Route>,
}

impl<A, N> PolicyEditor<A, N>
where
    A: ClientPoliciesApi,
    N: Notifier,
{
    /// Creates an editor for `realm`.
    ///
    /// `policy_name` is the route key; `None` opens the create page.
    pub fn new(
        api: Arc<A>,
        notifier: Arc<N>,
        realm: impl Into<String>,
        policy_name: Option<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            realm: realm.into(),
            policy_name,
            policies: None,
            profiles: Vec::new(),
            current: None,
            form: PolicyForm::default(),
            sections_visible: false,
            pending: None,
            location: None,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Fetches policies and profiles, then selects the routed policy.
    ///
    /// Both requests are issued concurrently.
    ///
    /// ## Errors
    ///
    /// Returns the first failed request; the editor stays loading.
    pub async fn load(&mut self) -> PolicyResult<()> {
        tracing::debug!(realm = %self.realm, policy = ?self.policy_name, "loading client policies");

        let fetched = tokio::try_join!(
            self.api.list_policies(&self.realm),
            self.api.list_profiles(&self.realm, true),
        );
        let (policies, profiles) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => return Err(self.fail(messages::FETCH_ERROR, err)),
        };

        let policies = policies.policies;
        self.profiles = profiles.merged();

        let current = self
            .policy_name
            .as_deref()
            .and_then(|name| policies.iter().find(|p| p.name == name))
            .cloned();
        if let Some(policy) = &current {
            self.form = PolicyForm::from_policy(policy);
            self.sections_visible = true;
        }
        self.current = current;
        self.policies = Some(policies);
        Ok(())
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Validates the form and writes the policy into the collection.
    ///
    /// On success navigates to the policy's edit view and returns it.
    ///
    /// ## Errors
    ///
    /// `PolicyError::Validation` before any request is made, or the API
    /// error if the update was rejected. State is unchanged on error.
    pub async fn save(&mut self) -> PolicyResult<Route> {
        let policies = self.loaded()?;
        self.form.validate(policies, self.policy_name.as_deref())?;

        let updated = collection::upsert(policies, self.form.to_policy(), self.policy_name.as_deref());
        if let Err(err) = self.submit(&updated).await {
            return Err(self.fail(messages::CREATE_ERROR, err));
        }

        let key = if self.policy_name.is_some() {
            messages::UPDATE_SUCCESS
        } else {
            messages::CREATE_SUCCESS
        };
        self.notifier.add_alert(key, AlertVariant::Success);

        let name = self.form.name.clone();
        self.current = updated.iter().find(|p| p.name == name).cloned();
        self.policies = Some(updated);
        self.policy_name = Some(name.clone());
        self.sections_visible = true;
        Ok(self.navigate(Route::edit_policy(&self.realm, name)))
    }

    /// Handles the enabled switch.
    ///
    /// Enabling saves immediately. Disabling opens a confirmation and
    /// returns `None`; [`confirm`](Self::confirm) finishes it.
    ///
    /// ## Errors
    ///
    /// Same as [`save`](Self::save).
    pub async fn toggle_enabled(&mut self, enabled: bool) -> PolicyResult<Option<Route>> {
        if !enabled {
            self.request_disable();
            return Ok(None);
        }
        self.save_enabled(true).await.map(Some)
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Deletes the policy or one of its entries.
    ///
    /// ## Errors
    ///
    /// `PolicyError::NotFound` when the target does not exist, otherwise
    /// the API error. The cache is only replaced after success.
    pub async fn delete(&mut self, request: DeleteRequest) -> PolicyResult<Route> {
        match request {
            DeleteRequest::Policy => self.delete_policy().await,
            DeleteRequest::Condition(detail) => self.delete_condition(detail.index).await,
            DeleteRequest::Profile(detail) => self.delete_profile(detail.index).await,
        }
    }

    async fn delete_policy(&mut self) -> PolicyResult<Route> {
        let name = self.routed_name()?;
        let updated = collection::remove(self.loaded()?, &name);

        if let Err(err) = self.submit(&updated).await {
            return Err(self.fail(messages::DELETE_ERROR, err));
        }

        self.notifier.add_alert(messages::DELETE_SUCCESS, AlertVariant::Success);
        self.policies = Some(updated);
        self.current = None;
        Ok(self.navigate(Route::policies(&self.realm)))
    }

    async fn delete_condition(&mut self, index: usize) -> PolicyResult<Route> {
        let name = self.routed_name()?;
        let updated = collection::remove_condition(self.loaded()?, &name, index)
            .ok_or_else(|| PolicyError::not_found("Condition", index.to_string()))?;

        if let Err(err) = self.submit(&updated).await {
            return Err(self.fail(messages::DELETE_CONDITION_ERROR, err));
        }

        self.notifier
            .add_alert(messages::DELETE_CONDITION_SUCCESS, AlertVariant::Success);
        Ok(self.commit(updated, name))
    }

    async fn delete_profile(&mut self, index: usize) -> PolicyResult<Route> {
        let name = self.routed_name()?;
        let updated = collection::remove_profile(self.loaded()?, &name, index)
            .ok_or_else(|| PolicyError::not_found("Client profile", index.to_string()))?;

        if let Err(err) = self.submit(&updated).await {
            return Err(self.fail(messages::DELETE_PROFILE_ERROR, err));
        }

        self.notifier
            .add_alert(messages::DELETE_PROFILE_SUCCESS, AlertVariant::Success);
        Ok(self.commit(updated, name))
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Appends profile references to the current policy.
    ///
    /// Returns `Ok(None)` without submitting when the current policy is not
    /// in the collection.
    ///
    /// ## Errors
    ///
    /// The API error if the update was rejected.
    pub async fn add_profiles(&mut self, profiles: &[String]) -> PolicyResult<Option<Route>> {
        let Some(name) = self.current.as_ref().map(|p| p.name.clone()) else {
            return Ok(None);
        };
        let Some(updated) = collection::add_profiles(self.loaded()?, &name, profiles) else {
            tracing::debug!(realm = %self.realm, policy = %name, "policy not in collection, profiles not added");
            return Ok(None);
        };

        if let Err(err) = self.submit(&updated).await {
            return Err(self.fail(messages::ADD_PROFILE_ERROR, err));
        }

        let route = self.commit(updated, name);
        self.notifier
            .add_alert(messages::ADD_PROFILE_SUCCESS, AlertVariant::Success);
        Ok(Some(route))
    }

    /// Profiles that are not yet referenced by the policy.
    #[must_use]
    pub fn available_profiles(&self) -> Vec<&ClientProfile> {
        let used = self.profiles();
        self.profiles
            .iter()
            .filter(|p| !used.contains(&p.name))
            .collect()
    }

    // ========================================================================
    // Confirmations
    // ========================================================================

    /// Opens the delete policy dialog.
    pub fn request_delete_policy(&mut self) {
        self.pending = Some(Confirmation {
            title_key: messages::DELETE_POLICY_TITLE,
            message_key: messages::DELETE_POLICY_CONFIRM,
            continue_label: messages::DELETE_LABEL,
            subject: self.policy_name.clone(),
            action: ConfirmAction::Delete(DeleteRequest::Policy),
        });
    }

    /// Opens the delete condition dialog for the condition at `index`.
    ///
    /// With no index, confirming deletes the whole policy.
    ///
    /// ## Errors
    ///
    /// `PolicyError::NotFound` when `index` matches no condition; no dialog
    /// is opened.
    pub fn request_delete_condition(&mut self, index: Option<usize>) -> PolicyResult<()> {
        let target = match index {
            Some(index) => {
                let condition = self
                    .conditions()
                    .get(index)
                    .ok_or_else(|| PolicyError::not_found("Condition", index.to_string()))?;
                Some(PolicyDetail {
                    index,
                    name: condition.condition.clone(),
                })
            }
            None => None,
        };
        self.pending = Some(Confirmation {
            title_key: messages::DELETE_CONDITION_TITLE,
            message_key: messages::DELETE_CONDITION_CONFIRM,
            continue_label: messages::DELETE_LABEL,
            subject: target.as_ref().map(|t| t.name.clone()),
            action: ConfirmAction::Delete(DeleteRequest::condition(target)),
        });
        Ok(())
    }

    /// Opens the delete profile dialog for the profile at `index`.
    ///
    /// With no index, confirming deletes the whole policy.
    ///
    /// ## Errors
    ///
    /// `PolicyError::NotFound` when `index` matches no profile.
    pub fn request_delete_profile(&mut self, index: Option<usize>) -> PolicyResult<()> {
        let target = match index {
            Some(index) => {
                let name = self
                    .profiles()
                    .get(index)
                    .ok_or_else(|| PolicyError::not_found("Client profile", index.to_string()))?;
                Some(PolicyDetail {
                    index,
                    name: name.clone(),
                })
            }
            None => None,
        };
        self.pending = Some(Confirmation {
            title_key: messages::DELETE_PROFILE_TITLE,
            message_key: messages::DELETE_PROFILE_CONFIRM,
            continue_label: messages::DELETE_LABEL,
            subject: target.as_ref().map(|t| t.name.clone()),
            action: ConfirmAction::Delete(DeleteRequest::profile(target)),
        });
        Ok(())
    }

    /// Opens the disable policy dialog.
    pub fn request_disable(&mut self) {
        self.pending = Some(Confirmation {
            title_key: messages::DISABLE_TITLE,
            message_key: messages::DISABLE_CONFIRM,
            continue_label: messages::DISABLE_LABEL,
            subject: self.policy_name.clone(),
            action: ConfirmAction::Disable,
        });
    }

    /// The open dialog, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    /// Closes the open dialog without acting.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Accepts the open dialog and runs its action.
    ///
    /// ## Errors
    ///
    /// `PolicyError::NoPendingConfirmation` if no dialog is open, otherwise
    /// the error of the action.
    pub async fn confirm(&mut self) -> PolicyResult<Route> {
        let confirmation = self.pending.take().ok_or(PolicyError::NoPendingConfirmation)?;
        match confirmation.action {
            ConfirmAction::Delete(request) => self.delete(request).await,
            ConfirmAction::Disable => {
                let enabled = !self.form.enabled;
                self.save_enabled(enabled).await
            }
        }
    }

    // ========================================================================
    // Form
    // ========================================================================

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &PolicyForm {
        &self.form
    }

    /// Mutable access to the form fields.
    pub fn form_mut(&mut self) -> &mut PolicyForm {
        &mut self.form
    }

    /// Restores name and description from the last loaded policy.
    pub fn reset(&mut self) {
        if let Some(policy) = &self.current {
            self.form.name = policy.name.clone();
            self.form.description = policy.description.clone();
        }
    }

    /// The cancel button: reloads in edit mode, leaves in create mode.
    pub fn cancel(&mut self) -> Option<Route> {
        match self.mode() {
            EditorMode::Edit => {
                self.reset();
                None
            }
            EditorMode::Create => Some(self.navigate(Route::policies(&self.realm))),
        }
    }

    /// Label of the cancel button.
    #[must_use]
    pub fn cancel_label(&self) -> &'static str {
        if self.sections_visible {
            messages::RELOAD_LABEL
        } else {
            messages::CANCEL_LABEL
        }
    }

    // ========================================================================
    // View state
    // ========================================================================

    /// Whether the initial fetch has not completed.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.policies.is_none()
    }

    /// Create or edit mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        if self.sections_visible || self.policy_name.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Create
        }
    }

    /// Whether the conditions and profiles sections are shown.
    #[must_use]
    pub const fn sections_visible(&self) -> bool {
        self.sections_visible
    }

    /// Page title: the policy name, or the create title key.
    #[must_use]
    pub fn title(&self) -> &str {
        match (self.mode(), self.policy_name.as_deref()) {
            (EditorMode::Edit, Some(name)) => name,
            _ => messages::CREATE_POLICY_TITLE,
        }
    }

    /// Realm being edited.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Route key of the policy, once it exists.
    #[must_use]
    pub fn policy_name(&self) -> Option<&str> {
        self.policy_name.as_deref()
    }

    /// Cached policy collection.
    #[must_use]
    pub fn policies(&self) -> &[ClientPolicy] {
        self.policies.as_deref().unwrap_or_default()
    }

    /// The loaded policy, if the route matched one.
    #[must_use]
    pub const fn current(&self) -> Option<&ClientPolicy> {
        self.current.as_ref()
    }

    /// Global and realm profiles.
    #[must_use]
    pub fn all_profiles(&self) -> &[ClientProfile] {
        &self.profiles
    }

    /// Conditions of the routed policy.
    #[must_use]
    pub fn conditions(&self) -> &[PolicyCondition] {
        self.routed_policy()
            .map(|p| p.conditions.as_slice())
            .unwrap_or_default()
    }

    /// Profile names of the routed policy.
    #[must_use]
    pub fn profiles(&self) -> &[String] {
        self.routed_policy()
            .map(|p| p.profiles.as_slice())
            .unwrap_or_default()
    }

    /// Description of a profile, for the help text next to it.
    #[must_use]
    pub fn profile_description(&self, name: &str) -> Option<&str> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.description.as_str())
    }

    /// Link to the condition editor; only configured conditions have one.
    #[must_use]
    pub fn condition_route(&self, index: usize) -> Option<Route> {
        let policy_name = self.policy_name.clone()?;
        let condition = self.conditions().get(index)?;
        condition
            .is_configured()
            .then(|| Route::EditClientPolicyCondition {
                realm: self.realm.clone(),
                policy_name,
                condition_name: condition.condition.clone(),
            })
    }

    /// Link to the new condition form.
    #[must_use]
    pub fn add_condition_route(&self) -> Option<Route> {
        self.policy_name
            .as_ref()
            .map(|policy_name| Route::NewClientPolicyCondition {
                realm: self.realm.clone(),
                policy_name: policy_name.clone(),
            })
    }

    /// Link to a profile's edit view.
    #[must_use]
    pub fn profile_route(&self, profile_name: &str) -> Route {
        Route::ClientProfile {
            realm: self.realm.clone(),
            profile_name: profile_name.to_string(),
        }
    }

    /// Last navigation target.
    #[must_use]
    pub const fn location(&self) -> Option<&Route> {
        self.location.as_ref()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn loaded(&self) -> PolicyResult<&[ClientPolicy]> {
        self.policies.as_deref().ok_or(PolicyError::NotLoaded)
    }

    fn routed_name(&self) -> PolicyResult<String> {
        self.policy_name
            .clone()
            .ok_or_else(|| PolicyError::not_found("Client policy", ""))
    }

    fn routed_policy(&self) -> Option<&ClientPolicy> {
        let name = self.policy_name.as_deref()?;
        self.policies().iter().find(|p| p.name == name)
    }

    async fn submit(&self, policies: &[ClientPolicy]) -> PolicyResult<()> {
        tracing::debug!(
            realm = %self.realm,
            policies = policies.len(),
            "submitting client policies"
        );
        self.api
            .update_policies(&self.realm, &ClientPolicies::new(policies.to_vec()))
            .await
    }

    /// Replaces the cache with an accepted collection and returns to the
    /// policy's edit view.
    /// Saves with `enabled` set, restoring the previous value on failure.
    async fn save_enabled(&mut self, enabled: bool) -> PolicyResult<Route> {
        let previous = std::mem::replace(&mut self.form.enabled, enabled);
        let result = self.save().await;
        if result.is_err() {
            self.form.enabled = previous;
        }
        result
    }

    fn commit(&mut self, updated: Vec<ClientPolicy>, name: String) -> Route {
        self.current = updated.iter().find(|p| p.name == name).cloned();
        self.policies = Some(updated);
        self.navigate(Route::edit_policy(&self.realm, name))
    }

    fn navigate(&mut self, route: Route) -> Route {
        tracing::debug!(path = %route, "navigate");
        self.location = Some(route.clone());
        route
    }

    fn fail(&self, key: &str, err: PolicyError) -> PolicyError {
        tracing::warn!(realm = %self.realm, key, error = %err, "client policy request failed");
        self.notifier.add_error(key, &err);
        err
    }
}
