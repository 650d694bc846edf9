//! Message keys used for alerts, errors and dialog labels.
//!
//! Keys match the admin console translation bundle. [`text`] gives the
//! English fallback for front-ends that do not load translations.

/// Policy created.
pub const CREATE_SUCCESS: &str = "createClientPolicySuccess";
/// Policy updated.
pub const UPDATE_SUCCESS: &str = "updateClientPolicySuccess";
/// Create or update failed.
pub const CREATE_ERROR: &str = "createClientPolicyError";
/// Policy deleted.
pub const DELETE_SUCCESS: &str = "deleteClientPolicySuccess";
/// Policy deletion failed.
pub const DELETE_ERROR: &str = "deleteClientPolicyError";
/// Condition deleted.
pub const DELETE_CONDITION_SUCCESS: &str = "deleteConditionSuccess";
/// Condition deletion failed.
pub const DELETE_CONDITION_ERROR: &str = "deleteConditionError";
/// Profile removed from the policy.
pub const DELETE_PROFILE_SUCCESS: &str = "deleteClientPolicyProfileSuccess";
/// Profile removal failed.
pub const DELETE_PROFILE_ERROR: &str = "deleteClientPolicyProfileError";
/// Profiles added to the policy.
pub const ADD_PROFILE_SUCCESS: &str = "addClientProfileSuccess";
/// Adding profiles failed.
pub const ADD_PROFILE_ERROR: &str = "addClientProfileError";
/// Initial fetch failed.
pub const FETCH_ERROR: &str = "fetchClientPoliciesError";

/// Title of the create page.
pub const CREATE_POLICY_TITLE: &str = "createPolicy";
/// Field is required.
pub const REQUIRED: &str = "required";
/// Name already taken.
pub const NAME_TAKEN: &str = "createClientProfileNameHelperText";

/// Delete policy dialog title.
pub const DELETE_POLICY_TITLE: &str = "deleteClientPolicyConfirmTitle";
/// Delete policy dialog body.
pub const DELETE_POLICY_CONFIRM: &str = "deleteClientPolicyConfirm";
/// Delete condition dialog title.
pub const DELETE_CONDITION_TITLE: &str = "deleteClientPolicyConditionConfirmTitle";
/// Delete condition dialog body.
pub const DELETE_CONDITION_CONFIRM: &str = "deleteClientPolicyConditionConfirm";
/// Delete profile dialog title.
pub const DELETE_PROFILE_TITLE: &str = "deleteClientPolicyProfileConfirmTitle";
/// Delete profile dialog body.
pub const DELETE_PROFILE_CONFIRM: &str = "deleteClientPolicyProfileConfirm";
/// Disable policy dialog title.
pub const DISABLE_TITLE: &str = "disablePolicyConfirmTitle";
/// Disable policy dialog body.
pub const DISABLE_CONFIRM: &str = "disablePolicyConfirm";

/// Continue label for delete dialogs.
pub const DELETE_LABEL: &str = "delete";
/// Continue label for the disable dialog.
pub const DISABLE_LABEL: &str = "disable";
/// Cancel button label in edit mode.
pub const RELOAD_LABEL: &str = "reload";
/// Cancel button label in create mode.
pub const CANCEL_LABEL: &str = "cancel";

/// English text for a message key. Unknown keys are returned unchanged.
#[must_use]
pub fn text(key: &str) -> &str {
    match key {
        CREATE_SUCCESS => "New client policy created",
        UPDATE_SUCCESS => "Client policy updated",
        CREATE_ERROR => "Could not create client policy",
        DELETE_SUCCESS => "Client policy deleted",
        DELETE_ERROR => "Could not delete policy",
        DELETE_CONDITION_SUCCESS => "Condition deleted successfully",
        DELETE_CONDITION_ERROR => "Error creating condition",
        DELETE_PROFILE_SUCCESS => "Client profile deleted from the policy",
        DELETE_PROFILE_ERROR => "Could not delete client profile from the policy",
        ADD_PROFILE_SUCCESS => "New client profile added",
        ADD_PROFILE_ERROR => "Could not create client profile",
        FETCH_ERROR => "Could not load client policies",
        CREATE_POLICY_TITLE => "Create policy",
        REQUIRED => "Required field",
        NAME_TAKEN => "The name must be unique within the realm",
        DELETE_POLICY_TITLE => "Delete policy?",
        DELETE_POLICY_CONFIRM => "This action will permanently delete the policy. This cannot be undone.",
        DELETE_CONDITION_TITLE => "Delete condition?",
        DELETE_CONDITION_CONFIRM => "This action will permanently delete the condition. This cannot be undone.",
        DELETE_PROFILE_TITLE => "Delete profile?",
        DELETE_PROFILE_CONFIRM => "This action will permanently delete the profile from the policy. This cannot be undone.",
        DISABLE_TITLE => "Disable policy?",
        DISABLE_CONFIRM => "If you disable this policy, you will not be able to apply the policy to clients.",
        DELETE_LABEL => "Delete",
        DISABLE_LABEL => "Disable",
        RELOAD_LABEL => "Reload",
        CANCEL_LABEL => "Cancel",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_has_text() {
        assert_eq!(text(CREATE_SUCCESS), "New client policy created");
    }

    #[test]
    fn unknown_key_passes_through() {
        assert_eq!(text("somethingElse"), "somethingElse");
    }
}
