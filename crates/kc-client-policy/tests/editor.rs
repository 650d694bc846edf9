//! Policy editor behaviour against the in-memory admin API.

use std::sync::Arc;

use kc_client_policy::{
    messages, ClientPolicies, ClientPolicy, ClientProfile, ConfirmAction, DeleteRequest,
    EditorMode, InMemoryClientPoliciesApi, PolicyCondition, PolicyEditor, PolicyError,
    RecordingNotifier, Route,
};

const REALM: &str = "test";

type Editor = PolicyEditor<InMemoryClientPoliciesApi, RecordingNotifier>;

/// Test fixture: seeded API, recorder and a loaded editor.
struct Fixture {
    api: Arc<InMemoryClientPoliciesApi>,
    notifier: Arc<RecordingNotifier>,
    editor: Editor,
}

impl Fixture {
    async fn new(policies: Vec<ClientPolicy>, route: Option<&str>) -> Self {
        let api = Arc::new(InMemoryClientPoliciesApi::new());
        api.set_policies(REALM, ClientPolicies::new(policies)).await;
        api.set_global_profiles(vec![
            ClientProfile::new("fapi-1-baseline", "FAPI 1 baseline"),
            ClientProfile::new("fapi-2-security-profile", "FAPI 2"),
        ])
        .await;
        api.set_profiles(REALM, vec![ClientProfile::new("realm-profile", "Local")])
            .await;

        let notifier = Arc::new(RecordingNotifier::new());
        let mut editor = PolicyEditor::new(
            Arc::clone(&api),
            Arc::clone(&notifier),
            REALM,
            route.map(str::to_string),
        );
        editor.load().await.expect("load");

        Self {
            api,
            notifier,
            editor,
        }
    }

    async fn stored(&self) -> Vec<ClientPolicy> {
        self.api.policies(REALM).await.policies
    }

    async fn stored_names(&self) -> Vec<String> {
        self.stored().await.into_iter().map(|p| p.name).collect()
    }
}

fn rich_policy(name: &str) -> ClientPolicy {
    ClientPolicy::new(name)
        .with_description("rich")
        .with_condition(PolicyCondition::new("any-client"))
        .with_condition(
            PolicyCondition::new("client-roles").with_config("roles", serde_json::json!(["admin"])),
        )
        .with_condition(PolicyCondition::new("client-scopes"))
        .with_profile("fapi-1-baseline")
        .with_profile("realm-profile")
}

// ============================================================================
// Load
// ============================================================================

#[tokio::test]
async fn load_without_route_is_create_mode() {
    let fx = Fixture::new(vec![ClientPolicy::new("default")], None).await;

    assert!(!fx.editor.is_loading());
    assert_eq!(fx.editor.mode(), EditorMode::Create);
    assert!(!fx.editor.sections_visible());
    assert!(fx.editor.form().name.is_empty());
    assert!(fx.editor.form().enabled);
}

#[tokio::test]
async fn load_with_route_populates_form() {
    let fx = Fixture::new(vec![ClientPolicy::new("a"), rich_policy("rich")], Some("rich")).await;

    assert_eq!(fx.editor.mode(), EditorMode::Edit);
    assert!(fx.editor.sections_visible());
    assert_eq!(fx.editor.form().name, "rich");
    assert_eq!(fx.editor.form().description, "rich");
    assert_eq!(fx.editor.conditions().len(), 3);
    assert_eq!(fx.editor.profiles(), ["fapi-1-baseline", "realm-profile"]);
    assert_eq!(fx.editor.profile_description("realm-profile"), Some("Local"));
}

#[tokio::test]
async fn load_merges_global_profiles_first() {
    let fx = Fixture::new(vec![], None).await;
    let names: Vec<_> = fx.editor.all_profiles().iter().map(|p| p.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["fapi-1-baseline", "fapi-2-security-profile", "realm-profile"]
    );
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn save_existing_name_replaces_in_place() {
    let mut fx = Fixture::new(
        vec![ClientPolicy::new("default"), ClientPolicy::new("other")],
        Some("default"),
    )
    .await;
    fx.editor.form_mut().description = "d".to_string();

    let route = fx.editor.save().await.unwrap();

    let stored = fx.stored().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0], ClientPolicy::new("default").with_description("d"));
    assert_eq!(route, Route::edit_policy(REALM, "default"));
    assert_eq!(fx.notifier.alert_keys(), vec![messages::UPDATE_SUCCESS]);
}

#[tokio::test]
async fn save_clears_conditions_and_profiles() {
    let mut fx = Fixture::new(vec![rich_policy("rich")], Some("rich")).await;

    fx.editor.save().await.unwrap();

    let stored = fx.stored().await;
    assert!(stored[0].conditions.is_empty());
    assert!(stored[0].profiles.is_empty());
}

#[tokio::test]
async fn save_renamed_policy_drops_old_entry() {
    let mut fx = Fixture::new(
        vec![ClientPolicy::new("a"), ClientPolicy::new("b")],
        Some("a"),
    )
    .await;
    fx.editor.form_mut().name = "renamed".to_string();

    let route = fx.editor.save().await.unwrap();

    assert_eq!(fx.stored_names().await, vec!["b", "renamed"]);
    assert_eq!(route, Route::edit_policy(REALM, "renamed"));
    assert_eq!(fx.editor.policy_name(), Some("renamed"));
}

#[tokio::test]
async fn save_renamed_policy_keeps_conditions_and_profiles() {
    let mut fx = Fixture::new(vec![rich_policy("a"), ClientPolicy::new("b")], Some("a")).await;
    fx.editor.form_mut().name = "renamed".to_string();

    fx.editor.save().await.unwrap();

    let stored = fx.stored().await;
    assert_eq!(stored[1].name, "renamed");
    assert_eq!(stored[1].conditions, rich_policy("a").conditions);
    assert_eq!(stored[1].profiles, vec!["fapi-1-baseline", "realm-profile"]);
    assert_eq!(fx.editor.conditions().len(), 3);
}

#[tokio::test]
async fn save_new_policy_appends_and_reveals_sections() {
    let mut fx = Fixture::new(vec![], None).await;
    fx.editor.form_mut().name = "new".to_string();

    let route = fx.editor.save().await.unwrap();

    assert_eq!(fx.stored_names().await, vec!["new"]);
    assert_eq!(route.path(), "/test/realm-settings/client-policies/new/edit-policy");
    assert_eq!(fx.editor.location(), Some(&route));
    assert!(fx.editor.sections_visible());
    assert_eq!(fx.editor.mode(), EditorMode::Edit);
    assert_eq!(fx.notifier.alert_keys(), vec![messages::CREATE_SUCCESS]);
}

#[tokio::test]
async fn save_duplicate_name_fails_before_request() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("taken")], None).await;
    fx.editor.form_mut().name = "taken".to_string();

    let err = fx.editor.save().await.unwrap_err();

    assert!(err.is_validation());
    assert!(fx.api.updates().await.is_empty());
    assert!(fx.notifier.notifications().is_empty());
}

#[tokio::test]
async fn save_empty_name_fails_before_request() {
    let mut fx = Fixture::new(vec![], None).await;

    assert!(fx.editor.save().await.unwrap_err().is_validation());
    assert!(fx.api.updates().await.is_empty());
}

#[tokio::test]
async fn failed_save_reports_and_keeps_state() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("a")], None).await;
    fx.api.fail_next_update("rejected").await;
    fx.editor.form_mut().name = "b".to_string();

    let err = fx.editor.save().await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(fx.notifier.error_keys(), vec![messages::CREATE_ERROR]);
    assert_eq!(fx.editor.policies().len(), 1);
    assert_eq!(fx.editor.mode(), EditorMode::Create);
    assert_eq!(fx.editor.form().name, "b");

    fx.editor.save().await.unwrap();
    assert_eq!(fx.stored_names().await, vec!["a", "b"]);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_policy_removes_it_and_returns_to_list() {
    let mut fx = Fixture::new(
        vec![ClientPolicy::new("a"), ClientPolicy::new("p"), ClientPolicy::new("c")],
        Some("p"),
    )
    .await;

    fx.editor.request_delete_policy();
    let route = fx.editor.confirm().await.unwrap();

    assert_eq!(fx.stored_names().await, vec!["a", "c"]);
    assert_eq!(route, Route::policies(REALM));
    assert_eq!(fx.notifier.alert_keys(), vec![messages::DELETE_SUCCESS]);
}

#[tokio::test]
async fn delete_condition_removes_exactly_one() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("a"), rich_policy("p")], Some("p")).await;

    fx.editor.request_delete_condition(Some(1)).unwrap();
    let pending = fx.editor.pending().unwrap();
    assert_eq!(pending.subject.as_deref(), Some("client-roles"));

    let route = fx.editor.confirm().await.unwrap();

    let stored = fx.stored().await;
    let kinds: Vec<_> = stored[1].conditions.iter().map(|c| c.condition.as_str()).collect();
    assert_eq!(kinds, vec!["any-client", "client-scopes"]);
    assert_eq!(stored[1].profiles.len(), 2);
    assert_eq!(stored[0], ClientPolicy::new("a"));
    assert_eq!(route, Route::edit_policy(REALM, "p"));
    assert_eq!(fx.editor.conditions().len(), 2);
    assert_eq!(fx.notifier.alert_keys(), vec![messages::DELETE_CONDITION_SUCCESS]);
}

#[tokio::test]
async fn failed_condition_delete_leaves_cache_untouched() {
    let mut fx = Fixture::new(vec![rich_policy("p")], Some("p")).await;
    fx.api.fail_next_update("nope").await;

    fx.editor.request_delete_condition(Some(0)).unwrap();
    assert!(fx.editor.confirm().await.is_err());

    assert_eq!(fx.editor.conditions().len(), 3);
    assert_eq!(fx.editor.current().unwrap().conditions.len(), 3);
    assert_eq!(fx.notifier.error_keys(), vec![messages::DELETE_CONDITION_ERROR]);
}

#[tokio::test]
async fn condition_dialog_with_unknown_index_keeps_policy() {
    let mut fx = Fixture::new(vec![rich_policy("a"), ClientPolicy::new("b")], Some("a")).await;

    let err = fx.editor.request_delete_condition(Some(99)).unwrap_err();
    assert!(matches!(err, PolicyError::NotFound { .. }));
    assert!(fx.editor.pending().is_none());
    assert!(fx.editor.confirm().await.is_err());

    assert_eq!(fx.stored_names().await, vec!["a", "b"]);
    assert!(fx.api.updates().await.is_empty());
}

#[tokio::test]
async fn profile_dialog_with_unknown_index_keeps_policy() {
    let mut fx = Fixture::new(vec![rich_policy("a")], Some("a")).await;

    assert!(fx.editor.request_delete_profile(Some(2)).is_err());
    assert!(fx.editor.pending().is_none());
    assert_eq!(fx.stored().await[0].profiles.len(), 2);
}

#[tokio::test]
async fn delete_profile_by_index() {
    let mut fx = Fixture::new(vec![rich_policy("p")], Some("p")).await;

    fx.editor
        .delete(DeleteRequest::profile(Some(kc_client_policy::PolicyDetail {
            index: 0,
            name: "fapi-1-baseline".to_string(),
        })))
        .await
        .unwrap();

    assert_eq!(fx.stored().await[0].profiles, vec!["realm-profile"]);
    assert_eq!(fx.notifier.alert_keys(), vec![messages::DELETE_PROFILE_SUCCESS]);
}

#[tokio::test]
async fn profile_dialog_without_target_deletes_policy() {
    let mut fx = Fixture::new(vec![rich_policy("p"), ClientPolicy::new("q")], Some("p")).await;

    fx.editor.request_delete_profile(None).unwrap();
    assert_eq!(
        fx.editor.pending().unwrap().action,
        ConfirmAction::Delete(DeleteRequest::Policy)
    );
    let route = fx.editor.confirm().await.unwrap();

    assert_eq!(fx.stored_names().await, vec!["q"]);
    assert_eq!(route, Route::policies(REALM));
}

#[tokio::test]
async fn confirm_without_dialog_is_an_error() {
    let mut fx = Fixture::new(vec![], None).await;
    assert!(matches!(
        fx.editor.confirm().await,
        Err(PolicyError::NoPendingConfirmation)
    ));
}

// ============================================================================
// Profiles
// ============================================================================

#[tokio::test]
async fn add_profiles_appends_at_same_position() {
    let mut fx = Fixture::new(
        vec![
            ClientPolicy::new("first"),
            ClientPolicy::new("p").with_profile("a"),
            ClientPolicy::new("last"),
        ],
        Some("p"),
    )
    .await;

    let route = fx
        .editor
        .add_profiles(&["x".to_string(), "y".to_string()])
        .await
        .unwrap();

    let stored = fx.stored().await;
    assert_eq!(fx.stored_names().await, vec!["first", "p", "last"]);
    assert_eq!(stored[1].profiles, vec!["a", "x", "y"]);
    assert_eq!(route, Some(Route::edit_policy(REALM, "p")));
    assert_eq!(fx.editor.profiles(), ["a", "x", "y"]);
}

#[tokio::test]
async fn add_profiles_without_policy_is_noop() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("a")], None).await;

    let route = fx.editor.add_profiles(&["x".to_string()]).await.unwrap();

    assert!(route.is_none());
    assert!(fx.api.updates().await.is_empty());
}

#[tokio::test]
async fn available_profiles_excludes_used_ones() {
    let fx = Fixture::new(vec![rich_policy("p")], Some("p")).await;
    let names: Vec<_> = fx
        .editor
        .available_profiles()
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();

    assert_eq!(names, vec!["fapi-2-security-profile"]);
}

// ============================================================================
// Enable / disable, reset, cancel
// ============================================================================

#[tokio::test]
async fn disabling_needs_confirmation() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("p")], Some("p")).await;

    let route = fx.editor.toggle_enabled(false).await.unwrap();
    assert!(route.is_none());
    assert!(fx.api.updates().await.is_empty());
    assert_eq!(fx.editor.pending().unwrap().action, ConfirmAction::Disable);

    fx.editor.confirm().await.unwrap();
    assert!(!fx.stored().await[0].enabled);
}

#[tokio::test]
async fn enabling_saves_immediately() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("p").with_enabled(false)], Some("p")).await;

    let route = fx.editor.toggle_enabled(true).await.unwrap();

    assert_eq!(route, Some(Route::edit_policy(REALM, "p")));
    assert!(fx.stored().await[0].enabled);
}

#[tokio::test]
async fn failed_enable_leaves_form_disabled() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("p").with_enabled(false)], Some("p")).await;
    fx.api.fail_next_update("nope").await;

    assert!(fx.editor.toggle_enabled(true).await.is_err());

    assert!(!fx.editor.form().enabled);
    assert!(!fx.stored().await[0].enabled);
}

#[tokio::test]
async fn failed_disable_leaves_form_enabled() {
    let mut fx = Fixture::new(vec![ClientPolicy::new("p")], Some("p")).await;
    fx.api.fail_next_update("nope").await;

    fx.editor.toggle_enabled(false).await.unwrap();
    assert!(fx.editor.confirm().await.is_err());

    assert!(fx.editor.form().enabled);
    assert!(fx.stored().await[0].enabled);
}

#[tokio::test]
async fn reset_restores_name_and_description_only() {
    let mut fx = Fixture::new(vec![rich_policy("p")], Some("p")).await;
    {
        let form = fx.editor.form_mut();
        form.name = "edited".to_string();
        form.description = "edited".to_string();
        form.enabled = false;
    }

    assert!(fx.editor.cancel().is_none());

    assert_eq!(fx.editor.form().name, "p");
    assert_eq!(fx.editor.form().description, "rich");
    assert!(!fx.editor.form().enabled);
}

#[tokio::test]
async fn cancel_in_create_mode_leaves_page() {
    let mut fx = Fixture::new(vec![], None).await;
    assert_eq!(fx.editor.cancel(), Some(Route::policies(REALM)));
}
