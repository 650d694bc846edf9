//! HTTP client behaviour against a fake admin API server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kc_cli::{commands::ApiClient, CliConfig};
use kc_client_policy::{
    ClientPoliciesApi, ClientPolicies, ClientPolicy, ClientProfile, ClientProfiles, PolicyEditor,
    PolicyError, RecordingNotifier,
};
use tokio::net::TcpListener;

/// Server-side state of the fake admin API.
#[derive(Default)]
struct FakeRealm {
    policies: ClientPolicies,
    profiles: ClientProfiles,
    reject_updates: bool,
    authorization: Vec<String>,
    include_global: Vec<String>,
}

type Shared = Arc<Mutex<FakeRealm>>;

fn record_auth(state: &Shared, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.lock().unwrap().authorization.push(value.to_string());
    }
}

async fn get_policies(
    State(state): State<Shared>,
    Path(_realm): Path<String>,
    headers: HeaderMap,
) -> Json<ClientPolicies> {
    record_auth(&state, &headers);
    Json(state.lock().unwrap().policies.clone())
}

async fn put_policies(
    State(state): State<Shared>,
    Path(_realm): Path<String>,
    headers: HeaderMap,
    Json(body): Json<ClientPolicies>,
) -> Response {
    record_auth(&state, &headers);
    let mut realm = state.lock().unwrap();
    if realm.reject_updates {
        return (StatusCode::BAD_REQUEST, "duplicated client policy").into_response();
    }
    realm.policies = body;
    StatusCode::NO_CONTENT.into_response()
}

async fn get_profiles(
    State(state): State<Shared>,
    Path(_realm): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<ClientProfiles> {
    let mut realm = state.lock().unwrap();
    if let Some(flag) = params.get("include-global-profiles") {
        realm.include_global.push(flag.clone());
    }
    Json(realm.profiles.clone())
}

/// Starts the fake server and returns its base URL.
async fn spawn_server(state: Shared) -> anyhow::Result<String> {
    let app = Router::new()
        .route(
            "/admin/realms/:realm/client-policies/policies",
            get(get_policies).put(put_policies),
        )
        .route(
            "/admin/realms/:realm/client-policies/profiles",
            get(get_profiles),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("fake server error: {}", e);
        }
    });

    Ok(format!("http://{}/", addr))
}

fn seeded_state() -> Shared {
    let state = FakeRealm {
        policies: ClientPolicies::new(vec![
            ClientPolicy::new("default").with_profile("fapi-1-baseline"),
            ClientPolicy::new("other"),
        ]),
        profiles: ClientProfiles {
            profiles: vec![ClientProfile::new("realm-profile", "Local")],
            global_profiles: vec![ClientProfile::new("fapi-1-baseline", "FAPI 1 baseline")],
        },
        ..FakeRealm::default()
    };
    Arc::new(Mutex::new(state))
}

fn client_for(base_url: &str, token: Option<&str>) -> anyhow::Result<ApiClient> {
    let config = match token {
        Some(token) => CliConfig::parse(&format!(
            "[auth]\nclient_id = \"admin-cli\"\naccess_token = \"{}\"\n",
            token
        ))?,
        None => CliConfig::default(),
    };
    Ok(ApiClient::new(&config, Some(base_url))?)
}

#[tokio::test]
async fn lists_policies_and_profiles() -> anyhow::Result<()> {
    let state = seeded_state();
    let base_url = spawn_server(Arc::clone(&state)).await?;
    let client = client_for(&base_url, None)?;

    let policies = client.list_policies("test").await?;
    let names: Vec<_> = policies.policies.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["default", "other"]);
    assert_eq!(policies.policies[0].profiles, ["fapi-1-baseline"]);

    let profiles = client.list_profiles("test", true).await?;
    assert_eq!(profiles.global_profiles.len(), 1);
    assert_eq!(state.lock().unwrap().include_global, ["true"]);
    Ok(())
}

#[tokio::test]
async fn bearer_token_is_sent() -> anyhow::Result<()> {
    let state = seeded_state();
    let base_url = spawn_server(Arc::clone(&state)).await?;
    let client = client_for(&base_url, Some("secret-token"))?;

    client.list_policies("test").await?;

    assert_eq!(state.lock().unwrap().authorization, ["Bearer secret-token"]);
    Ok(())
}

#[tokio::test]
async fn rejected_update_maps_to_api_error() -> anyhow::Result<()> {
    let state = seeded_state();
    state.lock().unwrap().reject_updates = true;
    let base_url = spawn_server(Arc::clone(&state)).await?;
    let client = client_for(&base_url, None)?;

    let err = client
        .update_policies("test", &ClientPolicies::default())
        .await
        .unwrap_err();

    match err {
        PolicyError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("duplicated"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(state.lock().unwrap().policies.policies.len(), 2);
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_transport_error() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = client_for(&format!("http://{}", addr), None)?;
    let err = client.list_policies("test").await.unwrap_err();

    assert!(matches!(err, PolicyError::Transport(_)));
    Ok(())
}

#[tokio::test]
async fn editor_round_trip_over_http() -> anyhow::Result<()> {
    let state = seeded_state();
    let base_url = spawn_server(Arc::clone(&state)).await?;
    let api = Arc::new(client_for(&base_url, None)?);
    let notifier = Arc::new(RecordingNotifier::new());

    let mut editor = PolicyEditor::new(api, Arc::clone(&notifier), "test", Some("default".to_string()));
    editor.load().await?;
    assert_eq!(editor.all_profiles()[0].name, "fapi-1-baseline");
    assert_eq!(editor.profiles(), ["fapi-1-baseline"]);

    editor.form_mut().description = "updated over http".to_string();
    editor.save().await?;

    let stored = state.lock().unwrap().policies.clone();
    let names: Vec<_> = stored.policies.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["default", "other"]);
    assert_eq!(stored.policies[0].description, "updated over http");
    // the form only carries name, description and enabled
    assert!(stored.policies[0].profiles.is_empty());
    Ok(())
}
