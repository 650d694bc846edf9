//! Admin API contract for client policies.
//!
//! The editor talks to the server only through [`ClientPoliciesApi`]. The
//! HTTP implementation lives in `kc-cli`; [`InMemoryClientPoliciesApi`] is
//! used by tests and local demos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{PolicyError, PolicyResult};
use crate::model::{ClientPolicies, ClientProfile, ClientProfiles};

/// Client policy endpoints of the admin API.
///
/// Implementations must be thread-safe.
#[async_trait]
pub trait ClientPoliciesApi: Send + Sync {
    /// Fetches every policy of the realm.
    async fn list_policies(&self, realm: &str) -> PolicyResult<ClientPolicies>;

    /// Fetches the realm profiles, and the global ones when asked.
    async fn list_profiles(&self, realm: &str, include_global: bool) -> PolicyResult<ClientProfiles>;

    /// Replaces the whole policy collection of the realm.
    ///
    /// ## Errors
    ///
    /// Returns `PolicyError::Api` when the server rejects the collection.
    async fn update_policies(&self, realm: &str, policies: &ClientPolicies) -> PolicyResult<()>;
}

// ============================================================================
// In-Memory API (for testing)
// ============================================================================

#[derive(Debug, Default)]
struct RealmPolicies {
    policies: ClientPolicies,
    profiles: Vec<ClientProfile>,
}

#[derive(Debug, Default)]
struct Inner {
    realms: HashMap<String, RealmPolicies>,
    global_profiles: Vec<ClientProfile>,
    fail_next_update: Option<String>,
    updates: Vec<ClientPolicies>,
}

/// In-memory admin API.
///
/// Updates replace the stored collection, like the server does. Rejects
/// collections with duplicate policy names.
#[derive(Debug, Default)]
pub struct InMemoryClientPoliciesApi {
    inner: Mutex<Inner>,
}

impl InMemoryClientPoliciesApi {
    /// Creates an empty API.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the policies of a realm.
    pub async fn set_policies(&self, realm: &str, policies: ClientPolicies) {
        let mut inner = self.inner.lock().await;
        inner.realms.entry(realm.to_string()).or_default().policies = policies;
    }

    /// Seeds the profiles defined in a realm.
    pub async fn set_profiles(&self, realm: &str, profiles: Vec<ClientProfile>) {
        let mut inner = self.inner.lock().await;
        inner.realms.entry(realm.to_string()).or_default().profiles = profiles;
    }

    /// Seeds the global profiles.
    pub async fn set_global_profiles(&self, profiles: Vec<ClientProfile>) {
        self.inner.lock().await.global_profiles = profiles;
    }

    /// Makes the next update fail with a 400 carrying `message`.
    pub async fn fail_next_update(&self, message: impl Into<String>) {
        self.inner.lock().await.fail_next_update = Some(message.into());
    }

    /// Current policies of a realm.
    pub async fn policies(&self, realm: &str) -> ClientPolicies {
        self.inner
            .lock()
            .await
            .realms
            .get(realm)
            .map(|r| r.policies.clone())
            .unwrap_or_default()
    }

    /// Every collection accepted by `update_policies`, oldest first.
    pub async fn updates(&self) -> Vec<ClientPolicies> {
        self.inner.lock().await.updates.clone()
    }
}

#[async_trait]
impl ClientPoliciesApi for InMemoryClientPoliciesApi {
    async fn list_policies(&self, realm: &str) -> PolicyResult<ClientPolicies> {
        Ok(self.policies(realm).await)
    }

    async fn list_profiles(&self, realm: &str, include_global: bool) -> PolicyResult<ClientProfiles> {
        let inner = self.inner.lock().await;
        let profiles = inner
            .realms
            .get(realm)
            .map(|r| r.profiles.clone())
            .unwrap_or_default();
        let global_profiles = if include_global {
            inner.global_profiles.clone()
        } else {
            Vec::new()
        };
        Ok(ClientProfiles {
            profiles,
            global_profiles,
        })
    }

    async fn update_policies(&self, realm: &str, policies: &ClientPolicies) -> PolicyResult<()> {
        let mut inner = self.inner.lock().await;

        if let Some(message) = inner.fail_next_update.take() {
            return Err(PolicyError::Api {
                status: 400,
                message,
            });
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = policies.policies.iter().find(|p| !seen.insert(p.name.as_str())) {
            return Err(PolicyError::Api {
                status: 400,
                message: format!("duplicated client policy name: {}", dup.name),
            });
        }

        inner.realms.entry(realm.to_string()).or_default().policies = policies.clone();
        inner.updates.push(policies.clone());
        Ok(())
    }
}
