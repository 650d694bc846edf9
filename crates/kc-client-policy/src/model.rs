//! Client policy and client profile representations.
//!
//! These mirror the JSON documents exchanged with the
//! `/admin/realms/{realm}/client-policies` endpoints. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A condition attached to a client policy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCondition {
    /// Condition provider type (e.g. `client-roles`, `any-client`).
    pub condition: String,
    /// Provider-specific configuration.
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

impl PolicyCondition {
    /// Creates a condition with empty configuration.
    #[must_use]
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            configuration: Map::new(),
        }
    }

    /// Adds a configuration entry.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.configuration.insert(key.into(), value);
        self
    }

    /// Whether the condition carries any configuration.
    ///
    /// Only configured conditions get a link to the condition editor.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.configuration.is_empty()
    }
}

/// A named client policy.
///
/// Identity is the `name`; it is unique among the policies of a realm.
/// Profiles are referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicy {
    /// Unique policy name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the policy is enforced.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Conditions that select the clients the policy applies to.
    #[serde(default)]
    pub conditions: Vec<PolicyCondition>,
    /// Names of the profiles applied when the conditions match.
    #[serde(default)]
    pub profiles: Vec<String>,
}

const fn default_true() -> bool {
    true
}

impl ClientPolicy {
    /// Creates an enabled policy with no conditions and no profiles.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            enabled: true,
            conditions: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Appends a condition.
    #[must_use]
    pub fn with_condition(mut self, condition: PolicyCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Appends a profile reference.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.push(profile.into());
        self
    }
}

/// The full policy collection of a realm.
///
/// There is no partial update endpoint: this document is always read and
/// written as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicies {
    /// Every policy defined in the realm.
    #[serde(default)]
    pub policies: Vec<ClientPolicy>,
}

impl ClientPolicies {
    /// Wraps a policy list.
    #[must_use]
    pub const fn new(policies: Vec<ClientPolicy>) -> Self {
        Self { policies }
    }
}

/// An executor entry of a client profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileExecutor {
    /// Executor provider type.
    pub executor: String,
    /// Provider-specific configuration.
    #[serde(default)]
    pub configuration: Map<String, Value>,
}

/// A client profile, referenced by name from policies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    /// Unique profile name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Executors run by this profile.
    #[serde(default)]
    pub executors: Vec<ProfileExecutor>,
}

impl ClientProfile {
    /// Creates a profile without executors.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            executors: Vec::new(),
        }
    }
}

/// Realm and global client profiles as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfiles {
    /// Profiles defined in the realm.
    #[serde(default)]
    pub profiles: Vec<ClientProfile>,
    /// Built-in profiles shared by every realm.
    #[serde(default)]
    pub global_profiles: Vec<ClientProfile>,
}

impl ClientProfiles {
    /// Global profiles first, then realm profiles.
    #[must_use]
    pub fn merged(self) -> Vec<ClientProfile> {
        let mut all = self.global_profiles;
        all.extend(self.profiles);
        all
    }
}
