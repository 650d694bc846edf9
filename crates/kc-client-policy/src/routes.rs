//! Admin console navigation targets.

use std::fmt;

/// Tab of the client policies page that lists policies.
pub const POLICIES_TAB: &str = "policies";

/// A navigation target, keyed by realm and entity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Client policies overview, on the given tab.
    ClientPolicies {
        /// Realm name.
        realm: String,
        /// Tab (`profiles` or `policies`).
        tab: String,
    },
    /// Edit view of a policy.
    EditClientPolicy {
        /// Realm name.
        realm: String,
        /// Policy name.
        policy_name: String,
    },
    /// New condition form for a policy.
    NewClientPolicyCondition {
        /// Realm name.
        realm: String,
        /// Policy name.
        policy_name: String,
    },
    /// Edit view of a condition.
    EditClientPolicyCondition {
        /// Realm name.
        realm: String,
        /// Policy name.
        policy_name: String,
        /// Condition type.
        condition_name: String,
    },
    /// Edit view of a client profile.
    ClientProfile {
        /// Realm name.
        realm: String,
        /// Profile name.
        profile_name: String,
    },
}

impl Route {
    /// Policy list of a realm.
    #[must_use]
    pub fn policies(realm: impl Into<String>) -> Self {
        Self::ClientPolicies {
            realm: realm.into(),
            tab: POLICIES_TAB.to_string(),
        }
    }

    /// Edit view of a policy.
    #[must_use]
    pub fn edit_policy(realm: impl Into<String>, policy_name: impl Into<String>) -> Self {
        Self::EditClientPolicy {
            realm: realm.into(),
            policy_name: policy_name.into(),
        }
    }

    /// Console path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ClientPolicies { realm, tab } => {
                format!("{}/{}", base(realm), enc(tab))
            }
            Self::EditClientPolicy { realm, policy_name } => {
                format!("{}/{}/edit-policy", base(realm), enc(policy_name))
            }
            Self::NewClientPolicyCondition { realm, policy_name } => format!(
                "{}/{}/edit-policy/create-condition",
                base(realm),
                enc(policy_name)
            ),
            Self::EditClientPolicyCondition {
                realm,
                policy_name,
                condition_name,
            } => format!(
                "{}/{}/edit-policy/{}/edit-condition",
                base(realm),
                enc(policy_name),
                enc(condition_name)
            ),
            Self::ClientProfile {
                realm,
                profile_name,
            } => format!("{}/{}/edit-profile", base(realm), enc(profile_name)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn base(realm: &str) -> String {
    format!("/{}/realm-settings/client-policies", enc(realm))
}

fn enc(segment: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(segment)
}
