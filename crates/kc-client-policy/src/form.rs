//! Editable fields of the policy page and their validation rules.

use crate::error::FormError;
use crate::model::ClientPolicy;

/// Fields bound to the policy form.
///
/// Conditions and profiles are not part of the form; they are edited
/// through their own flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyForm {
    /// Policy name.
    pub name: String,
    /// Policy description.
    pub description: String,
    /// Enabled toggle.
    pub enabled: bool,
}

impl Default for PolicyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            enabled: true,
        }
    }
}

impl PolicyForm {
    /// Creates a form with the given name and defaults elsewhere.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Populates the form from a stored policy.
    #[must_use]
    pub fn from_policy(policy: &ClientPolicy) -> Self {
        Self {
            name: policy.name.clone(),
            description: policy.description.clone(),
            enabled: policy.enabled,
        }
    }

    /// Validates the form against the existing policies.
    ///
    /// `editing` is the name of the policy being edited, if any; it is
    /// allowed to keep its own name.
    ///
    /// ## Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self, existing: &[ClientPolicy], editing: Option<&str>) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }

        let taken = existing
            .iter()
            .any(|p| p.name == self.name && Some(p.name.as_str()) != editing);
        if taken {
            return Err(FormError::NameTaken(self.name.clone()));
        }

        Ok(())
    }

    /// Builds the policy record submitted on save.
    ///
    /// Conditions and profiles are always empty here.
    #[must_use]
    pub fn to_policy(&self) -> ClientPolicy {
        ClientPolicy::new(self.name.clone())
            .with_description(self.description.clone())
            .with_enabled(self.enabled)
    }
}
