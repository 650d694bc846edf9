//! Rebuilding the policy collection before it is written back.
//!
//! The admin API only accepts the complete list of policies, so every edit
//! produces a fresh list that keeps all untouched policies, in order.
//! None of these functions mutate their input.

use crate::model::ClientPolicy;

/// Inserts or replaces `policy` in the collection.
///
/// - an entry with the same name is replaced in place;
/// - otherwise, when the policy was renamed from `original_name`, the old
///   entry is dropped and the policy appended with the old entry's
///   conditions and profiles;
/// - otherwise the policy is appended.
#[must_use]
pub fn upsert(
    policies: &[ClientPolicy],
    policy: ClientPolicy,
    original_name: Option<&str>,
) -> Vec<ClientPolicy> {
    if policies.iter().any(|p| p.name == policy.name) {
        return policies
            .iter()
            .map(|p| {
                if p.name == policy.name {
                    policy.clone()
                } else {
                    p.clone()
                }
            })
            .collect();
    }

    if original_name != Some(policy.name.as_str()) {
        let mut policy = policy;
        if let Some(old) = original_name.and_then(|name| policies.iter().find(|p| p.name == name)) {
            policy.conditions = old.conditions.clone();
            policy.profiles = old.profiles.clone();
        }
        let mut updated: Vec<ClientPolicy> = policies
            .iter()
            .filter(|p| Some(p.name.as_str()) != original_name)
            .cloned()
            .collect();
        updated.push(policy);
        return updated;
    }

    let mut updated = policies.to_vec();
    updated.push(policy);
    updated
}

/// Returns the collection without the policy called `name`.
#[must_use]
pub fn remove(policies: &[ClientPolicy], name: &str) -> Vec<ClientPolicy> {
    policies.iter().filter(|p| p.name != name).cloned().collect()
}

/// Position of the policy called `name`.
#[must_use]
pub fn position(policies: &[ClientPolicy], name: &str) -> Option<usize> {
    policies.iter().position(|p| p.name == name)
}

/// Appends profile references to the policy called `name`.
///
/// The updated policy keeps its position. Returns `None` if no policy has
/// that name.
#[must_use]
pub fn add_profiles(
    policies: &[ClientPolicy],
    name: &str,
    profiles: &[String],
) -> Option<Vec<ClientPolicy>> {
    replace_at(policies, name, |policy| {
        policy.profiles.extend(profiles.iter().cloned());
        true
    })
}

/// Removes the condition at `index` from the policy called `name`.
///
/// Returns `None` if the policy is missing or the index is out of range.
#[must_use]
pub fn remove_condition(
    policies: &[ClientPolicy],
    name: &str,
    index: usize,
) -> Option<Vec<ClientPolicy>> {
    replace_at(policies, name, |policy| {
        if index < policy.conditions.len() {
            policy.conditions.remove(index);
            true
        } else {
            false
        }
    })
}

/// Removes the profile reference at `index` from the policy called `name`.
///
/// Returns `None` if the policy is missing or the index is out of range.
#[must_use]
pub fn remove_profile(
    policies: &[ClientPolicy],
    name: &str,
    index: usize,
) -> Option<Vec<ClientPolicy>> {
    replace_at(policies, name, |policy| {
        if index < policy.profiles.len() {
            policy.profiles.remove(index);
            true
        } else {
            false
        }
    })
}

/// Copies the collection, applying `edit` to a clone of the named policy.
fn replace_at<F>(policies: &[ClientPolicy], name: &str, edit: F) -> Option<Vec<ClientPolicy>>
where
    F: FnOnce(&mut ClientPolicy) -> bool,
{
    let index = position(policies, name)?;
    let mut policy = policies[index].clone();
    if !edit(&mut policy) {
        return None;
    }

    let mut updated = Vec::with_capacity(policies.len());
    updated.extend_from_slice(&policies[..index]);
    updated.push(policy);
    updated.extend_from_slice(&policies[index + 1..]);
    Some(updated)
}
