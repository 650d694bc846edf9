//! # kc-client-policy
//!
//! Editing of realm client policies over the Keycloak admin API.
//!
//! A client policy is a named rule made of conditions (which clients it
//! applies to) and profiles (which executors run for them). The admin API
//! stores the policies of a realm as one document, so every change here
//! rebuilds and resubmits the complete collection.
//!
//! ## Modules
//!
//! - [`model`] - policy and profile representations
//! - [`collection`] - rebuilding the collection for each edit
//! - [`form`] - editable fields and validation
//! - [`editor`] - [`PolicyEditor`], the page state machine
//! - [`api`] - [`ClientPoliciesApi`] and an in-memory implementation
//! - [`notify`] - alert sinks
//! - [`routes`] - admin console navigation targets
//! - [`messages`] - message keys

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod api;
pub mod collection;
pub mod editor;
pub mod error;
pub mod form;
pub mod messages;
pub mod model;
pub mod notify;
pub mod routes;

pub use api::{ClientPoliciesApi, InMemoryClientPoliciesApi};
pub use editor::{ConfirmAction, Confirmation, DeleteRequest, EditorMode, PolicyDetail, PolicyEditor};
pub use error::{FormError, PolicyError, PolicyResult};
pub use form::PolicyForm;
pub use model::{ClientPolicies, ClientPolicy, ClientProfile, ClientProfiles, PolicyCondition, ProfileExecutor};
pub use notify::{AlertVariant, Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use routes::Route;
