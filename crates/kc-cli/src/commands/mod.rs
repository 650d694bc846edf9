//! Command implementations.

pub mod client_policy;
pub mod config;

pub use client_policy::run_client_policy;
pub use config::run_config;

use async_trait::async_trait;
use kc_client_policy::{ClientPoliciesApi, ClientPolicies, ClientProfiles, PolicyResult};

use crate::CliConfig;

/// API client for making requests to the Keycloak server.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a new API client.
    pub fn new(config: &CliConfig, server_override: Option<&str>) -> crate::CliResult<Self> {
        let base_url = server_override
            .map(|s| s.to_string())
            .unwrap_or_else(|| config.server_url.clone());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.access_token().map(str::to_string),
        })
    }

    /// Makes a GET request.
    pub async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> crate::CliResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        handle_response(response).await
    }

    /// Makes a PUT request.
    pub async fn put<B: serde::Serialize>(&self, path: &str, body: &B) -> crate::CliResult<()> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        handle_empty_response(response).await
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "admin request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Path of the client policies resource of a realm.
fn policies_path(realm: &str) -> String {
    format!(
        "/admin/realms/{}/client-policies/policies",
        urlencoding::encode(realm)
    )
}

/// Path of the client profiles resource of a realm.
fn profiles_path(realm: &str, include_global: bool) -> String {
    format!(
        "/admin/realms/{}/client-policies/profiles?include-global-profiles={}",
        urlencoding::encode(realm),
        include_global
    )
}

#[async_trait]
impl ClientPoliciesApi for ApiClient {
    async fn list_policies(&self, realm: &str) -> PolicyResult<ClientPolicies> {
        Ok(self.get(&policies_path(realm)).await?)
    }

    async fn list_profiles(&self, realm: &str, include_global: bool) -> PolicyResult<ClientProfiles> {
        Ok(self.get(&profiles_path(realm, include_global)).await?)
    }

    async fn update_policies(&self, realm: &str, policies: &ClientPolicies) -> PolicyResult<()> {
        Ok(self.put(&policies_path(realm), policies).await?)
    }
}

/// Handles a response with a body.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> crate::CliResult<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(crate::CliError::Http)
    } else {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(crate::CliError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Handles a response without a body.
async fn handle_empty_response(response: reqwest::Response) -> crate::CliResult<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(crate::CliError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
