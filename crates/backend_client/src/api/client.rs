use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::models::{
    CreatedWorkspace, FileEntry, FileListing, HealthStatus, PromptHealth, PromptRequest,
    PromptResult, WorkspaceSummary,
};
use crate::client_trait::BackendClientTrait;
use crate::config::Config;
use crate::error::{ApiError, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the file-operation backend.
///
/// Holds nothing beyond the configured base URL and the connection pool:
/// no retries, no caching, exactly one request per operation. Every request
/// carries a deadline so a hung backend resolves as a transport failure.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(timeout)
            .build()
            .expect("backend http client");
        BackendClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(
            config.base_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/json".parse().unwrap());
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// Non-2xx responses are wrapped with their raw body text; 2xx bodies
    /// that fail schema validation fail closed instead of being coerced.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("backend returned {status}: {body}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl BackendClientTrait for BackendClient {
    async fn check_health(&self) -> Result<HealthStatus> {
        self.get_json("/health").await
    }

    async fn check_prompt_health(&self) -> Result<PromptHealth> {
        self.get_json("/prompt/health").await
    }

    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>> {
        self.get_json("/workspace/").await
    }

    async fn create_workspace(&self, name: &str) -> Result<CreatedWorkspace> {
        self.post_json("/workspace/create", &serde_json::json!({ "name": name }))
            .await
    }

    async fn get_workspace(&self, workspace_id: &str) -> Result<WorkspaceSummary> {
        self.get_json(&format!("/workspace/{workspace_id}")).await
    }

    async fn process_prompt(&self, request: &PromptRequest) -> Result<PromptResult> {
        self.post_json("/prompt/process", request).await
    }

    async fn list_files(&self, workspace_id: &str) -> Result<Vec<FileEntry>> {
        let listing: FileListing = self
            .get_json(&format!("/operations/list/{workspace_id}"))
            .await?;
        Ok(listing.files)
    }
}
