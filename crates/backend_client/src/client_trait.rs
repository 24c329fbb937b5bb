use async_trait::async_trait;

use crate::api::models::{
    CreatedWorkspace, FileEntry, HealthStatus, PromptHealth, PromptRequest, PromptResult,
    WorkspaceSummary,
};
use crate::error::Result;

/// Seam between the state controller and the HTTP client.
///
/// The controller is generic over this trait so its logic can be tested
/// against scripted stubs without a running backend.
#[async_trait]
pub trait BackendClientTrait: Send + Sync {
    async fn check_health(&self) -> Result<HealthStatus>;

    async fn check_prompt_health(&self) -> Result<PromptHealth>;

    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>>;

    /// Callers are responsible for trimming and rejecting blank names; the
    /// client sends whatever it is given.
    async fn create_workspace(&self, name: &str) -> Result<CreatedWorkspace>;

    async fn get_workspace(&self, workspace_id: &str) -> Result<WorkspaceSummary>;

    async fn process_prompt(&self, request: &PromptRequest) -> Result<PromptResult>;

    async fn list_files(&self, workspace_id: &str) -> Result<Vec<FileEntry>>;
}
