pub mod api;
pub mod client_trait;
pub mod config;
pub mod error;

pub use api::client::BackendClient;
pub use api::models::{
    CreatedWorkspace, FileEntry, HealthStatus, PromptHealth, PromptRequest, PromptResult,
    WorkspaceSummary,
};
pub use client_trait::BackendClientTrait;
pub use config::Config;
pub use error::{ApiError, Result};
