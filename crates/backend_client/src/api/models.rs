//! Wire types for the file-operation backend

use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of a workspace as reported by the backend.
///
/// Never mutated locally; refreshes replace the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub id: String,
    pub name: String,
    /// Naive ISO-8601 timestamp string as produced by the backend.
    pub created_at: String,
    pub file_count: u64,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

/// A natural-language prompt bound to a workspace. Built fresh per
/// submission, not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    pub workspace_id: String,
    pub prompt: String,
}

/// Outcome of a processed prompt.
///
/// `success == false` means the backend understood the request but the
/// requested file operations failed; that is a normal value, not a client
/// error, and must never be raised as one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PromptResult {
    pub success: bool,
    #[serde(default)]
    pub operations: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub success_message: String,
}

/// Response of `POST /workspace/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedWorkspace {
    pub workspace_id: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Response of `GET /prompt/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptHealth {
    pub status: String,
    pub llm_available: bool,
    pub method: String,
}

/// A single entry in a workspace file listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    /// Directories are reported with a null size.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub size: u64,
    pub is_directory: bool,
}

/// Envelope around `GET /operations/list/{workspace_id}`; the client
/// unwraps it and hands out the entries directly.
#[derive(Debug, Deserialize)]
pub(crate) struct FileListing {
    pub files: Vec<FileEntry>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_summary_maps_size_field() {
        let json = r#"{
            "id": "ws-1",
            "name": "demo",
            "created_at": "2025-01-01T12:00:00",
            "file_count": 3,
            "size": 2048
        }"#;
        let summary: WorkspaceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.size_bytes, 2048);
        assert_eq!(summary.file_count, 3);
    }

    #[test]
    fn prompt_result_defaults_optional_fields() {
        let result: PromptResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(result.success);
        assert!(result.operations.is_empty());
        assert!(result.errors.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.method, "");
    }

    #[test]
    fn prompt_result_requires_success_field() {
        let result = serde_json::from_str::<PromptResult>(r#"{"operations": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn file_entry_accepts_null_size_for_directories() {
        let json = r#"{"name": "src", "path": "src", "size": null, "is_directory": true}"#;
        let entry: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.size, 0);
        assert!(entry.is_directory);
    }
}
