//! UI state owned by the console controller

use backend_client::{PromptResult, WorkspaceSummary};

/// Transient state of the prompt modal.
///
/// Everything here is cleared when the modal closes; the controller-level
/// `last_result` is the only thing that outlives a modal session.
#[derive(Debug, Clone, Default)]
pub struct PromptModalState {
    pub open: bool,
    /// Prompt text as typed, trimmed only at submission time.
    pub draft: String,
    /// One submission in flight at a time; the trigger is disabled while
    /// this is set.
    pub loading: bool,
    pub response: Option<PromptResult>,
    /// Transport/HTTP failure message scoped to this modal session.
    pub error: Option<String>,
}

/// The single source of truth for the console UI.
#[derive(Debug, Clone)]
pub struct UiState {
    pub workspaces: Vec<WorkspaceSummary>,
    /// Always references an id in `workspaces` once a refresh has settled.
    pub selected_workspace: Option<String>,
    /// Workspace-list refresh in progress.
    pub loading: bool,
    /// Failure message shown until dismissed; never cleared by a later
    /// successful refresh.
    pub banner_error: Option<String>,
    /// Most recent successful prompt result; survives modal resets.
    pub last_result: Option<PromptResult>,
    pub prompt_modal: PromptModalState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            selected_workspace: None,
            // startup begins loading; the initial refresh clears it
            loading: true,
            banner_error: None,
            last_result: None,
            prompt_modal: PromptModalState::default(),
        }
    }
}
