//! Console controller - sequences backend calls against the UI state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use backend_client::{BackendClientTrait, PromptRequest};
use log::error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::structs::{PromptModalState, UiState};

/// How long to wait after a successful prompt before refreshing the
/// workspace list. File counts lag behind prompt execution on the backend;
/// this delay is a placeholder for a real completion signal.
const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Sole owner of [`UiState`]; mediates between user actions and the
/// backend client.
///
/// Cloning is cheap and clones share the same state, so a clone can be
/// handed to a background task or an input loop.
pub struct ConsoleController<B> {
    api: Arc<B>,
    state: Arc<RwLock<UiState>>,
    /// Monotonic ticket per issued refresh; a resolved refresh only applies
    /// if no newer one was issued while it was in flight.
    refresh_ticket: Arc<AtomicU64>,
    refresh_delay: Duration,
    pending_refresh: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<B> Clone for ConsoleController<B> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            refresh_ticket: Arc::clone(&self.refresh_ticket),
            refresh_delay: self.refresh_delay,
            pending_refresh: Arc::clone(&self.pending_refresh),
        }
    }
}

impl<B: BackendClientTrait + 'static> ConsoleController<B> {
    pub fn new(api: B) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(RwLock::new(UiState::default())),
            refresh_ticket: Arc::new(AtomicU64::new(0)),
            refresh_delay: DEFAULT_REFRESH_DELAY,
            pending_refresh: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Snapshot of the current UI state.
    pub async fn state(&self) -> UiState {
        self.state.read().await.clone()
    }

    /// Load (or reload) the workspace list.
    ///
    /// On success the list is replaced wholesale and the selection is
    /// reconciled; on failure the banner is set and the list forced empty
    /// so stale data is never left visible.
    pub async fn load_workspaces(&self) {
        let ticket = self.refresh_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let outcome = self.api.list_workspaces().await;

        let mut state = self.state.write().await;
        if self.refresh_ticket.load(Ordering::SeqCst) != ticket {
            // A newer refresh was issued while this one was in flight;
            // discard this result and let the newer one settle the state.
            return;
        }
        match outcome {
            Ok(workspaces) => {
                state.workspaces = workspaces;
            }
            Err(err) => {
                error!("failed to load workspaces: {err}");
                state.banner_error = Some(err.to_string());
                state.workspaces.clear();
            }
        }
        Self::reconcile_selection(&mut state);
        state.loading = false;
    }

    /// Create a workspace and select it once the refreshed list contains it.
    ///
    /// A blank or whitespace-only name is a silent no-op: no request, no
    /// error.
    pub async fn create_workspace(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        match self.api.create_workspace(name).await {
            Ok(created) => {
                // The refresh must land before the new id can be selected.
                self.load_workspaces().await;
                let mut state = self.state.write().await;
                if state
                    .workspaces
                    .iter()
                    .any(|w| w.id == created.workspace_id)
                {
                    state.selected_workspace = Some(created.workspace_id);
                }
            }
            Err(err) => {
                error!("failed to create workspace {name:?}: {err}");
                self.state.write().await.banner_error = Some(err.to_string());
            }
        }
    }

    /// Direct selection change; no network call, no validation beyond the
    /// reconciliation performed by the next refresh.
    pub async fn select_workspace(&self, workspace_id: impl Into<String>) {
        self.state.write().await.selected_workspace = Some(workspace_id.into());
    }

    pub async fn open_prompt_modal(&self) {
        let mut state = self.state.write().await;
        state.prompt_modal = PromptModalState {
            open: true,
            ..PromptModalState::default()
        };
    }

    /// Close the modal and drop its transient fields. `last_result` stays.
    pub async fn close_prompt_modal(&self) {
        self.state.write().await.prompt_modal = PromptModalState::default();
    }

    pub async fn set_prompt_draft(&self, draft: impl Into<String>) {
        self.state.write().await.prompt_modal.draft = draft.into();
    }

    pub async fn dismiss_error(&self) {
        self.state.write().await.banner_error = None;
    }

    /// Submit the modal's draft prompt for the selected workspace.
    ///
    /// No-op unless a workspace is selected, the trimmed draft is non-empty
    /// and no submission is already in flight. A transport/HTTP failure
    /// becomes the modal's local error; a result with `success == false`
    /// is stored like any other result and never escalated to the banner.
    pub async fn submit_prompt(&self) {
        let request = {
            let mut state = self.state.write().await;
            if state.prompt_modal.loading {
                return;
            }
            let Some(workspace_id) = state.selected_workspace.clone() else {
                return;
            };
            let prompt = state.prompt_modal.draft.trim().to_string();
            if prompt.is_empty() {
                return;
            }
            state.prompt_modal.loading = true;
            state.prompt_modal.error = None;
            state.prompt_modal.response = None;
            PromptRequest {
                workspace_id,
                prompt,
            }
        };

        let outcome = self.api.process_prompt(&request).await;

        let mut state = self.state.write().await;
        state.prompt_modal.loading = false;
        match outcome {
            Ok(result) => {
                state.prompt_modal.response = Some(result.clone());
                state.last_result = Some(result);
                drop(state);
                self.schedule_deferred_refresh().await;
            }
            Err(err) => {
                error!("prompt submission failed: {err}");
                state.prompt_modal.error = Some(err.to_string());
            }
        }
    }

    /// Await the deferred refresh scheduled by the last successful
    /// submission, if one is pending. Callers that render immediately after
    /// submitting use this to observe the refreshed counts.
    pub async fn wait_for_refresh(&self) {
        let handle = self.pending_refresh.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    async fn schedule_deferred_refresh(&self) {
        let controller = self.clone();
        let delay = self.refresh_delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            controller.load_workspaces().await;
        });
        *self.pending_refresh.lock().await = Some(handle);
    }

    fn reconcile_selection(state: &mut UiState) {
        match &state.selected_workspace {
            Some(id) if state.workspaces.iter().any(|w| &w.id == id) => {}
            _ => {
                // deterministic default: first entry, or nothing
                state.selected_workspace = state.workspaces.first().map(|w| w.id.clone());
            }
        }
    }
}
