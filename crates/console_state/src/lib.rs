//! # console_state
//!
//! Owns the console's UI state and sequences backend calls in response to
//! user actions. The controller here is the only caller of the backend
//! client; the client knows nothing about UI state.

pub mod controller;
pub mod structs;

// Re-exports
pub use controller::ConsoleController;
pub use structs::{PromptModalState, UiState};
