//! Backend client error types

use thiserror::Error;

/// Normalized failure for every backend call.
///
/// Transport problems, non-2xx responses and undecodable bodies all land
/// here; callers never see a raw `reqwest::Error`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. `body` is the raw response text, kept verbatim
    /// for diagnostics.
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a usable response (connect failure,
    /// broken stream, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
