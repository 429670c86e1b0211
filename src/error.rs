//! Error types for the profile client and the profile page.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::pages::profile::{Operation, UiState};

/// Errors returned by the profile service client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Profile service error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error body returned by the profile service. Older endpoints use `msg`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "msg")]
    pub message: String,
}

impl ClientError {
    /// Map a non-success status and optional error body onto the taxonomy.
    pub fn from_status(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let message = body
            .map(|b| b.message)
            .unwrap_or_else(|| format!("Profile service error: {}", status));

        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::Internal(anyhow::anyhow!("{} ({})", message, status)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors returned by profile page operations.
///
/// User-facing failures are also reported through the page's notifier;
/// the returned error is for the caller and for logs.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("No profile identifier in the current path")]
    MissingIdentifier,

    #[error("No profile is loaded")]
    NotLoaded,

    #[error("Only the profile owner can do this")]
    NotOwner,

    #[error("Cannot {operation} while {state:?}")]
    InvalidState {
        operation: &'static str,
        state: UiState,
    },

    #[error("Another operation is in progress: {0:?}")]
    Busy(Operation),

    #[error("Confirmation text does not match")]
    ConfirmationMismatch,

    #[error("Response arrived for a page that is no longer current")]
    Stale,

    #[error(transparent)]
    Api(#[from] ClientError),
}

pub type PageResult<T> = Result<T, PageError>;
