//! Error types for the gantry client

use gantry_core::ManifestError;
use gantry_core::domain::ResourceKind;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when driving the cluster
///
/// Collaborator-origin failures (`Transport`, `Api`, `TriggerRejected`) are
/// propagated unchanged; nothing here retries or recovers silently.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The cluster rejected our credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    /// The cluster API returned an unexpected error status
    #[error("cluster API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The pipeline resource cannot be triggered
    #[error("pipeline `{pipeline}` rejected the trigger: {reason}")]
    TriggerRejected {
        /// Pipeline that was being triggered
        pipeline: String,
        /// Why the cluster refused
        reason: String,
    },

    /// A fetched document did not have the expected shape
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a trigger rejection
    pub fn rejected(pipeline: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TriggerRejected {
            pipeline: pipeline.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api { status: 404, .. } => true,
            Self::Manifest(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error came from the collaborator rather than a
    /// malformed document
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }
}
