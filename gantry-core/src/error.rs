//! Error types for manifest parsing

use crate::domain::ResourceKind;
use thiserror::Error;

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Errors raised while extracting facts from cluster documents
///
/// A syntactically invalid document (`Parse`) is the transport layer's
/// fault; a well-formed document missing an expected field (`Malformed`)
/// means the cluster handed back a shape this code does not understand.
/// Neither is ever defaulted over.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Document is not valid JSON
    #[error("invalid {kind} document: {source}")]
    Parse {
        /// Resource kind being parsed
        kind: ResourceKind,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Document is valid JSON but an expected field path is absent
    /// or has the wrong type
    #[error("malformed {kind} document: missing or mistyped field `{path}`")]
    Malformed {
        /// Resource kind being parsed
        kind: ResourceKind,
        /// Dotted path of the field that failed (e.g. `spec.source.git.uri`)
        path: String,
    },

    /// No digest recorded for the requested tag
    #[error("no digest found for tag `{0}`")]
    TagNotFound(String),

    /// No tag points at the requested digest
    #[error("no tag found for digest `{0}`")]
    DigestNotFound(String),
}

impl ManifestError {
    /// Create a malformed-document error for a field path
    pub fn malformed(kind: ResourceKind, path: impl Into<String>) -> Self {
        Self::Malformed {
            kind,
            path: path.into(),
        }
    }

    /// Check if this error is a tag/digest lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TagNotFound(_) | Self::DigestNotFound(_))
    }
}
