//! BuildConfig accessor

use super::Walk;
use crate::domain::ResourceKind;
use crate::error::Result;
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::BuildConfig;

/// Read-only view over a BuildConfig document
#[derive(Debug, Clone)]
pub struct BuildConfigManifest {
    doc: Value,
}

impl BuildConfigManifest {
    /// Parse from a raw JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            doc: super::parse(KIND, json)?,
        })
    }

    /// Wrap an already-fetched document
    pub fn from_value(doc: Value) -> Self {
        Self { doc }
    }

    /// The git repository URI the build pulls from
    ///
    /// Fails if `spec.source.git.uri` is absent; there is no sensible
    /// default for a source location.
    pub fn git_repository(&self) -> Result<String> {
        Walk::root(KIND, &self.doc)
            .key("spec")?
            .key("source")?
            .key("git")?
            .key("uri")?
            .string()
    }
}
