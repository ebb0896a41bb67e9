//! Manifest accessors
//!
//! Typed read-only views over the loosely-typed resource documents the
//! cluster hands back. Each wrapper owns one parsed document and exposes
//! the specific derived facts callers need; every getter returns an
//! explicit `Result` and a failed field lookup reports the exact dotted
//! path that was missing.
//!
//! Syntax errors (`ManifestError::Parse`) are distinct from structurally
//! incomplete documents (`ManifestError::Malformed`): the transport layer
//! is expected to hand back valid JSON.

pub mod build_config;
pub mod deployment_config;
pub mod image_stream;
pub mod project;
pub mod service;

pub use build_config::BuildConfigManifest;
pub use deployment_config::DeploymentConfigManifest;
pub use image_stream::ImageStreamManifest;
pub use project::ProjectManifest;
pub use service::ServiceManifest;

use crate::domain::ResourceKind;
use crate::error::{ManifestError, Result};
use serde_json::Value;

/// Parse a raw JSON document for the given kind
pub(crate) fn parse(kind: ResourceKind, json: &str) -> Result<Value> {
    serde_json::from_str(json).map_err(|source| ManifestError::Parse { kind, source })
}

/// A cursor into a document that tracks the dotted path walked so far
///
/// Each step either returns an advanced cursor or fails with a `Malformed`
/// error naming the full path of the missing segment. Null values count as
/// missing: the cluster serializes absent optional fields as null.
#[derive(Debug)]
pub(crate) struct Walk<'a> {
    kind: ResourceKind,
    node: &'a Value,
    path: String,
}

impl<'a> Walk<'a> {
    /// Start a walk at the document root
    pub(crate) fn root(kind: ResourceKind, doc: &'a Value) -> Self {
        Self {
            kind,
            node: doc,
            path: String::new(),
        }
    }

    fn extend(&self, segment: &str) -> String {
        if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", self.path, segment)
        }
    }

    /// Step into an object field
    pub(crate) fn key(&self, name: &str) -> Result<Walk<'a>> {
        let path = self.extend(name);
        match self.node.get(name) {
            Some(value) if !value.is_null() => Ok(Walk {
                kind: self.kind,
                node: value,
                path,
            }),
            _ => Err(ManifestError::Malformed {
                kind: self.kind,
                path,
            }),
        }
    }

    /// Step into an array element
    pub(crate) fn index(&self, i: usize) -> Result<Walk<'a>> {
        let path = format!("{}[{}]", self.path, i);
        match self.node.get(i) {
            Some(value) if !value.is_null() => Ok(Walk {
                kind: self.kind,
                node: value,
                path,
            }),
            _ => Err(ManifestError::Malformed {
                kind: self.kind,
                path,
            }),
        }
    }

    /// The array elements at the current position
    pub(crate) fn elements(&self) -> Result<Vec<Walk<'a>>> {
        let items = self.node.as_array().ok_or_else(|| ManifestError::Malformed {
            kind: self.kind,
            path: self.path.clone(),
        })?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, value)| Walk {
                kind: self.kind,
                node: value,
                path: format!("{}[{}]", self.path, i),
            })
            .collect())
    }

    /// The string at the current position
    pub(crate) fn string(&self) -> Result<String> {
        self.node
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ManifestError::Malformed {
                kind: self.kind,
                path: self.path.clone(),
            })
    }

    /// The current position rendered as a string; numbers are allowed
    /// (probe ports are serialized either way)
    pub(crate) fn scalar(&self) -> Result<String> {
        match self.node {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ManifestError::Malformed {
                kind: self.kind,
                path: self.path.clone(),
            }),
        }
    }
}
