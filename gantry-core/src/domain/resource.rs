//! Cluster resource identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The cluster resource kinds this system reads or triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    BuildConfig,
    DeploymentConfig,
    ImageStream,
    Service,
    Project,
}

impl ResourceKind {
    /// The Kubernetes kind string for this resource
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::BuildConfig => "BuildConfig",
            ResourceKind::DeploymentConfig => "DeploymentConfig",
            ResourceKind::ImageStream => "ImageStream",
            ResourceKind::Service => "Service",
            ResourceKind::Project => "Project",
        }
    }

    /// Whether this kind lives outside any namespace
    pub fn is_cluster_scoped(&self) -> bool {
        matches!(self, ResourceKind::Project)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a single cluster resource
///
/// This triple is the unit of fetching and the cache key for any response
/// caching a `ClusterClient` implementation chooses to do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    /// Create a resource key
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = ResourceKey::new(ResourceKind::BuildConfig, "myproduct-cicd", "build-basket");
        assert_eq!(key.to_string(), "BuildConfig/myproduct-cicd/build-basket");
    }

    #[test]
    fn test_project_is_cluster_scoped() {
        assert!(ResourceKind::Project.is_cluster_scoped());
        assert!(!ResourceKind::BuildConfig.is_cluster_scoped());
    }
}
