//! Service accessor

use super::Walk;
use crate::domain::ResourceKind;
use crate::error::Result;
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::Service;

/// Read-only view over a Service document
#[derive(Debug, Clone)]
pub struct ServiceManifest {
    doc: Value,
}

impl ServiceManifest {
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

    /// The service's cluster-internal IP (`spec.clusterIP`)
    pub fn cluster_ip(&self) -> Result<String> {
        Walk::root(KIND, &self.doc)
            .key("spec")?
            .key("clusterIP")?
            .string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ManifestError;
    use serde_json::json;

    #[test]
    fn test_cluster_ip() {
        let manifest = ServiceManifest::from_value(json!({
            "spec": { "clusterIP": "172.30.0.42" }
        }));
        assert_eq!(manifest.cluster_ip().unwrap(), "172.30.0.42");
    }

    #[test]
    fn test_missing_cluster_ip_is_malformed() {
        let manifest = ServiceManifest::from_value(json!({ "spec": {} }));
        assert!(matches!(
            manifest.cluster_ip().unwrap_err(),
            ManifestError::Malformed { ref path, .. } if path == "spec.clusterIP"
        ));
    }
}
