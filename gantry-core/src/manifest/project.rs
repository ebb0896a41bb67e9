//! Project accessor

use super::Walk;
use crate::domain::ResourceKind;
use crate::error::Result;
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::Project;

/// Read-only view over a Project document
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    doc: Value,
}

impl ProjectManifest {
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

    /// Project name (`metadata.name`)
    pub fn name(&self) -> Result<String> {
        Walk::root(KIND, &self.doc)
            .key("metadata")?
            .key("name")?
            .string()
    }

    /// Whether the environment behind this project has passed its tests
    ///
    /// Reads the `test-passed` label. Anything other than the literal
    /// string "true" (including an absent label) counts as not passed.
    pub fn test_passed(&self) -> bool {
        self.doc
            .get("metadata")
            .and_then(|metadata| metadata.get("labels"))
            .and_then(|labels| labels.get("test-passed"))
            .and_then(Value::as_str)
            == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name() {
        let manifest = ProjectManifest::from_value(json!({
            "metadata": { "name": "myproduct-test" }
        }));
        assert_eq!(manifest.name().unwrap(), "myproduct-test");
    }

    #[test]
    fn test_test_passed_label() {
        let passed = ProjectManifest::from_value(json!({
            "metadata": { "labels": { "test-passed": "true" } }
        }));
        assert!(passed.test_passed());

        let failed = ProjectManifest::from_value(json!({
            "metadata": { "labels": { "test-passed": "false" } }
        }));
        assert!(!failed.test_passed());
    }

    #[test]
    fn test_absent_label_counts_as_not_passed() {
        let manifest = ProjectManifest::from_value(json!({ "metadata": {} }));
        assert!(!manifest.test_passed());
    }
}
