//! DeploymentConfig accessor

use super::Walk;
use crate::domain::{Readiness, ResourceKind};
use crate::error::{ManifestError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

const KIND: ResourceKind = ResourceKind::DeploymentConfig;

/// Read-only view over a DeploymentConfig document
#[derive(Debug, Clone)]
pub struct DeploymentConfigManifest {
    doc: Value,
}

impl DeploymentConfigManifest {
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

    /// Resource name (`metadata.name`)
    pub fn name(&self) -> Result<String> {
        Walk::root(KIND, &self.doc)
            .key("metadata")?
            .key("name")?
            .string()
    }

    /// The deployed image tag
    ///
    /// The first trigger's image reference reads `<name>:<tag>` where
    /// `<name>` is the resource name with the environment label stripped
    /// once from the front. The environment label must be present but may
    /// be the empty string, meaning no prefix to strip.
    pub fn deployed_version(&self) -> Result<String> {
        let environment = Walk::root(KIND, &self.doc)
            .key("metadata")?
            .key("labels")?
            .key("environment")?
            .string()?;
        let name = self.name()?;
        let app = if environment.is_empty() {
            name.as_str()
        } else {
            name.strip_prefix(environment.as_str()).unwrap_or(&name)
        };

        let reference = Walk::root(KIND, &self.doc)
            .key("spec")?
            .key("triggers")?
            .index(0)?
            .key("imageChangeParams")?
            .key("from")?
            .key("name")?
            .string()?;

        // Drop the application name, then everything up to and including
        // the first `:`; what remains is the tag.
        let reference = reference.strip_prefix(app).unwrap_or(&reference);
        reference
            .split_once(':')
            .map(|(_, tag)| tag.to_string())
            .ok_or_else(|| {
                ManifestError::malformed(KIND, "spec.triggers[0].imageChangeParams.from.name")
            })
    }

    /// Readiness probe port of the first container
    pub fn readiness_port(&self) -> Result<String> {
        self.readiness_attribute("port")
    }

    /// Readiness probe path of the first container
    pub fn readiness_path(&self) -> Result<String> {
        self.readiness_attribute("path")
    }

    /// Readiness probe settings of the first container
    pub fn readiness(&self) -> Result<Readiness> {
        Ok(Readiness {
            port: self.readiness_port()?,
            path: self.readiness_path()?,
        })
    }

    // Only the first container is consulted; sidecars are ignored.
    fn readiness_attribute(&self, attribute: &str) -> Result<String> {
        Walk::root(KIND, &self.doc)
            .key("spec")?
            .key("template")?
            .key("spec")?
            .key("containers")?
            .index(0)?
            .key("readinessProbe")?
            .key("httpGet")?
            .key(attribute)?
            .scalar()
    }

    /// When the deployment last progressed, if the status reports it
    ///
    /// Reads the `lastUpdateTime` of the `Progressing` condition. Unlike
    /// the other accessors an absent status section is not an error: a
    /// never-deployed config simply has no date yet.
    pub fn deployed_date(&self) -> Result<Option<DateTime<Utc>>> {
        let conditions = match self
            .doc
            .get("status")
            .and_then(|status| status.get("conditions"))
            .and_then(Value::as_array)
        {
            Some(conditions) => conditions,
            None => return Ok(None),
        };

        for condition in conditions {
            if condition.get("type").and_then(Value::as_str) == Some("Progressing") {
                let raw = match condition.get("lastUpdateTime").and_then(Value::as_str) {
                    Some(raw) => raw,
                    None => return Ok(None),
                };
                let parsed = DateTime::parse_from_rfc3339(raw).map_err(|_| {
                    ManifestError::malformed(KIND, "status.conditions[].lastUpdateTime")
                })?;
                return Ok(Some(parsed.with_timezone(&Utc)));
            }
        }
        Ok(None)
    }
}
