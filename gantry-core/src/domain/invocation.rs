//! Pipeline invocation types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One pipeline trigger request
///
/// Constructed by the facade, handed once to the executor, then discarded.
/// Parameters are injected into the pipeline as environment variables;
/// keys are unique, last write wins when built incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInvocation {
    /// Name of the pipeline BuildConfig to trigger
    pub pipeline: String,
    /// Namespace the pipeline lives in (the product's CI/CD namespace)
    pub namespace: String,
    /// Environment variables to set on the trigger
    pub parameters: HashMap<String, String>,
}

impl PipelineInvocation {
    /// Create an invocation
    pub fn new(
        pipeline: impl Into<String>,
        namespace: impl Into<String>,
        parameters: HashMap<String, String>,
    ) -> Self {
        Self {
            pipeline: pipeline.into(),
            namespace: namespace.into(),
            parameters,
        }
    }
}

/// What the cluster reported back for a fired trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReceipt {
    /// The pipeline that was triggered
    pub pipeline: String,
    /// Name of the build the cluster started, when it reported one
    pub build: Option<String>,
}

/// Readiness probe settings of a deployed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    /// Probe port, rendered as a string (the document may hold a number)
    pub port: String,
    /// Probe HTTP path
    pub path: String,
}
