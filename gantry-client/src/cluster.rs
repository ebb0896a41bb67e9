//! Cluster client abstraction
//!
//! The narrow interface the control plane needs from whatever talks to the
//! cluster API. Implementations own transport, authentication, and any
//! response caching; callers treat every method as one synchronous-looking
//! call that either succeeds or surfaces a typed error.

use crate::error::Result;
use async_trait::async_trait;
use gantry_core::domain::{ResourceKey, ResourceKind, TriggerReceipt};
use serde_json::Value;
use std::collections::HashMap;

/// Minimal contract with the cluster API
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Fetch a single resource document by identity
    ///
    /// Fails with `NotFound`, `Unauthorized` or `Transport`.
    async fn fetch(&self, key: &ResourceKey) -> Result<Value>;

    /// List resource documents in a namespace matching a label selector
    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        labels: &HashMap<String, String>,
    ) -> Result<Vec<Value>>;

    /// Set the parameters as environment variables on the pipeline
    /// resource's trigger and fire it
    ///
    /// Fails with `TriggerRejected` if the resource cannot be triggered;
    /// on failure no partial parameter application is observable.
    async fn trigger(
        &self,
        pipeline: &Value,
        parameters: &HashMap<String, String>,
    ) -> Result<TriggerReceipt>;
}
