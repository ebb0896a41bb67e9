//! Response caching wrapper
//!
//! Memoizes fetched documents by their (kind, namespace, name) identity.
//! Lists and triggers pass straight through. The consistency window, how
//! long a stale resource may be reused, is the caller's contract: this
//! wrapper never invalidates on its own, so scope it to one unit of work
//! (or call `clear`) rather than holding it across a long-lived process.

use crate::cluster::ClusterClient;
use crate::error::Result;
use async_trait::async_trait;
use gantry_core::domain::{ResourceKey, ResourceKind, TriggerReceipt};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A cluster client that caches fetched resources
pub struct CachedClient<C> {
    inner: C,
    fetched: RwLock<HashMap<ResourceKey, Value>>,
}

impl<C: ClusterClient> CachedClient<C> {
    /// Wrap a client with an empty cache
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            fetched: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every cached document
    pub async fn clear(&self) {
        self.fetched.write().await.clear();
    }

    /// Access the wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: ClusterClient> ClusterClient for CachedClient<C> {
    async fn fetch(&self, key: &ResourceKey) -> Result<Value> {
        if let Some(doc) = self.fetched.read().await.get(key) {
            tracing::debug!(resource = %key, "cache hit");
            return Ok(doc.clone());
        }

        let doc = self.inner.fetch(key).await?;
        self.fetched
            .write()
            .await
            .insert(key.clone(), doc.clone());
        Ok(doc)
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        labels: &HashMap<String, String>,
    ) -> Result<Vec<Value>> {
        self.inner.list(kind, namespace, labels).await
    }

    async fn trigger(
        &self,
        pipeline: &Value,
        parameters: &HashMap<String, String>,
    ) -> Result<TriggerReceipt> {
        self.inner.trigger(pipeline, parameters).await
    }
}
