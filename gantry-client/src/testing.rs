//! In-memory cluster for tests

use crate::cluster::ClusterClient;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use gantry_core::domain::{ResourceKey, ResourceKind, TriggerReceipt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fake cluster backed by a HashMap
///
/// Records every successful trigger; a rejected trigger records nothing,
/// mirroring the real contract that a failed invocation has no observable
/// partial effect.
pub(crate) struct MockCluster {
    resources: Mutex<HashMap<ResourceKey, Value>>,
    fetches: AtomicUsize,
    triggered: Mutex<Vec<(String, HashMap<String, String>)>>,
    reject_reason: Mutex<Option<String>>,
}

impl MockCluster {
    pub(crate) fn new() -> Self {
        Self {
            resources: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
            triggered: Mutex::new(Vec::new()),
            reject_reason: Mutex::new(None),
        }
    }

    /// Seed a resource document
    pub(crate) fn put(&self, key: ResourceKey, doc: Value) {
        self.resources.lock().unwrap().insert(key, doc);
    }

    /// Make every subsequent trigger fail
    pub(crate) fn reject_triggers(&self, reason: &str) {
        *self.reject_reason.lock().unwrap() = Some(reason.to_string());
    }

    /// How many fetches hit this mock
    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// The (pipeline, parameters) pairs of successful triggers
    pub(crate) fn triggered(&self) -> Vec<(String, HashMap<String, String>)> {
        self.triggered.lock().unwrap().clone()
    }
}

fn labels_match(doc: &Value, labels: &HashMap<String, String>) -> bool {
    labels.iter().all(|(key, value)| {
        doc.get("metadata")
            .and_then(|metadata| metadata.get("labels"))
            .and_then(|doc_labels| doc_labels.get(key))
            .and_then(Value::as_str)
            == Some(value.as_str())
    })
}

#[async_trait]
impl ClusterClient for MockCluster {
    async fn fetch(&self, key: &ResourceKey) -> Result<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.resources
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                kind: key.kind,
                namespace: key.namespace.clone(),
                name: key.name.clone(),
            })
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        labels: &HashMap<String, String>,
    ) -> Result<Vec<Value>> {
        let resources = self.resources.lock().unwrap();
        Ok(resources
            .iter()
            .filter(|(key, doc)| {
                key.kind == kind && key.namespace == namespace && labels_match(doc, labels)
            })
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn trigger(
        &self,
        pipeline: &Value,
        parameters: &HashMap<String, String>,
    ) -> Result<TriggerReceipt> {
        let name = pipeline
            .get("metadata")
            .and_then(|metadata| metadata.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("<unnamed>")
            .to_string();

        if let Some(reason) = self.reject_reason.lock().unwrap().clone() {
            return Err(ClientError::rejected(name, reason));
        }

        self.triggered
            .lock()
            .unwrap()
            .push((name.clone(), parameters.clone()));
        Ok(TriggerReceipt {
            build: Some(format!("{}-1", name)),
            pipeline: name,
        })
    }
}
