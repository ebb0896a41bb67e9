//! HTTP implementation of the cluster client
//!
//! Talks to the OpenShift REST API with bearer-token authentication.
//! Triggering goes through the BuildConfig `instantiate` subresource with
//! the parameters as env entries on the build request.

use crate::cluster::ClusterClient;
use crate::config::ClusterConfig;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use gantry_core::domain::{ResourceKey, ResourceKind, TriggerReceipt};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use std::collections::HashMap;

/// API group prefix and plural for a resource kind
fn api_path(kind: ResourceKind) -> (&'static str, &'static str) {
    match kind {
        ResourceKind::BuildConfig => ("apis/build.openshift.io/v1", "buildconfigs"),
        ResourceKind::DeploymentConfig => ("apis/apps.openshift.io/v1", "deploymentconfigs"),
        ResourceKind::ImageStream => ("apis/image.openshift.io/v1", "imagestreams"),
        ResourceKind::Service => ("api/v1", "services"),
        ResourceKind::Project => ("apis/project.openshift.io/v1", "projects"),
    }
}

/// reqwest-backed client for the OpenShift API
#[derive(Debug, Clone)]
pub struct OpenShiftClient {
    /// Base URL of the cluster API (e.g. "https://api.cluster:6443")
    base_url: String,
    /// Bearer token presented on every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl OpenShiftClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &ClusterConfig) -> Self {
        Self::new(&config.api_url, &config.token)
    }

    /// Create a client with a custom reqwest client (timeouts, TLS, ...)
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the cluster API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, key: &ResourceKey) -> String {
        let (api, plural) = api_path(key.kind);
        if key.kind.is_cluster_scoped() {
            format!("{}/{}/{}/{}", self.base_url, api, plural, key.name)
        } else {
            format!(
                "{}/{}/namespaces/{}/{}/{}",
                self.base_url, api, key.namespace, plural, key.name
            )
        }
    }

    fn collection_url(&self, kind: ResourceKind, namespace: &str) -> String {
        let (api, plural) = api_path(kind);
        if kind.is_cluster_scoped() {
            format!("{}/{}/{}", self.base_url, api, plural)
        } else {
            format!(
                "{}/{}/namespaces/{}/{}",
                self.base_url, api, namespace, plural
            )
        }
    }

    /// Check the status code and deserialize the body, mapping error
    /// statuses onto the client error taxonomy
    async fn handle_response(&self, response: Response, key: &ResourceKey) -> Result<Value> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                kind: key.kind,
                namespace: key.namespace.clone(),
                name: key.name.clone(),
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized(format!(
                "cluster refused access to {}",
                key
            )));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::api(status.as_u16(), message));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ClusterClient for OpenShiftClient {
    async fn fetch(&self, key: &ResourceKey) -> Result<Value> {
        let url = self.resource_url(key);
        tracing::debug!(resource = %key, "fetching resource");
        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;

        self.handle_response(response, key).await
    }

    async fn list(
        &self,
        kind: ResourceKind,
        namespace: &str,
        labels: &HashMap<String, String>,
    ) -> Result<Vec<Value>> {
        let url = self.collection_url(kind, namespace);
        let selector = labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");

        let mut request = self.client.get(&url).bearer_auth(&self.token);
        if !selector.is_empty() {
            request = request.query(&[("labelSelector", selector.as_str())]);
        }
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized(format!(
                "cluster refused to list {} in {}",
                kind, namespace
            )));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::api(status.as_u16(), message));
        }

        let body: Value = response.json().await?;
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(items)
    }

    async fn trigger(
        &self,
        pipeline: &Value,
        parameters: &HashMap<String, String>,
    ) -> Result<TriggerReceipt> {
        let name = pipeline
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::rejected("<unnamed>", "pipeline resource has no metadata.name")
            })?;
        let namespace = pipeline
            .get("metadata")
            .and_then(|m| m.get("namespace"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::rejected(name, "pipeline resource has no metadata.namespace")
            })?;

        let env: Vec<Value> = parameters
            .iter()
            .map(|(k, v)| json!({ "name": k, "value": v }))
            .collect();
        let body = json!({
            "kind": "BuildRequest",
            "apiVersion": "build.openshift.io/v1",
            "metadata": { "name": name },
            "env": env,
        });

        let (api, plural) = api_path(ResourceKind::BuildConfig);
        let url = format!(
            "{}/{}/namespaces/{}/{}/{}/instantiate",
            self.base_url, api, namespace, plural, name
        );
        tracing::debug!(pipeline = name, namespace, "instantiating pipeline build");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized(format!(
                "cluster refused to trigger {}/{}",
                namespace, name
            )));
        }
        if !status.is_success() {
            // The instantiate subresource refusing the request means this
            // BuildConfig cannot be triggered (or the request was invalid);
            // either way no build was started.
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::rejected(
                name,
                format!("status {}: {}", status.as_u16(), message),
            ));
        }

        let build: Value = response.json().await?;
        let build_name = build
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(TriggerReceipt {
            pipeline: name.to_string(),
            build: build_name,
        })
    }
}
