//! Derived-fact read operations
//!
//! Standalone reads over cluster documents: no triggering, no side
//! effects. Each call fetches the resource, parses the one fact asked for
//! and discards the document.

use crate::ControlPlane;
use crate::cluster::ClusterClient;
use crate::error::Result;
use chrono::{DateTime, Utc};
use gantry_core::ManifestError;
use gantry_core::domain::{Readiness, ResourceKey, ResourceKind};
use gantry_core::manifest::{
    BuildConfigManifest, DeploymentConfigManifest, ImageStreamManifest, ProjectManifest,
    ServiceManifest,
};
use serde_json::Value;
use std::collections::HashMap;

fn resource_name(kind: ResourceKind, doc: &Value) -> Result<String> {
    doc.get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ManifestError::malformed(kind, "metadata.name").into())
}

impl<C: ClusterClient> ControlPlane<C> {
    // =============================================================================
    // Single-resource facts
    // =============================================================================

    /// The git repository a BuildConfig pulls from
    pub async fn read_git_repository(&self, namespace: &str, name: &str) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::BuildConfig, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(BuildConfigManifest::from_value(doc).git_repository()?)
    }

    /// The git repository of an application, looked up in the product's
    /// build namespace
    pub async fn repo_url(&self, product: &str, app: &str) -> Result<String> {
        let namespace = self.naming().build(product);
        self.read_git_repository(&namespace, app).await
    }

    /// The image tag currently deployed by a DeploymentConfig
    pub async fn read_deployed_version(&self, namespace: &str, name: &str) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::DeploymentConfig, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(DeploymentConfigManifest::from_value(doc).deployed_version()?)
    }

    /// When a DeploymentConfig last progressed, if its status says
    pub async fn read_deployed_date(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let key = ResourceKey::new(ResourceKind::DeploymentConfig, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(DeploymentConfigManifest::from_value(doc).deployed_date()?)
    }

    /// Readiness probe settings of a DeploymentConfig's first container
    pub async fn read_readiness(&self, namespace: &str, name: &str) -> Result<Readiness> {
        let key = ResourceKey::new(ResourceKind::DeploymentConfig, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(DeploymentConfigManifest::from_value(doc).readiness()?)
    }

    /// The digest an image stream tag points at
    pub async fn resolve_digest_for_tag(
        &self,
        namespace: &str,
        name: &str,
        tag: &str,
    ) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::ImageStream, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(ImageStreamManifest::from_value(doc).digest_for_tag(tag)?)
    }

    /// The tag whose push history contains a digest
    pub async fn resolve_tag_for_digest(
        &self,
        namespace: &str,
        name: &str,
        digest: &str,
    ) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::ImageStream, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(ImageStreamManifest::from_value(doc).tag_for_digest(digest)?)
    }

    /// Digest of an image stream's `latest` tag
    pub async fn latest_digest(&self, namespace: &str, name: &str) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::ImageStream, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(ImageStreamManifest::from_value(doc).latest_digest()?)
    }

    /// A Service's cluster-internal IP
    pub async fn read_cluster_ip(&self, namespace: &str, name: &str) -> Result<String> {
        let key = ResourceKey::new(ResourceKind::Service, namespace, name);
        let doc = self.client().fetch(&key).await?;
        Ok(ServiceManifest::from_value(doc).cluster_ip()?)
    }

    // =============================================================================
    // Label-selected listings
    // =============================================================================

    fn product_selector(product: &str) -> HashMap<String, String> {
        HashMap::from([("product".to_string(), product.to_string())])
    }

    /// The product's BuildConfigs in its build namespace, keyed by name
    pub async fn build_configs(
        &self,
        product: &str,
    ) -> Result<HashMap<String, BuildConfigManifest>> {
        let labels = Self::product_selector(product);
        let namespace = self.naming().build(product);
        let docs = self
            .client()
            .list(ResourceKind::BuildConfig, &namespace, &labels)
            .await?;
        let mut result = HashMap::new();
        for doc in docs {
            let name = resource_name(ResourceKind::BuildConfig, &doc)?;
            result.insert(name, BuildConfigManifest::from_value(doc));
        }
        Ok(result)
    }

    /// The product's DeploymentConfigs in a namespace, keyed by name
    pub async fn deployment_configs(
        &self,
        product: &str,
        namespace: &str,
    ) -> Result<HashMap<String, DeploymentConfigManifest>> {
        let labels = Self::product_selector(product);
        let docs = self
            .client()
            .list(ResourceKind::DeploymentConfig, namespace, &labels)
            .await?;
        let mut result = HashMap::new();
        for doc in docs {
            let name = resource_name(ResourceKind::DeploymentConfig, &doc)?;
            result.insert(name, DeploymentConfigManifest::from_value(doc));
        }
        Ok(result)
    }

    /// The product's Services in a namespace, keyed by name
    pub async fn services(
        &self,
        product: &str,
        namespace: &str,
    ) -> Result<HashMap<String, ServiceManifest>> {
        let labels = Self::product_selector(product);
        let docs = self
            .client()
            .list(ResourceKind::Service, namespace, &labels)
            .await?;
        let mut result = HashMap::new();
        for doc in docs {
            let name = resource_name(ResourceKind::Service, &doc)?;
            result.insert(name, ServiceManifest::from_value(doc));
        }
        Ok(result)
    }

    /// The product's ImageStreams in a namespace, keyed by name
    pub async fn image_streams(
        &self,
        product: &str,
        namespace: &str,
    ) -> Result<HashMap<String, ImageStreamManifest>> {
        let labels = Self::product_selector(product);
        let docs = self
            .client()
            .list(ResourceKind::ImageStream, namespace, &labels)
            .await?;
        let mut result = HashMap::new();
        for doc in docs {
            let name = resource_name(ResourceKind::ImageStream, &doc)?;
            result.insert(name, ImageStreamManifest::from_value(doc));
        }
        Ok(result)
    }

    /// Every ImageStream in the product's CI/CD namespace, keyed by name
    ///
    /// Unselected: pipeline-built image streams do not carry the product
    /// label, so the namespace itself is the filter.
    pub async fn cicd_image_streams(
        &self,
        product: &str,
    ) -> Result<HashMap<String, ImageStreamManifest>> {
        let namespace = self.naming().cicd(product);
        let docs = self
            .client()
            .list(ResourceKind::ImageStream, &namespace, &HashMap::new())
            .await?;
        let mut result = HashMap::new();
        for doc in docs {
            let name = resource_name(ResourceKind::ImageStream, &doc)?;
            result.insert(name, ImageStreamManifest::from_value(doc));
        }
        Ok(result)
    }

    /// The product's stage projects, keyed by project name
    ///
    /// Selected by `product=<id>, stage=true`; use
    /// [`ProjectManifest::test_passed`] on the values to read each
    /// environment's gate.
    pub async fn stage_projects(&self, product: &str) -> Result<HashMap<String, ProjectManifest>> {
        let mut labels = Self::product_selector(product);
        labels.insert("stage".to_string(), "true".to_string());
        let docs = self.client().list(ResourceKind::Project, "", &labels).await?;
        let mut result = HashMap::new();
        for doc in docs {
            let manifest = ProjectManifest::from_value(doc);
            let name = manifest.name()?;
            tracing::debug!(project = %name, "found stage project");
            result.insert(name, manifest);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCluster;
    use serde_json::json;

    fn plane_with(mock: MockCluster) -> ControlPlane<MockCluster> {
        ControlPlane::new(mock, "https://github.com/acme/product.git")
    }

    #[tokio::test]
    async fn test_read_git_repository() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::BuildConfig, "myproduct-build", "basket"),
            json!({
                "spec": { "source": { "git": { "uri": "https://github.com/acme/basket.git" } } }
            }),
        );

        let plane = plane_with(mock);
        assert_eq!(
            plane.repo_url("myproduct", "basket").await.unwrap(),
            "https://github.com/acme/basket.git"
        );
    }

    #[tokio::test]
    async fn test_read_deployed_version() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::DeploymentConfig, "myproduct-test", "test-basket"),
            json!({
                "metadata": {
                    "name": "test-basket",
                    "labels": { "environment": "test" }
                },
                "spec": {
                    "triggers": [
                        { "imageChangeParams": { "from": { "name": "test-basket:v7" } } }
                    ]
                }
            }),
        );

        let plane = plane_with(mock);
        assert_eq!(
            plane
                .read_deployed_version("myproduct-test", "test-basket")
                .await
                .unwrap(),
            "v7"
        );
    }

    #[tokio::test]
    async fn test_read_readiness() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::DeploymentConfig, "myproduct-test", "basket"),
            json!({
                "spec": {
                    "template": {
                        "spec": {
                            "containers": [
                                { "readinessProbe": { "httpGet": { "port": 8080, "path": "/ready" } } }
                            ]
                        }
                    }
                }
            }),
        );

        let plane = plane_with(mock);
        let readiness = plane.read_readiness("myproduct-test", "basket").await.unwrap();
        assert_eq!(readiness.port, "8080");
        assert_eq!(readiness.path, "/ready");
    }

    #[tokio::test]
    async fn test_tag_digest_round_trip() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::ImageStream, "myproduct-cicd", "basket"),
            json!({
                "status": {
                    "tags": [
                        { "tag": "v7", "items": [{ "image": "sha256:abc" }] }
                    ]
                }
            }),
        );

        let plane = plane_with(mock);
        let digest = plane
            .resolve_digest_for_tag("myproduct-cicd", "basket", "v7")
            .await
            .unwrap();
        let tag = plane
            .resolve_tag_for_digest("myproduct-cicd", "basket", &digest)
            .await
            .unwrap();
        assert_eq!(tag, "v7");

        let err = plane
            .resolve_digest_for_tag("myproduct-cicd", "basket", "v8")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_read_cluster_ip() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::Service, "myproduct-test", "basket"),
            json!({ "spec": { "clusterIP": "172.30.0.42" } }),
        );

        let plane = plane_with(mock);
        assert_eq!(
            plane.read_cluster_ip("myproduct-test", "basket").await.unwrap(),
            "172.30.0.42"
        );
    }

    #[tokio::test]
    async fn test_deployment_configs_keyed_by_name() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::DeploymentConfig, "myproduct-test", "basket"),
            json!({
                "metadata": { "name": "basket", "labels": { "product": "myproduct" } }
            }),
        );
        mock.put(
            ResourceKey::new(ResourceKind::DeploymentConfig, "myproduct-test", "orders"),
            json!({
                "metadata": { "name": "orders", "labels": { "product": "myproduct" } }
            }),
        );
        mock.put(
            ResourceKey::new(ResourceKind::DeploymentConfig, "myproduct-test", "other"),
            json!({
                "metadata": { "name": "other", "labels": { "product": "someone-else" } }
            }),
        );

        let plane = plane_with(mock);
        let configs = plane
            .deployment_configs("myproduct", "myproduct-test")
            .await
            .unwrap();
        assert_eq!(configs.len(), 2);
        assert!(configs.contains_key("basket"));
        assert!(configs.contains_key("orders"));
    }

    #[tokio::test]
    async fn test_build_configs_listed_in_build_namespace() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::BuildConfig, "myproduct-build", "basket"),
            json!({
                "metadata": { "name": "basket", "labels": { "product": "myproduct" } },
                "spec": { "source": { "git": { "uri": "https://github.com/acme/basket.git" } } }
            }),
        );
        mock.put(
            ResourceKey::new(ResourceKind::BuildConfig, "myproduct-cicd", "build-basket"),
            json!({
                "metadata": { "name": "build-basket", "labels": { "product": "myproduct" } }
            }),
        );

        let plane = plane_with(mock);
        let configs = plane.build_configs("myproduct").await.unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(
            configs.get("basket").unwrap().git_repository().unwrap(),
            "https://github.com/acme/basket.git"
        );
    }

    #[tokio::test]
    async fn test_cicd_image_streams_need_no_label() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::ImageStream, "myproduct-cicd", "basket"),
            json!({ "metadata": { "name": "basket" } }),
        );
        mock.put(
            ResourceKey::new(ResourceKind::ImageStream, "myproduct-test", "basket"),
            json!({ "metadata": { "name": "basket", "labels": { "product": "myproduct" } } }),
        );

        let plane = plane_with(mock);
        let streams = plane.cicd_image_streams("myproduct").await.unwrap();
        assert_eq!(streams.len(), 1);
        assert!(streams.contains_key("basket"));
    }

    #[tokio::test]
    async fn test_stage_projects() {
        let mock = MockCluster::new();
        mock.put(
            ResourceKey::new(ResourceKind::Project, "", "myproduct-test"),
            json!({
                "metadata": {
                    "name": "myproduct-test",
                    "labels": { "product": "myproduct", "stage": "true", "test-passed": "true" }
                }
            }),
        );
        mock.put(
            ResourceKey::new(ResourceKind::Project, "", "myproduct-cicd"),
            json!({
                "metadata": {
                    "name": "myproduct-cicd",
                    "labels": { "product": "myproduct" }
                }
            }),
        );

        let plane = plane_with(mock);
        let projects = plane.stage_projects("myproduct").await.unwrap();
        assert_eq!(projects.len(), 1);
        assert!(projects.get("myproduct-test").unwrap().test_passed());
    }
}
