//! Client configuration
//!
//! Connection settings and the process-wide default repository location,
//! threaded explicitly instead of read from ambient globals at call sites.

use gantry_core::Naming;

/// Configuration for talking to a cluster
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Base URL of the cluster API (e.g. "https://api.cluster:6443")
    pub api_url: String,

    /// Bearer token for the cluster API
    pub token: String,

    /// Default repository URL used for product-wide pipeline runs
    pub product_repo: String,

    /// Namespace naming convention
    pub naming: Naming,
}

impl ClusterConfig {
    /// Creates a configuration with the default naming convention
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        product_repo: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            product_repo: product_repo.into(),
            naming: Naming::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OPENSHIFT_URL (required)
    /// - OPENSHIFT_TOKEN (required)
    /// - PRODUCT_REPO (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("OPENSHIFT_URL")
            .map_err(|_| anyhow::anyhow!("OPENSHIFT_URL environment variable not set"))?;

        let token = std::env::var("OPENSHIFT_TOKEN")
            .map_err(|_| anyhow::anyhow!("OPENSHIFT_TOKEN environment variable not set"))?;

        let product_repo = std::env::var("PRODUCT_REPO")
            .map_err(|_| anyhow::anyhow!("PRODUCT_REPO environment variable not set"))?;

        Ok(Self::new(api_url, token, product_repo))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.token.is_empty() {
            anyhow::bail!("token cannot be empty");
        }

        if self.product_repo.is_empty() {
            anyhow::bail!("product_repo cannot be empty");
        }

        Ok(())
    }
}
