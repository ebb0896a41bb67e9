//! Gantry Client
//!
//! The control-plane client for gantry: resolves which delivery pipeline a
//! request maps to, builds its parameter set, triggers it through a
//! [`ClusterClient`], and reads derived facts (git sources, deployed
//! versions, readiness probes, tag/digest mappings) out of cluster
//! documents.
//!
//! # Example
//!
//! ```no_run
//! use gantry_client::{ClusterConfig, ControlPlane, OpenShiftClient};
//! use gantry_core::Action;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClusterConfig::from_env()?;
//!     let client = OpenShiftClient::from_config(&config);
//!     let plane = ControlPlane::from_config(client, &config);
//!
//!     let receipt = plane
//!         .resolve_and_trigger("myproduct", &Action::Build { app: "basket".into() }, None)
//!         .await?;
//!     println!("started {:?}", receipt.build);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
mod facts;
mod http;
mod pipelines;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use cache::CachedClient;
pub use cluster::ClusterClient;
pub use config::ClusterConfig;
pub use error::{ClientError, Result};
pub use http::OpenShiftClient;
pub use gantry_core::domain::{PipelineInvocation, Readiness, TriggerReceipt};

use gantry_core::Naming;

/// The control plane facade
///
/// Generic over the cluster collaborator so the decision logic can be
/// exercised against an in-memory cluster in tests. Stateless between
/// calls: every operation is a pure function of its inputs plus at most
/// one trigger side effect.
#[derive(Debug)]
pub struct ControlPlane<C> {
    /// The external cluster collaborator
    client: C,
    /// Namespace naming convention
    naming: Naming,
    /// Default repository for product-wide pipeline runs
    product_repo: String,
}

impl<C: ClusterClient> ControlPlane<C> {
    /// Create a control plane with the default naming convention
    pub fn new(client: C, product_repo: impl Into<String>) -> Self {
        Self {
            client,
            naming: Naming::default(),
            product_repo: product_repo.into(),
        }
    }

    /// Create a control plane from a cluster configuration
    pub fn from_config(client: C, config: &ClusterConfig) -> Self {
        Self {
            client,
            naming: config.naming.clone(),
            product_repo: config.product_repo.clone(),
        }
    }

    /// Override the naming convention
    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// The naming convention in use
    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    /// Access the underlying cluster client
    pub fn client(&self) -> &C {
        &self.client
    }
}
