//! Read command handlers
//!
//! Handles the standalone fact reads: repository URLs, deployed versions,
//! readiness settings, tag/digest lookups and cluster IPs. Nothing here
//! triggers anything.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;

use super::Plane;

/// Read subcommands
#[derive(Subcommand)]
pub enum GetCommands {
    /// Git repository of an application's BuildConfig
    Repo {
        /// Product id
        product: String,
        /// Application name
        app: String,
    },
    /// Deployed image tag of a DeploymentConfig
    Version {
        /// Namespace of the DeploymentConfig
        namespace: String,
        /// DeploymentConfig name
        name: String,
    },
    /// Readiness probe port and path of a DeploymentConfig
    Readiness {
        /// Namespace of the DeploymentConfig
        namespace: String,
        /// DeploymentConfig name
        name: String,
    },
    /// Digest an image stream tag points at
    Digest {
        /// Namespace of the ImageStream
        namespace: String,
        /// ImageStream name
        name: String,
        /// Tag to look up; defaults to latest
        #[arg(default_value = "latest")]
        tag: String,
    },
    /// Tag whose push history contains a digest
    Tag {
        /// Namespace of the ImageStream
        namespace: String,
        /// ImageStream name
        name: String,
        /// Digest to look up
        digest: String,
    },
    /// Cluster-internal IP of a Service
    ClusterIp {
        /// Namespace of the Service
        namespace: String,
        /// Service name
        name: String,
    },
}

/// Handle read commands
pub async fn handle_get_command(command: GetCommands, plane: &Plane) -> Result<()> {
    match command {
        GetCommands::Repo { product, app } => {
            let repo = plane
                .repo_url(&product, &app)
                .await
                .with_context(|| format!("failed to read repository of {}", app))?;
            println!("{}", repo);
        }
        GetCommands::Version { namespace, name } => {
            let version = plane
                .read_deployed_version(&namespace, &name)
                .await
                .with_context(|| format!("failed to read deployed version of {}", name))?;
            println!("{}", version);

            if let Some(date) = plane.read_deployed_date(&namespace, &name).await? {
                println!("deployed {}", date.to_rfc3339().dimmed());
            }
        }
        GetCommands::Readiness { namespace, name } => {
            let readiness = plane
                .read_readiness(&namespace, &name)
                .await
                .with_context(|| format!("failed to read readiness of {}", name))?;
            println!("port: {}", readiness.port.bold());
            println!("path: {}", readiness.path.bold());
        }
        GetCommands::Digest {
            namespace,
            name,
            tag,
        } => {
            let digest = plane
                .resolve_digest_for_tag(&namespace, &name, &tag)
                .await
                .with_context(|| format!("no digest for tag {}", tag))?;
            println!("{}", digest);
        }
        GetCommands::Tag {
            namespace,
            name,
            digest,
        } => {
            let tag = plane
                .resolve_tag_for_digest(&namespace, &name, &digest)
                .await
                .with_context(|| format!("no tag for digest {}", digest))?;
            println!("{}", tag);
        }
        GetCommands::ClusterIp { namespace, name } => {
            let ip = plane
                .read_cluster_ip(&namespace, &name)
                .await
                .with_context(|| format!("failed to read cluster IP of {}", name))?;
            println!("{}", ip);
        }
    }
    Ok(())
}
