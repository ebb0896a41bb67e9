//! Gantry CLI
//!
//! Command-line interface for driving delivery pipelines on the cluster.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use gantry_client::ClusterConfig;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Gantry delivery control-plane CLI", long_about = None)]
struct Cli {
    /// Cluster API URL
    #[arg(long, env = "OPENSHIFT_URL")]
    url: String,

    /// Bearer token for the cluster API
    #[arg(long, env = "OPENSHIFT_TOKEN", hide_env_values = true)]
    token: String,

    /// Default repository for product-wide pipeline runs
    #[arg(long, env = "PRODUCT_REPO")]
    product_repo: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ClusterConfig::new(cli.url, cli.token, cli.product_repo);
    config.validate()?;

    handle_command(cli.command, &config).await
}
