//! Trigger command handlers
//!
//! Handles the commands that fire pipelines: build, release, promote,
//! qa and the live swap.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use gantry_client::TriggerReceipt;
use gantry_core::environment::PromotionRequest;

use super::Plane;

/// Pipeline-firing subcommands
#[derive(Subcommand)]
pub enum TriggerCommands {
    /// Trigger a build pipeline
    Build {
        /// Product id
        product: String,

        /// Application to build; omit to build all
        #[arg(short, long)]
        app: Option<String>,

        /// Override the source repository URL
        #[arg(long)]
        repo: Option<String>,
    },
    /// Trigger a release pipeline
    Release {
        /// Product id
        product: String,

        /// Application to release; omit to release all
        #[arg(short, long)]
        app: Option<String>,
    },
    /// Promote into the next environment
    Promote {
        /// Product id
        product: String,

        /// Environment the artifact currently sits in
        #[arg(long)]
        from: String,

        /// Environment being promoted into
        #[arg(long)]
        to: String,

        /// Application to promote; omit to promote all
        #[arg(short, long)]
        app: Option<String>,
    },
    /// Swap the live production slot
    Live {
        /// Product id
        product: String,
    },
    /// Run the qa suite against an environment
    Qa {
        /// Product id
        product: String,

        /// Environment to test
        environment: String,
    },
}

/// Handle a trigger command
pub async fn handle_trigger_command(command: TriggerCommands, plane: &Plane) -> Result<()> {
    let receipt = match command {
        TriggerCommands::Build { product, app, repo } => match app {
            Some(app) => plane
                .trigger_build(&product, &app, repo.as_deref())
                .await
                .with_context(|| format!("failed to build {}", app))?,
            None => plane
                .trigger_build_all(&product)
                .await
                .with_context(|| format!("failed to build product {}", product))?,
        },
        TriggerCommands::Release { product, app } => match app {
            Some(app) => plane
                .trigger_release(&product, &app)
                .await
                .with_context(|| format!("failed to release {}", app))?,
            None => plane
                .trigger_release_all(&product)
                .await
                .with_context(|| format!("failed to release product {}", product))?,
        },
        TriggerCommands::Promote {
            product,
            from,
            to,
            app,
        } => {
            let request = PromotionRequest {
                product,
                environment: from,
                next: to,
                app,
            };
            plane
                .trigger_promotion(&request)
                .await
                .context("promotion failed")?
        }
        TriggerCommands::Live { product } => plane
            .trigger_promote_to_live(&product)
            .await
            .context("live swap failed")?,
        TriggerCommands::Qa {
            product,
            environment,
        } => plane
            .trigger_qa(&product, &environment)
            .await
            .with_context(|| format!("qa run against {} failed", environment))?,
    };

    print_receipt(&receipt);
    Ok(())
}

fn print_receipt(receipt: &TriggerReceipt) {
    match &receipt.build {
        Some(build) => println!(
            "{} triggered {} (build {})",
            "✓".green(),
            receipt.pipeline.bold(),
            build
        ),
        None => println!("{} triggered {}", "✓".green(), receipt.pipeline.bold()),
    }
}
