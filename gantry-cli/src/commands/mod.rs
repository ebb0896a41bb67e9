//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod get;
mod trigger;

pub use get::GetCommands;
pub use trigger::TriggerCommands;

use anyhow::Result;
use clap::Subcommand;
use gantry_client::{CachedClient, ClusterConfig, ControlPlane, OpenShiftClient};

/// Top-level CLI commands
///
/// Trigger commands stay at the top level; read commands are grouped
/// under `get`.
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Trigger(TriggerCommands),
    /// Read facts out of cluster resources
    Get {
        #[command(subcommand)]
        command: GetCommands,
    },
}

/// The control plane every handler talks through
///
/// Fetches are cached for the duration of one CLI invocation.
pub type Plane = ControlPlane<CachedClient<OpenShiftClient>>;

fn plane(config: &ClusterConfig) -> Plane {
    let client = CachedClient::new(OpenShiftClient::from_config(config));
    ControlPlane::from_config(client, config)
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &ClusterConfig) -> Result<()> {
    let plane = plane(config);
    match command {
        Commands::Trigger(command) => trigger::handle_trigger_command(command, &plane).await,
        Commands::Get { command } => get::handle_get_command(command, &plane).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_trigger_commands_stay_top_level() {
        let parsed = Harness::parse_from(["gantry", "build", "myproduct", "--app", "basket"]);
        assert!(matches!(
            parsed.command,
            Commands::Trigger(TriggerCommands::Build { .. })
        ));
    }

    #[test]
    fn test_read_commands_group_under_get() {
        let parsed =
            Harness::parse_from(["gantry", "get", "cluster-ip", "myproduct-test", "basket"]);
        assert!(matches!(parsed.command, Commands::Get { .. }));
    }
}
