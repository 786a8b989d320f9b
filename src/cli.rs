//! CLI definitions for access-webhooks.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// access-webhooks CLI.
#[derive(Parser)]
#[command(name = "access-webhooks")]
#[command(about = "Manage UniFi Access webhook endpoints")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.access-webhooks/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Controller base URL, overrides the config file
    #[arg(long, env = "ACCESS_WEBHOOKS_HOST", global = true)]
    pub host: Option<String>,

    /// API token, overrides the config file
    #[arg(long, env = "ACCESS_WEBHOOKS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List registered webhook endpoints
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the event types that can be selected
    Events,

    /// Register a new webhook endpoint
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Delivery URL
        #[arg(short, long)]
        endpoint: String,

        /// Event type to subscribe to (repeatable)
        #[arg(long = "event", value_name = "EVENT")]
        events: Vec<String>,
    },

    /// Change an existing webhook endpoint
    Edit {
        /// Webhook ID
        id: String,

        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New delivery URL
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Event type to add (repeatable)
        #[arg(long = "event", value_name = "EVENT")]
        events: Vec<String>,

        /// Event type to remove (repeatable)
        #[arg(long = "remove-event", value_name = "EVENT")]
        remove_events: Vec<String>,
    },

    /// Delete a webhook endpoint
    Delete {
        /// Webhook ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_repeated_events() {
        let cli = Cli::try_parse_from([
            "access-webhooks",
            "add",
            "--name",
            "Front Door",
            "--endpoint",
            "https://example.com/hook",
            "--event",
            "access.door.unlock",
            "--event",
            "access.doorbell.incoming",
        ])
        .unwrap();

        match cli.command {
            Commands::Add { name, endpoint, events } => {
                assert_eq!(name, "Front Door");
                assert_eq!(endpoint, "https://example.com/hook");
                assert_eq!(events, vec!["access.door.unlock", "access.doorbell.incoming"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::try_parse_from([
            "access-webhooks",
            "edit",
            "wh-1",
            "--remove-event",
            "access.door.unlock",
        ])
        .unwrap();

        match cli.command {
            Commands::Edit { id, name, events, remove_events, .. } => {
                assert_eq!(id, "wh-1");
                assert!(name.is_none());
                assert!(events.is_empty());
                assert_eq!(remove_events, vec!["access.door.unlock"]);
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_list_defaults_to_table() {
        let cli = Cli::try_parse_from(["access-webhooks", "list"]).unwrap();
        match cli.command {
            Commands::List { format } => assert_eq!(format, OutputFormat::Table),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_global_host_after_subcommand() {
        let cli = Cli::try_parse_from([
            "access-webhooks",
            "events",
            "--host",
            "https://controller:12445",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("https://controller:12445"));
    }
}
