//! queuectl - Command-line interface for queue event subscriptions
//!
//! Event subscriptions forward events emitted by platform products into a queue.
//! This tool browses the available events and manages subscriptions.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use queuectl::{
    commands::{self, create::CreateRequest, update::UpdateRequest},
    CommandOutput, OutputFormat, QueuectlConfig,
};
use queuectl_sdk::{ApiClient, ProductRegistry};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "queuectl",
    version,
    about = "Command-line interface for queue event subscriptions"
)]
struct Cli {
    /// API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Account that owns the event subscriptions
    #[arg(long, global = true)]
    account_id: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage Event Subscriptions
    #[command(name = "event-subscriptions", alias = "event-subscription")]
    EventSubscriptions {
        #[command(subcommand)]
        command: EventSubscriptionCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EventSubscriptionCommands {
    /// List available services and events
    Browse {
        /// Filter by service id or name (comma-separated)
        #[arg(long)]
        source: Option<String>,
    },

    /// List configured Event Subscriptions
    List,

    /// Fetch details about a single Event Subscription
    Get {
        /// ID of the Event Subscription
        id: String,
    },

    /// Create a new Event Subscription. Use `event-subscriptions browse` to see available services and events.
    Create {
        /// Name of the Event Subscription
        name: String,

        /// <Service>.<Resource> to subscribe to
        #[arg(long)]
        source: String,

        /// ID of the Queue to send events to
        #[arg(long)]
        destination: String,

        /// Names of events to subscribe to (comma-separated)
        #[arg(long)]
        events: String,
    },

    /// Update an Event Subscription
    Update {
        /// ID of the Event Subscription
        id: String,

        /// Name to set
        #[arg(long)]
        name: Option<String>,

        /// Names of events to subscribe to (comma-separated)
        #[arg(long)]
        events: Option<String>,
    },

    /// Delete an Event Subscription
    Delete {
        /// ID of the Event Subscription
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = QueuectlConfig::new().with_overrides(cli.api_url.as_deref(), cli.account_id.as_deref());

    let output_format = match cli.output {
        Some(format) => format,
        None => config.default_output_format.parse()?,
    };

    let result = tokio::select! {
        result = execute_command(&cli, &config) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            std::process::exit(130);
        }
    };

    match result.and_then(|output| output.render(output_format)) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            match output_format {
                OutputFormat::Human => eprintln!("Error: {e}"),
                OutputFormat::Json => {
                    let json_output = serde_json::json!({
                        "success": false,
                        "error": e.to_string()
                    });
                    println!("{}", serde_json::to_string_pretty(&json_output)?);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Resolve credentials and build the API client
fn connect(config: &QueuectlConfig) -> Result<(ApiClient, String)> {
    let account_id = config.require_account_id()?.to_string();
    let api_token = config.require_api_token()?;
    let client = ApiClient::with_timeout(
        config.api_url()?.as_str(),
        api_token,
        config.request_timeout(),
    )?;
    debug!("Using API at {} for account {}", client.base_url(), account_id);
    Ok((client, account_id))
}

async fn execute_command(cli: &Cli, config: &QueuectlConfig) -> Result<CommandOutput> {
    let registry = ProductRegistry::builtin();

    let Commands::EventSubscriptions { command } = &cli.command;
    match command {
        EventSubscriptionCommands::Browse { source } => {
            let (client, account_id) = connect(config)?;
            commands::execute_browse(&client, &registry, &account_id, source.as_deref()).await
        }

        EventSubscriptionCommands::List => {
            let (client, account_id) = connect(config)?;
            commands::execute_list(&client, &account_id).await
        }

        EventSubscriptionCommands::Get { id } => {
            let (client, account_id) = connect(config)?;
            commands::execute_get(&client, &account_id, id).await
        }

        EventSubscriptionCommands::Create {
            name,
            source,
            destination,
            events,
        } => {
            let request = CreateRequest {
                name,
                source,
                destination,
                events,
            };
            // Argument errors are reported before credentials are checked
            let validated = commands::create::validate(&registry, &request)?;
            let (client, account_id) = connect(config)?;
            commands::execute_create(&client, &account_id, &validated).await
        }

        EventSubscriptionCommands::Update { id, name, events } => {
            let request = UpdateRequest {
                id,
                name: name.as_deref(),
                events: events.as_deref(),
            };
            let (client, account_id) = connect(config)?;
            commands::execute_update(&client, &account_id, &request).await
        }

        EventSubscriptionCommands::Delete { id } => {
            let (client, account_id) = connect(config)?;
            commands::execute_delete(&client, &account_id, id).await
        }
    }
}
