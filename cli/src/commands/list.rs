//! List subscriptions command implementation

use crate::utils::formatting::{subscriptions_table, CommandOutput};
use anyhow::Result;
use queuectl_sdk::{api_types::paths, EventSubscription, Fetcher, RequestInit};
use tracing::info;

/// Execute the list command
///
/// # Errors
/// Returns error if the subscriptions cannot be fetched
pub async fn execute<C: Fetcher>(client: &C, account_id: &str) -> Result<CommandOutput> {
    info!("Listing event subscriptions for account: {}", account_id);

    let subscriptions: Vec<EventSubscription> = client
        .fetch_result(&paths::subscriptions(account_id), RequestInit::get())
        .await?;

    info!("Found {} event subscriptions", subscriptions.len());

    Ok(CommandOutput::Table(subscriptions_table(&subscriptions)))
}
