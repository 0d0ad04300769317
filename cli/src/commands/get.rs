//! Get subscription command implementation

use crate::utils::formatting::{subscriptions_table, CommandOutput};
use anyhow::Result;
use queuectl_sdk::{api_types::paths, require_non_empty, EventSubscription, Fetcher, RequestInit};
use tracing::info;

/// Execute the get command
///
/// Not-found is whatever the API envelope reports; it surfaces as an error.
///
/// # Errors
/// Returns error if the id is blank or the subscription cannot be fetched
pub async fn execute<C: Fetcher>(client: &C, account_id: &str, id: &str) -> Result<CommandOutput> {
    let id = require_non_empty("subscription id", id)?;
    info!("Fetching event subscription: {}", id);

    let subscription: EventSubscription = client
        .fetch_result(&paths::subscription(account_id, id), RequestInit::get())
        .await?;

    Ok(CommandOutput::Table(subscriptions_table(
        std::slice::from_ref(&subscription),
    )))
}
