//! Delete subscription command implementation

use crate::utils::formatting::CommandOutput;
use anyhow::Result;
use queuectl_sdk::{api_types::paths, require_non_empty, Fetcher, RequestInit};
use tracing::info;

/// Confirmation printed after a successful delete
pub const DELETED_MESSAGE: &str = "Event subscription deleted!";

/// Execute the delete command
///
/// # Errors
/// Returns error if the id is blank or the API rejects the delete
pub async fn execute<C: Fetcher>(client: &C, account_id: &str, id: &str) -> Result<CommandOutput> {
    let id = require_non_empty("subscription id", id)?;
    info!("Deleting event subscription: {}", id);

    // The success body carries nothing useful
    let _: serde_json::Value = client
        .fetch_result(&paths::subscription(account_id, id), RequestInit::delete())
        .await?;

    Ok(CommandOutput::Message(DELETED_MESSAGE.to_string()))
}
