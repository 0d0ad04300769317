//! Update subscription command implementation

use crate::utils::formatting::{subscriptions_table, CommandOutput};
use anyhow::Result;
use queuectl_sdk::{
    api_types::paths, parse_event_list, require_non_empty, EventSubscription, Fetcher,
    HttpMethod, RequestInit, UpdateSubscriptionBody,
};
use tracing::{info, warn};

/// Arguments for updating a subscription
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateRequest<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    /// Comma-separated event names
    pub events: Option<&'a str>,
}

/// Build the partial update body
///
/// An omitted `--events` leaves events unchanged. An `--events` value that
/// yields no names is treated the same way rather than clearing the list.
#[must_use]
pub fn build_body(request: &UpdateRequest<'_>) -> UpdateSubscriptionBody {
    let events = request.events.and_then(|raw| {
        let parsed = parse_event_list(raw);
        if parsed.is_empty() {
            warn!("--events '{}' contains no event names; leaving events unchanged", raw);
            None
        } else {
            Some(parsed)
        }
    });

    UpdateSubscriptionBody {
        name: request.name.map(ToString::to_string),
        events,
    }
}

/// Execute the update command
///
/// # Errors
/// Returns error if the id is blank or the API rejects the update
pub async fn execute<C: Fetcher>(
    client: &C,
    account_id: &str,
    request: &UpdateRequest<'_>,
) -> Result<CommandOutput> {
    let id = require_non_empty("subscription id", request.id)?;
    let body = build_body(request);
    if body.is_empty() {
        warn!("Neither --name nor --events given; sending an empty update");
    }
    info!("Updating event subscription: {}", id);

    let subscription: EventSubscription = client
        .fetch_result(
            &paths::subscription(account_id, id),
            RequestInit::with_json(HttpMethod::Patch, &body)?,
        )
        .await?;

    Ok(CommandOutput::Table(subscriptions_table(
        std::slice::from_ref(&subscription),
    )))
}
