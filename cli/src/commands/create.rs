//! Create subscription command implementation
//!
//! Validation runs before credentials are resolved or any request is made.
//! Creation itself is delegated to the matched product's backend.

use crate::utils::formatting::{CommandOutput, Table, SUBSCRIPTION_HEADERS};
use anyhow::Result;
use queuectl_sdk::{
    parse_source, require_events, require_non_empty, CreateSubscriptionArgs, Fetcher,
    ProductRegistry, SubscriptionSource,
};
use tracing::info;

/// Arguments for creating a subscription, as given on the command line
#[derive(Clone, Copy, Debug)]
pub struct CreateRequest<'a> {
    pub name: &'a str,
    /// `<productId>` or `<productId>.<resourceId>`
    pub source: &'a str,
    /// Destination queue id
    pub destination: &'a str,
    /// Comma-separated event names
    pub events: &'a str,
}

/// A create request that passed validation
#[derive(Clone, Debug)]
pub struct ValidatedCreate<'a> {
    pub request: CreateRequest<'a>,
    pub source: SubscriptionSource<'a>,
    pub events: Vec<String>,
}

/// Validate a create request against the registry
///
/// # Errors
/// Returns error for a blank name or destination, an unknown product, a
/// missing resource id, or an event list with no names
pub fn validate<'a>(
    registry: &ProductRegistry<'a>,
    request: &CreateRequest<'a>,
) -> Result<ValidatedCreate<'a>> {
    require_non_empty("name", request.name)?;
    require_non_empty("--destination", request.destination)?;
    let source = parse_source(registry, request.source)?;
    let events = require_events(request.events)?;

    Ok(ValidatedCreate {
        request: *request,
        source,
        events,
    })
}

/// Execute the create command
///
/// # Errors
/// Returns error if the product backend rejects the subscription
pub async fn execute<C: Fetcher>(
    client: &C,
    account_id: &str,
    validated: &ValidatedCreate<'_>,
) -> Result<CommandOutput> {
    let request = &validated.request;
    info!(
        "Creating event subscription '{}' from {} to queue {}",
        request.name, request.source, request.destination
    );

    let args = CreateSubscriptionArgs {
        account_id: account_id.to_string(),
        name: request.name.to_string(),
        resource_id: validated.source.resource_id.to_string(),
        queue_id: request.destination.to_string(),
        events: validated.events.clone(),
    };
    let created = validated.source.product.create_subscription(client, &args).await?;

    info!("Created event subscription: {}", created.id);

    let mut table = Table::new(SUBSCRIPTION_HEADERS);
    table.push_row(vec![
        created.id,
        request.name.to_string(),
        request.source.to_string(),
        format!("queues.{}", request.destination),
        request.events.to_string(),
    ]);
    Ok(CommandOutput::Table(table))
}
