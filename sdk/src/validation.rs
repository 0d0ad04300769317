//! Validation utilities for event subscription arguments
//!
//! Everything here runs before any request is made.

use crate::{
    error::{QueuectlError, Result},
    products::{Product, ProductRegistry},
};
use std::collections::HashSet;

/// A validated `--source` value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionSource<'a> {
    pub product: &'a Product,
    /// Empty when the product has no resource concept and none was given
    pub resource_id: &'a str,
}

/// Parse `<productId>` or `<productId>.<resourceId>` against the registry
///
/// The value is split on the first `.`. A resource id is required when the
/// product declares a resource and ignored by validation otherwise.
///
/// # Errors
/// Returns `QueuectlError::InvalidArgument` for an unknown product id or a
/// missing resource id
pub fn parse_source<'a>(
    registry: &ProductRegistry<'a>,
    source: &'a str,
) -> Result<SubscriptionSource<'a>> {
    let (product_id, resource_id) = source.split_once('.').unwrap_or((source, ""));

    let product = registry.find(product_id).ok_or_else(|| {
        let known: Vec<_> = registry.iter().map(|p| p.id).collect();
        QueuectlError::InvalidArgument(format!(
            "Invalid source '{source}': unknown service '{product_id}'. Expected one of: {}. \
             Use `event-subscriptions browse` to see available services and events.",
            known.join(", ")
        ))
    })?;

    if let Some(resource) = product.resource {
        if resource_id.is_empty() {
            return Err(QueuectlError::InvalidArgument(format!(
                "Invalid source '{source}': service '{product_id}' requires a {} ID. \
                 Use --source {product_id}.<{} ID>",
                resource.name, resource.name
            )));
        }
    }

    Ok(SubscriptionSource {
        product,
        resource_id,
    })
}

/// Split a comma-separated event list, trimming each name and dropping empties
#[must_use]
pub fn parse_event_list(events: &str) -> Vec<String> {
    events
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// [`parse_event_list`] that requires at least one event
///
/// # Errors
/// Returns `QueuectlError::InvalidArgument` if no event names remain
pub fn require_events(events: &str) -> Result<Vec<String>> {
    let parsed = parse_event_list(events);
    if parsed.is_empty() {
        return Err(QueuectlError::InvalidArgument(format!(
            "Invalid events '{events}': at least one event name is required"
        )));
    }
    Ok(parsed)
}

/// Lowercased, trimmed `--source` filter tokens for browse; empty tokens are dropped
#[must_use]
pub fn parse_source_filter(source: &str) -> HashSet<String> {
    source
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Require a non-blank value for a named argument
///
/// # Errors
/// Returns `QueuectlError::InvalidArgument` if `value` is blank
pub fn require_non_empty<'v>(argument: &str, value: &'v str) -> Result<&'v str> {
    if value.trim().is_empty() {
        return Err(QueuectlError::InvalidArgument(format!(
            "Missing value for {argument}"
        )));
    }
    Ok(value)
}
