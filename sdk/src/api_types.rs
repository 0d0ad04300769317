//! API request and response types for event subscriptions

use crate::error::{ApiErrorItem, QueuectlError, Result};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Page size requested when listing subscriptions
pub const LIST_PAGE_SIZE: u32 = 100;

/// Uniform response wrapper returned by every API endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl Envelope {
    /// Unwrap the envelope and decode its result as `T`
    ///
    /// A missing or `null` result is decoded as JSON `null`, so result types that
    /// accept `null` (`serde_json::Value`, `Option<_>`) succeed without one.
    ///
    /// # Errors
    /// Returns `QueuectlError::Api` when `success` is false and
    /// `QueuectlError::MissingResult` when the result is absent but `T` requires one
    pub fn into_result<T: DeserializeOwned>(self, path: &str) -> Result<T> {
        if !self.success {
            return Err(QueuectlError::Api {
                errors: self.errors,
            });
        }
        match self.result {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                QueuectlError::MissingResult {
                    path: path.to_string(),
                }
            }),
        }
    }
}

/// Server-side subscription record routing product events into a queue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubscription {
    /// Server-assigned identifier
    pub id: String,
    /// Operator-chosen label
    pub name: String,
    /// Whether events are currently being forwarded
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modified_at: String,
    /// Product the events originate from
    pub product_id: String,
    /// Sub-resource within the product; empty for resource-less products
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queue_id: String,
    /// Display form of `queue_id`, resolved by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub queue_name: String,
    /// Forwarded event names
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<String>,
}

const fn default_enabled() -> bool {
    true
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventSubscription {
    /// `<product_id>.<resource_id>` display form
    #[must_use]
    pub fn source(&self) -> String {
        format!("{}.{}", self.product_id, self.resource_id)
    }

    /// `queues.<queue_name>` display form
    #[must_use]
    pub fn destination(&self) -> String {
        format!("queues.{}", self.queue_name)
    }
}

/// An event a product can emit, as reported by the server catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Server catalog entry: which events a product exposes right now
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubscriptionEventSpec {
    /// Product id, matched against the local product registry
    pub id: String,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

/// Result of a product-specific subscription creation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSubscription {
    pub id: String,
}

/// Arguments handed to a product's creation strategy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateSubscriptionArgs {
    pub account_id: String,
    pub name: String,
    /// Empty when the product has no resource concept
    pub resource_id: String,
    pub queue_id: String,
    pub events: Vec<String>,
}

/// Partial update body; omitted fields are left unchanged by the server
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSubscriptionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
}

impl UpdateSubscriptionBody {
    /// True when the update would not change anything
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.events.is_none()
    }
}

/// Path helpers for the event subscription endpoints
pub mod paths {
    use super::LIST_PAGE_SIZE;

    #[must_use]
    pub fn events_catalog(account_id: &str) -> String {
        format!("/accounts/{account_id}/event_subscriptions/events")
    }

    #[must_use]
    pub fn subscriptions(account_id: &str) -> String {
        format!("/accounts/{account_id}/event_subscriptions/subscriptions?per_page={LIST_PAGE_SIZE}")
    }

    #[must_use]
    pub fn subscription(account_id: &str, id: &str) -> String {
        format!("/accounts/{account_id}/event_subscriptions/subscriptions/{id}")
    }

    #[must_use]
    pub fn clipboard_subscriptions(account_id: &str) -> String {
        format!("/accounts/{account_id}/clipboard/subscriptions")
    }
}
