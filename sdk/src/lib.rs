//! queuectl SDK - event subscriptions for platform queues
//!
//! Event subscriptions route named events emitted by platform products into a
//! queue. This crate provides:
//!
//! - The [`Fetcher`] seam and its `reqwest` implementation, [`ApiClient`]
//! - The compiled-in [`ProductRegistry`] and per-product creation strategies
//! - Argument validation for `--source` and `--events`
//! - The browse merge between the registry and the server event catalog
//!
//! # Example Usage
//!
//! ```no_run
//! use queuectl_sdk::{api_types::paths, ApiClient, EventSubscription, Fetcher, RequestInit};
//!
//! # async fn run() -> queuectl_sdk::Result<()> {
//! let client = ApiClient::new("https://api.cloudflare.com/client/v4", "api-token")?;
//! let subscriptions: Vec<EventSubscription> = client
//!     .fetch_result(&paths::subscriptions("account-id"), RequestInit::get())
//!     .await?;
//!
//! for subscription in subscriptions {
//!     println!("{} -> {}", subscription.source(), subscription.destination());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod api_types;
pub mod catalog;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock-client"))]
pub mod mock;
pub mod products;
pub mod validation;

// Re-export commonly used items
pub use api_types::{
    CreateSubscriptionArgs, CreatedSubscription, Envelope, EventSpec, EventSubscription,
    EventSubscriptionEventSpec, UpdateSubscriptionBody, LIST_PAGE_SIZE,
};
pub use catalog::{available_products, filter_by_source, AvailableProduct};
pub use client::{ApiClient, Fetcher, HttpMethod, RequestInit};
pub use error::{ApiErrorItem, QueuectlError, Result};
pub use products::{Product, ProductRegistry, ResourceSpec, SubscriptionBackend, PRODUCTS};
pub use validation::{
    parse_event_list, parse_source, parse_source_filter, require_events, require_non_empty,
    SubscriptionSource,
};
