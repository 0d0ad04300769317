//! Product registry
//!
//! Each [`Product`] is a platform capability that can emit events into a queue.
//! The registry is compiled-in data: it says *how* to create a subscription for a
//! product, while the server catalog (see [`crate::catalog`]) says *whether* the
//! product is subscribable right now.
//!
//! Product ids must match the ids the queue broker reports in its event catalog.

use crate::{
    api_types::{paths, CreateSubscriptionArgs, CreatedSubscription},
    client::{Fetcher, HttpMethod, RequestInit},
    error::{QueuectlError, Result},
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Built-in products, in display order
pub const PRODUCTS: &[Product] = &[
    Product {
        id: "clipboards",
        name: "Clipboards",
        resource: Some(ResourceSpec { name: "clipboard" }),
        backend: SubscriptionBackend::Clipboard,
    },
    Product {
        id: "workersAI",
        name: "Workers AI",
        resource: None,
        backend: SubscriptionBackend::Pending,
    },
    Product {
        id: "workersBuilds",
        name: "Workers Builds",
        resource: Some(ResourceSpec { name: "Worker" }),
        backend: SubscriptionBackend::Pending,
    },
    Product {
        id: "workflows",
        name: "Workflows",
        resource: Some(ResourceSpec { name: "Workflow" }),
        backend: SubscriptionBackend::Pending,
    },
];

/// Sub-resource a product's subscriptions are scoped to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Human name of the resource kind, used in error messages
    pub name: &'static str,
}

/// How a product creates subscriptions on its own backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionBackend {
    /// `POST /accounts/{account}/clipboard/subscriptions`
    Clipboard,
    /// Server-side creation flow does not exist yet; resolves to an empty id
    /// without touching the network
    Pending,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClipboardSubscriptionBody<'a> {
    name: &'a str,
    clipboard_id: &'a str,
    queue_id: &'a str,
    events: &'a [String],
}

impl SubscriptionBackend {
    /// Create a subscription through this backend
    ///
    /// # Errors
    /// Returns any error raised by the fetcher
    pub async fn create_subscription<C: Fetcher>(
        self,
        client: &C,
        args: &CreateSubscriptionArgs,
    ) -> Result<CreatedSubscription> {
        match self {
            Self::Clipboard => {
                let body = ClipboardSubscriptionBody {
                    name: &args.name,
                    clipboard_id: &args.resource_id,
                    queue_id: &args.queue_id,
                    events: &args.events,
                };
                let init = RequestInit::with_json(HttpMethod::Post, &body)?;
                client
                    .fetch_result(&paths::clipboard_subscriptions(&args.account_id), init)
                    .await
            }
            Self::Pending => {
                debug!("Subscription creation is not available yet; returning placeholder id");
                Ok(CreatedSubscription { id: String::new() })
            }
        }
    }
}

/// A product that can emit events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Product {
    /// Stable machine key, also accepted as a `--source` token
    pub id: &'static str,
    /// Display name, accepted case-insensitively as a filter token
    pub name: &'static str,
    /// When present, a resource id is mandatory on create
    pub resource: Option<ResourceSpec>,
    pub backend: SubscriptionBackend,
}

impl Product {
    #[must_use]
    pub const fn requires_resource(&self) -> bool {
        self.resource.is_some()
    }

    /// Create a subscription for this product
    ///
    /// # Errors
    /// Returns any error raised by the product backend
    pub async fn create_subscription<C: Fetcher>(
        &self,
        client: &C,
        args: &CreateSubscriptionArgs,
    ) -> Result<CreatedSubscription> {
        info!("Creating {} subscription '{}'", self.id, args.name);
        self.backend.create_subscription(client, args).await
    }
}

/// Ordered, immutable collection of products with unique ids
#[derive(Clone, Copy, Debug)]
pub struct ProductRegistry<'a> {
    products: &'a [Product],
}

impl ProductRegistry<'static> {
    /// The compiled-in registry
    #[must_use]
    pub const fn builtin() -> Self {
        Self { products: PRODUCTS }
    }
}

impl Default for ProductRegistry<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> ProductRegistry<'a> {
    /// Build a registry over `products`
    ///
    /// # Errors
    /// Returns an error if two products share an id
    pub fn new(products: &'a [Product]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in products {
            if !seen.insert(product.id) {
                return Err(QueuectlError::Generic(format!(
                    "Duplicate product id in registry: {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Exact lookup by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&'a Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + 'a {
        let products = self.products;
        products.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
