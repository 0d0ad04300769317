//! Reconciles the local product registry with the server event catalog

use crate::{
    api_types::{EventSpec, EventSubscriptionEventSpec},
    products::{Product, ProductRegistry},
};
use std::collections::HashSet;

/// A registered product together with the events the server exposes for it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableProduct<'a> {
    pub product: &'a Product,
    pub events: &'a [EventSpec],
}

impl AvailableProduct<'_> {
    /// True when any token equals the lowercased id or lowercased name
    #[must_use]
    pub fn matches_any(&self, tokens: &HashSet<String>) -> bool {
        tokens.contains(&self.product.id.to_lowercase())
            || tokens.contains(&self.product.name.to_lowercase())
    }
}

/// Join registry products with catalog entries by product id
///
/// Registry order is kept. Products missing from the catalog, or reported with
/// no events, are dropped.
#[must_use]
pub fn available_products<'a>(
    registry: &ProductRegistry<'a>,
    catalog: &'a [EventSubscriptionEventSpec],
) -> Vec<AvailableProduct<'a>> {
    registry
        .iter()
        .filter_map(|product| {
            let spec = catalog.iter().find(|spec| spec.id == product.id)?;
            if spec.events.is_empty() {
                return None;
            }
            Some(AvailableProduct {
                product,
                events: &spec.events,
            })
        })
        .collect()
}

/// Keep products whose id or name matches one of the lowercased `tokens`
#[must_use]
pub fn filter_by_source<'a>(
    products: Vec<AvailableProduct<'a>>,
    tokens: &HashSet<String>,
) -> Vec<AvailableProduct<'a>> {
    products
        .into_iter()
        .filter(|p| p.matches_any(tokens))
        .collect()
}
