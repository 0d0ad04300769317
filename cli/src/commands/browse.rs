//! Browse command implementation

use crate::utils::formatting::{CommandOutput, Table, BROWSE_HEADERS};
use anyhow::Result;
use queuectl_sdk::{
    api_types::paths, available_products, filter_by_source, parse_source_filter,
    EventSubscriptionEventSpec, Fetcher, ProductRegistry, RequestInit,
};
use tracing::info;

/// Execute the browse command
///
/// Lists every (service, event) pair that is both registered locally and
/// reported by the server catalog, optionally narrowed by `--source`.
///
/// # Errors
/// Returns error if the event catalog cannot be fetched
pub async fn execute<C: Fetcher>(
    client: &C,
    registry: &ProductRegistry<'_>,
    account_id: &str,
    source: Option<&str>,
) -> Result<CommandOutput> {
    info!("Fetching event catalog for account: {}", account_id);

    let catalog: Vec<EventSubscriptionEventSpec> = client
        .fetch_result(&paths::events_catalog(account_id), RequestInit::get())
        .await?;
    info!("Catalog reports {} products", catalog.len());

    let mut products = available_products(registry, &catalog);

    if let Some(source) = source.filter(|s| !s.is_empty()) {
        let tokens = parse_source_filter(source);
        products = filter_by_source(products, &tokens);
        info!("{} products match --source {}", products.len(), source);
    }

    if products.is_empty() {
        return Ok(CommandOutput::Table(Table::empty(BROWSE_HEADERS)));
    }

    let mut table = Table::new(BROWSE_HEADERS);
    for available in &products {
        for event in available.events {
            table.push_row(vec![
                available.product.name.to_string(),
                event.name.clone(),
                event.description.clone(),
            ]);
        }
    }

    Ok(CommandOutput::Table(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuectl_sdk::{mock::MockFetcher, HttpMethod, Product, SubscriptionBackend};
    use serde_json::json;

    const ACCOUNT: &str = "some-account-id";
    const CATALOG_PATH: &str = "/accounts/some-account-id/event_subscriptions/events";

    const TEST_PRODUCTS: &[Product] = &[
        Product {
            id: "p1",
            name: "Product One",
            resource: None,
            backend: SubscriptionBackend::Pending,
        },
        Product {
            id: "workersAI",
            name: "Workers AI",
            resource: None,
            backend: SubscriptionBackend::Pending,
        },
        Product {
            id: "p3",
            name: "Product Three",
            resource: None,
            backend: SubscriptionBackend::Pending,
        },
    ];

    fn mock_with_catalog(catalog: serde_json::Value) -> MockFetcher {
        let mock = MockFetcher::new();
        mock.respond_ok(HttpMethod::Get, CATALOG_PATH, catalog);
        mock
    }

    fn rows(output: CommandOutput) -> Vec<Vec<String>> {
        match output {
            CommandOutput::Table(table) => table.rows().to_vec(),
            CommandOutput::Message(message) => panic!("expected table, got message: {message}"),
        }
    }

    fn registry() -> ProductRegistry<'static> {
        ProductRegistry::new(TEST_PRODUCTS).unwrap()
    }

    #[tokio::test]
    async fn test_browse_single_product() {
        let mock = mock_with_catalog(json!([
            { "id": "p1", "events": [{ "name": "e1", "description": "E1" }] }
        ]));

        let output = execute(&mock, &registry(), ACCOUNT, None).await.unwrap();

        assert_eq!(rows(output), vec![vec!["Product One", "e1", "E1"]]);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_browse_preserves_registry_and_event_order() {
        let mock = mock_with_catalog(json!([
            { "id": "p3", "events": [{ "name": "c", "description": "C" }] },
            { "id": "p1", "events": [
                { "name": "b", "description": "B" },
                { "name": "a", "description": "A" }
            ] }
        ]));

        let output = execute(&mock, &registry(), ACCOUNT, None).await.unwrap();

        assert_eq!(
            rows(output),
            vec![
                vec!["Product One", "b", "B"],
                vec!["Product One", "a", "A"],
                vec!["Product Three", "c", "C"],
            ]
        );
    }

    #[tokio::test]
    async fn test_browse_ignores_products_unknown_to_either_side() {
        let mock = mock_with_catalog(json!([
            { "id": "test-product-id", "events": [{ "name": "event-1", "description": "Test event 1" }] },
            { "id": "p3", "events": [] }
        ]));

        let output = execute(&mock, &registry(), ACCOUNT, None).await.unwrap();

        assert_eq!(rows(output), vec![vec!["", "", ""]]);
    }

    #[tokio::test]
    async fn test_browse_source_filter() {
        let catalog = json!([
            { "id": "p1", "events": [{ "name": "e1", "description": "E1" }] },
            { "id": "workersAI", "events": [{ "name": "e2", "description": "E2" }] },
            { "id": "p3", "events": [{ "name": "e3", "description": "E3" }] }
        ]);

        let mock = mock_with_catalog(catalog.clone());
        let output = execute(&mock, &registry(), ACCOUNT, Some(" WORKERSAI , product three"))
            .await
            .unwrap();
        assert_eq!(
            rows(output),
            vec![vec!["Workers AI", "e2", "E2"], vec!["Product Three", "e3", "E3"]]
        );

        let mock = mock_with_catalog(catalog.clone());
        let output = execute(&mock, &registry(), ACCOUNT, Some("workers ai"))
            .await
            .unwrap();
        assert_eq!(rows(output), vec![vec!["Workers AI", "e2", "E2"]]);

        let mock = mock_with_catalog(catalog);
        let output = execute(&mock, &registry(), ACCOUNT, Some("nothing"))
            .await
            .unwrap();
        assert_eq!(rows(output), vec![vec!["", "", ""]]);
    }

    #[tokio::test]
    async fn test_browse_empty_source_does_not_filter() {
        let mock = mock_with_catalog(json!([
            { "id": "p1", "events": [{ "name": "e1", "description": "E1" }] }
        ]));

        let output = execute(&mock, &registry(), ACCOUNT, Some("")).await.unwrap();
        assert_eq!(rows(output), vec![vec!["Product One", "e1", "E1"]]);
    }

    #[tokio::test]
    async fn test_browse_whitespace_source_matches_nothing() {
        let mock = mock_with_catalog(json!([
            { "id": "p1", "events": [{ "name": "e1", "description": "E1" }] }
        ]));

        let output = execute(&mock, &registry(), ACCOUNT, Some("  ")).await.unwrap();
        assert_eq!(rows(output), vec![vec!["", "", ""]]);

        let mock = mock_with_catalog(json!([
            { "id": "p1", "events": [{ "name": "e1", "description": "E1" }] }
        ]));
        let output = execute(&mock, &registry(), ACCOUNT, Some("p1, ,"))
            .await
            .unwrap();
        assert_eq!(rows(output), vec![vec!["Product One", "e1", "E1"]]);
    }

    #[tokio::test]
    async fn test_browse_empty_catalog() {
        let mock = mock_with_catalog(json!([]));
        let output = execute(&mock, &registry(), ACCOUNT, None).await.unwrap();
        assert_eq!(rows(output), vec![vec!["", "", ""]]);
    }

    #[tokio::test]
    async fn test_browse_propagates_api_failure() {
        let mock = MockFetcher::new();
        mock.respond_error(HttpMethod::Get, CATALOG_PATH, 10000, "Authentication error");

        let error = execute(&mock, &registry(), ACCOUNT, None).await.unwrap_err();
        assert!(error.to_string().contains("Authentication error"));
    }
}
