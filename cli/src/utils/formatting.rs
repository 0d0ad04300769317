//! Output formatting utilities for the queuectl CLI

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use queuectl_sdk::EventSubscription;
use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid output format: {s}")),
        }
    }
}

/// What a command produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutput {
    Table(Table),
    Message(String),
}

impl CommandOutput {
    /// Render for the terminal
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match (self, format) {
            (Self::Table(table), OutputFormat::Human) => Ok(table.render_human()),
            (Self::Table(table), OutputFormat::Json) => table.render_json(),
            (Self::Message(message), OutputFormat::Human) => Ok(message.clone()),
            (Self::Message(message), OutputFormat::Json) => {
                serde_json::to_string_pretty(&serde_json::json!({ "message": message }))
                    .map_err(|e| anyhow!("Failed to serialize message to JSON: {e}"))
            }
        }
    }
}

/// Rows of string cells under fixed headers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Table holding a single all-empty row, the "nothing to show" marker
    #[must_use]
    pub fn empty(headers: &[&'static str]) -> Self {
        let mut table = Self::new(headers);
        table.push_row(vec![String::new(); headers.len()]);
        table
    }

    /// Append a row; missing cells are padded with empty strings
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    #[must_use]
    pub fn headers(&self) -> &[&'static str] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// True when every row is the empty marker
    #[must_use]
    pub fn is_empty_marker(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(String::is_empty))
    }

    /// Aligned, space-padded rendering with a dashed separator
    #[must_use]
    pub fn render_human(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_line(self.headers.iter().copied(), &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(format_line(row.iter().map(String::as_str), &widths));
        }
        lines.join("\n")
    }

    /// Array of objects keyed by header
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails
    pub fn render_json(&self) -> Result<String> {
        let json_rows: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| ((*header).to_string(), Value::String(cell.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect();

        serde_json::to_string_pretty(&json_rows)
            .map_err(|e| anyhow!("Failed to serialize table to JSON: {e}"))
    }
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// Headers of the browse table
pub const BROWSE_HEADERS: &[&str] = &["service", "event", "description"];

/// Headers shared by list, get, create and update
pub const SUBSCRIPTION_HEADERS: &[&str] = &["id", "name", "source", "destination", "events"];

/// One subscription as displayed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionInfo {
    pub id: String,
    pub name: String,
    pub source: String,
    pub destination: String,
    pub events: String,
}

impl SubscriptionInfo {
    #[must_use]
    pub fn into_cells(self) -> Vec<String> {
        vec![self.id, self.name, self.source, self.destination, self.events]
    }
}

impl From<&EventSubscription> for SubscriptionInfo {
    fn from(subscription: &EventSubscription) -> Self {
        Self {
            id: subscription.id.clone(),
            name: subscription.name.clone(),
            source: subscription.source(),
            destination: subscription.destination(),
            events: subscription.events.join(", "),
        }
    }
}

/// Table with one row per subscription, or the empty marker when there are none
#[must_use]
pub fn subscriptions_table(subscriptions: &[EventSubscription]) -> Table {
    if subscriptions.is_empty() {
        return Table::empty(SUBSCRIPTION_HEADERS);
    }

    let mut table = Table::new(SUBSCRIPTION_HEADERS);
    for subscription in subscriptions {
        table.push_row(SubscriptionInfo::from(subscription).into_cells());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription() -> EventSubscription {
        serde_json::from_value(serde_json::json!({
            "id": "test-subscription-id",
            "name": "test-subscription",
            "product_id": "test-product-id",
            "resource_id": "test-resource-id",
            "queue_id": "test-queue-id",
            "queue_name": "test-queue-name",
            "events": ["e1", "e2"]
        }))
        .unwrap()
    }

    #[test]
    fn test_subscription_info_projection() {
        let info = SubscriptionInfo::from(&subscription());
        assert_eq!(info.id, "test-subscription-id");
        assert_eq!(info.source, "test-product-id.test-resource-id");
        assert_eq!(info.destination, "queues.test-queue-name");
        assert_eq!(info.events, "e1, e2");
    }

    #[test]
    fn test_empty_subscriptions_table_has_one_blank_row() {
        let table = subscriptions_table(&[]);
        assert_eq!(table.rows().len(), 1);
        assert!(table.is_empty_marker());
        assert_eq!(table.rows()[0], vec![String::new(); 5]);
    }

    #[test]
    fn test_render_human_aligns_columns() {
        let mut table = Table::new(&["a", "long header"]);
        table.push_row(vec!["value".to_string(), "x".to_string()]);

        assert_eq!(
            table.render_human(),
            "a      long header\n-----  -----------\nvalue  x"
        );
    }

    #[test]
    fn test_render_human_empty_marker() {
        let rendered = Table::empty(&["id", "name"]).render_human();
        assert_eq!(rendered, "id  name\n--  ----\n");
    }

    #[test]
    fn test_render_json() {
        let table = subscriptions_table(&[subscription()]);
        let parsed: Value = serde_json::from_str(&table.render_json().unwrap()).unwrap();
        assert_eq!(parsed[0]["source"], "test-product-id.test-resource-id");
        assert_eq!(parsed[0]["events"], "e1, e2");
    }

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut table = Table::new(&["a", "b"]);
        table.push_row(vec!["1".to_string()]);
        assert_eq!(table.rows()[0], ["1", ""]);
    }

    #[test]
    fn test_message_output() {
        let output = CommandOutput::Message("Event subscription deleted!".to_string());
        assert_eq!(
            output.render(OutputFormat::Human).unwrap(),
            "Event subscription deleted!"
        );
        let json: Value = serde_json::from_str(&output.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["message"], "Event subscription deleted!");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
