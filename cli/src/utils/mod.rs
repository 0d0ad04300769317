//! Shared helpers for the queuectl CLI

pub mod formatting;
