//! Command implementations for the queuectl CLI
//!
//! Each event subscription command lives in its own file. Commands are written
//! against the [`queuectl_sdk::Fetcher`] seam so tests can drive them with a mock.

pub mod browse;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

// Re-export command execution functions for easy access
pub use browse::execute as execute_browse;
pub use create::execute as execute_create;
pub use delete::execute as execute_delete;
pub use get::execute as execute_get;
pub use list::execute as execute_list;
pub use update::execute as execute_update;
