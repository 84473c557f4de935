//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by
//! main.rs. Each handler implements the business logic for a specific CLI
//! subcommand.

mod all_pairs;
mod build;
mod query;
mod sensitivity;

pub use all_pairs::run_all_pairs;
pub use build::run_build;
pub use query::run_query;
pub use sensitivity::run_sensitivity;
