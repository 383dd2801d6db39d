//! CLI subcommand implementations.

pub mod search;
pub mod transaction;
