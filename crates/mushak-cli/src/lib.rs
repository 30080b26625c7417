//! CLI library components for the Mushak importer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
