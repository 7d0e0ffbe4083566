//! CLI command handlers

pub mod commands;

pub use commands::{extract, run, sheets, ExtractArgs};
