//! CLI library components for the extract preparation tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod progress;
pub mod summary;
