//! CLI library components for the data lake tools.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
