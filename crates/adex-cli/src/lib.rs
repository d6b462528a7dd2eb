//! Library components of the `adex-audit` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
