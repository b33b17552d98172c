//! Diagnostics settings
//!
//! Diagnostics are written to stderr so cart listings on stdout can be piped.

use clap::{Args, ValueEnum};

/// How diagnostics are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for a terminal.
    #[default]
    Compact,

    /// One JSON object per event, for log collectors.
    Json,
}

/// Diagnostics settings for `imports-cart`.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Which diagnostics to show, as a filter directive such as `warn` or
    /// `imports_app=debug`
    #[arg(short = 'l', long = "log", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    /// Rendering of diagnostics on stderr
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}
