//! CLI parse: clap types for multilog. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Multilog CLI - session log host for multiplayer servers
#[derive(Parser, Debug)]
#[command(name = "multilog")]
#[command(about = "Session-scoped, timestamped event log for multiplayer servers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable diagnostic logging
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a session: open the log, poll for uptime reports, close it
    Run(RunArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Seconds to keep the session open (0 opens and closes immediately)
    #[arg(long, default_value_t = 0)]
    pub duration: u64,

    /// Milliseconds between polls of the uptime reporter
    #[arg(long, default_value_t = 1000)]
    pub tick_ms: u64,

    /// Session log file (overrides session.file)
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Seconds between uptime reports (overrides session.report_interval_secs)
    #[arg(long)]
    pub report_interval_secs: Option<u64>,

    /// Product name for banners (overrides session.product)
    #[arg(long)]
    pub product: Option<String>,

    /// Mirror session lines to this terminal
    #[arg(long)]
    pub interactive: bool,

    /// Run as a dedicated server (adds tracker diagnostics)
    #[arg(long)]
    pub headless: bool,

    /// Echo session lines to the diagnostic log
    #[arg(long)]
    pub echo: bool,
}
