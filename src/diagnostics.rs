//! Diagnostic snapshot written once at session start.

use crate::line::{Capabilities, LineSink, LogLine};
use serde::{Deserialize, Serialize};

/// Rendered in place of a value the host could not provide.
pub const UNKNOWN_PLACEHOLDER: &str = "<unknown>";

/// Rendered when the tracker is enabled but reports no channel.
pub const NO_CHANNEL_PLACEHOLDER: &str = "<none>";

pub const MISSING_CONFIG_WARNING: &str = "**  server configuration is missing!  **";

/// Presence tracker state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerInfo {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub channel: Option<String>,
}

/// Facts about the host process, sampled once when a session starts.
pub trait HostInfo {
    fn product_version(&self) -> Option<String>;
    fn protocol_version(&self) -> Option<u32>;
    /// Whether the server configuration was found.
    fn config_present(&self) -> bool;
    /// Human-readable, possibly multi-line, summary of startup options.
    fn startup_summary(&self) -> Option<String>;
    fn tracker(&self) -> TrackerInfo;
}

/// Host info given up front, e.g. from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticHostInfo {
    #[serde(default)]
    pub product_version: Option<String>,
    #[serde(default)]
    pub protocol_version: Option<u32>,
    #[serde(default = "default_true")]
    pub config_present: bool,
    #[serde(default)]
    pub startup_summary: Option<String>,
    #[serde(default)]
    pub tracker: TrackerInfo,
}

fn default_true() -> bool {
    true
}

impl Default for StaticHostInfo {
    fn default() -> Self {
        Self {
            product_version: None,
            protocol_version: None,
            config_present: default_true(),
            startup_summary: None,
            tracker: TrackerInfo::default(),
        }
    }
}

impl HostInfo for StaticHostInfo {
    fn product_version(&self) -> Option<String> {
        self.product_version.clone()
    }

    fn protocol_version(&self) -> Option<u32> {
        self.protocol_version
    }

    fn config_present(&self) -> bool {
        self.config_present
    }

    fn startup_summary(&self) -> Option<String> {
        self.startup_summary.clone()
    }

    fn tracker(&self) -> TrackerInfo {
        self.tracker.clone()
    }
}

/// Render the snapshot lines in their fixed order.
pub fn snapshot_lines(product: &str, host: &dyn HostInfo, capabilities: Capabilities) -> Vec<LogLine> {
    let mut lines = Vec::new();

    if !host.config_present() {
        lines.push(LogLine::stamped(MISSING_CONFIG_WARNING));
    }

    let version = non_empty(host.product_version()).unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string());
    lines.push(LogLine::stamped(format!("{product} version: {version}")));

    let protocol = host
        .protocol_version()
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string());
    lines.push(LogLine::stamped(format!("Protocol version: {protocol}")));

    if let Some(summary) = non_empty(host.startup_summary()) {
        lines.push(LogLine::stamped(summary));
    }

    if capabilities.headless {
        let tracker = host.tracker();
        let state = if tracker.enabled { "Enabled" } else { "Disabled" };
        lines.push(LogLine::stamped(format!("Tracker: {state}")));

        if tracker.enabled {
            let channel = non_empty(tracker.channel).unwrap_or_else(|| NO_CHANNEL_PLACEHOLDER.to_string());
            lines.push(LogLine::stamped(format!("Tracker channel: {channel}")));
        }
    }

    lines
}

/// Emit the snapshot through the line sink.
pub fn write_snapshot(
    sink: &mut LineSink,
    product: &str,
    host: &dyn HostInfo,
    capabilities: Capabilities,
) {
    for line in snapshot_lines(product, host, capabilities) {
        sink.emit(line);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
