//! Shared fixtures for integration tests

use chrono::{FixedOffset, TimeZone};
use multilog::{
    Capabilities, LineSink, ManualClock, MemoryMirror, MemorySink, SessionLog, StaticHostInfo,
    Timestamp, TrackerInfo,
};

pub fn t0() -> Timestamp {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 3, 14, 15, 9, 26)
        .unwrap()
}

/// A session wired to in-memory sink and mirror, with handles to inspect both.
pub struct Harness {
    pub log: SessionLog,
    pub sink: MemorySink,
    pub mirror: MemoryMirror,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_sink(MemorySink::new(), capabilities)
    }

    pub fn with_sink(sink: MemorySink, capabilities: Capabilities) -> Self {
        let mirror = MemoryMirror::new();
        let clock = ManualClock::new(t0());
        let lines = LineSink::new(Box::new(sink.clone()), Box::new(clock.clone()))
            .with_mirror(Box::new(mirror.clone()));
        let log = SessionLog::new(lines, capabilities);
        Self {
            log,
            sink,
            mirror,
            clock,
        }
    }
}

pub fn host() -> StaticHostInfo {
    StaticHostInfo {
        product_version: Some("23.2.1".to_string()),
        protocol_version: Some(52),
        config_present: true,
        startup_summary: Some("Startup options:\n  -port 7808".to_string()),
        tracker: TrackerInfo {
            enabled: true,
            channel: Some("#lobby".to_string()),
        },
    }
}

pub fn interactive() -> Capabilities {
    Capabilities {
        interactive: true,
        headless: false,
    }
}

pub fn headless() -> Capabilities {
    Capabilities {
        interactive: false,
        headless: true,
    }
}
