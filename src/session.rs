//! Session lifecycle: framing banners and the periodic uptime report.
//!
//! A [`SessionLog`] is owned by the host's main loop. `start` opens the sink
//! and writes the opening banner and diagnostic snapshot, `poll` is called
//! as often as the host likes and writes an uptime line at most once per
//! report interval, and `stop` writes the closing banner and closes the sink.
//!
//! A sink that fails to open leaves the session `Disabled`: nothing is
//! written for the rest of the session and no error reaches the host.

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::MultiLogConfig;
use crate::diagnostics::{self, HostInfo};
use crate::line::{Capabilities, LineSink, LogLine};
use crate::mirror::LiveMirror;
use crate::sink::{FileSink, PersistentSink};
use crate::timestamp::{self, BannerEvent};
use chrono::Duration;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Seconds between uptime reports (42 minutes).
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 2520;

pub const DEFAULT_PRODUCT: &str = "Multiplayer";

/// Largest interval chrono can represent as a duration.
const MAX_INTERVAL_SECS: u64 = (i64::MAX / 1000) as u64;

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique session id.
pub fn new_session_id() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let pid = std::process::id();
    let seq = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("sess-{ts}-{pid}-{seq}")
}

/// Start and last-report times of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    opened_at: Timestamp,
    last_report_at: Timestamp,
}

impl SessionClock {
    fn new(now: Timestamp) -> Self {
        Self {
            opened_at: now,
            last_report_at: now,
        }
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    pub fn last_report_at(&self) -> Timestamp {
        self.last_report_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session open.
    Idle,
    /// `start` was called but the sink refused to open.
    Disabled,
    /// Session open. `clock` is `None` when the wall clock could not be read
    /// at start, which turns uptime reporting off for the session.
    Active { clock: Option<SessionClock> },
}

/// Whole hours, minutes and seconds of uptime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Uptime {
    pub fn from_secs(elapsed: u64) -> Self {
        Self {
            hours: elapsed / 3600,
            minutes: (elapsed % 3600) / 60,
            seconds: elapsed % 60,
        }
    }

    /// Time from `opened_at` to `now`; a clock that moved backwards counts as zero.
    pub fn between(opened_at: Timestamp, now: Timestamp) -> Self {
        let secs = (now - opened_at).num_seconds().max(0) as u64;
        Self::from_secs(secs)
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Server has been active for {} hours, {} minutes, and {} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Session-scoped multiplayer log.
pub struct SessionLog {
    lines: LineSink,
    product: String,
    capabilities: Capabilities,
    report_interval: Duration,
    state: SessionState,
    session_id: Option<String>,
}

impl SessionLog {
    /// The live mirror, if one is attached to `lines`, follows
    /// `capabilities.interactive`.
    pub fn new(mut lines: LineSink, capabilities: Capabilities) -> Self {
        lines.set_interactive(capabilities.interactive);
        Self {
            lines,
            product: DEFAULT_PRODUCT.to_string(),
            capabilities,
            report_interval: Duration::seconds(DEFAULT_REPORT_INTERVAL_SECS as i64),
            state: SessionState::Idle,
            session_id: None,
        }
    }

    /// Build a file-backed session log on the system clock from configuration.
    ///
    /// The mirror only receives lines when the configured capabilities mark
    /// the host as interactive.
    pub fn from_config(config: &MultiLogConfig, mirror: Option<Box<dyn LiveMirror>>) -> Self {
        let sink = FileSink::new(config.session.file.clone(), config.session.file_policy);
        let mut lines = LineSink::new(Box::new(sink), Box::new(SystemClock))
            .with_debug_echo(config.session.echo_to_debug);
        if let Some(mirror) = mirror {
            lines = lines.with_mirror(mirror);
        }
        Self::new(lines, config.capabilities)
            .with_product(config.session.product.clone())
            .with_report_interval_secs(config.session.report_interval_secs)
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_report_interval_secs(mut self, secs: u64) -> Self {
        self.report_interval = Duration::seconds(secs.min(MAX_INTERVAL_SECS) as i64);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn session_clock(&self) -> Option<&SessionClock> {
        match &self.state {
            SessionState::Active { clock } => clock.as_ref(),
            _ => None,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Where the open session is being written, if the sink has a path.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.lines.sink().location()
    }

    /// Open the sink and write the opening banner and diagnostic snapshot.
    pub fn start(&mut self, host: &dyn HostInfo) {
        if self.is_active() {
            warn!(session_id = ?self.session_id, "session log already started; ignoring start");
            return;
        }

        let session_id = new_session_id();
        if let Err(err) = self.lines.sink_mut().open(&session_id) {
            warn!(session_id = %session_id, error = %err, "session log disabled: sink failed to open");
            self.state = SessionState::Disabled;
            self.session_id = Some(session_id);
            return;
        }

        let now = self.lines.clock().now();
        self.lines.emit(LogLine::plain(timestamp::banner(
            &self.product,
            BannerEvent::Opened,
            now.as_ref(),
        )));

        if now.is_none() {
            warn!(session_id = %session_id, "wall clock unavailable; uptime reports disabled");
        }
        self.state = SessionState::Active {
            clock: now.map(SessionClock::new),
        };

        diagnostics::write_snapshot(&mut self.lines, &self.product, host, self.capabilities);

        info!(session_id = %session_id, "session log started");
        self.session_id = Some(session_id);
    }

    /// Write the uptime line if the report interval has elapsed since the
    /// last report. Returns whether a line was written.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        let SessionState::Active { clock: Some(clock) } = &mut self.state else {
            return false;
        };
        if now - clock.last_report_at < self.report_interval {
            return false;
        }

        let uptime = Uptime::between(clock.opened_at, now);
        clock.last_report_at = now;
        debug!(session_id = ?self.session_id, "writing uptime report");
        self.lines.emit(LogLine::stamped(uptime.to_string()));
        true
    }

    /// [`poll`](Self::poll) with the current time from the session's clock.
    pub fn poll_now(&mut self) -> bool {
        match self.lines.clock().now() {
            Some(now) => self.poll(now),
            None => false,
        }
    }

    /// Write the closing banner (if the session is active) and close the sink.
    pub fn stop(&mut self) {
        if self.is_active() {
            let now = self.lines.clock().now();
            self.lines.emit(LogLine::plain(timestamp::banner(
                &self.product,
                BannerEvent::Closing,
                now.as_ref(),
            )));
            info!(session_id = ?self.session_id, "session log stopped");
        }
        self.lines.sink_mut().close();
        self.state = SessionState::Idle;
        self.session_id = None;
    }
}
