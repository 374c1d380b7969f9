//! Line fan-out.
//!
//! Every session line passes through [`LineSink::emit`]: it is always written
//! to the persistent sink, mirrored to the live display when the operator is
//! attached, and optionally echoed to the diagnostic log.

use crate::clock::Clock;
use crate::mirror::LiveMirror;
use crate::sink::PersistentSink;
use crate::timestamp;
use serde::{Deserialize, Serialize};

/// Target used when echoing session lines to the diagnostic log.
pub const ECHO_TARGET: &str = "multilog::line";

/// A rendered line waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    text: String,
    stamped: bool,
}

impl LogLine {
    /// Line that gets the `MM/DD HH:MM:SS~   ` prefix.
    pub fn stamped(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stamped: true,
        }
    }

    /// Line written as-is.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            stamped: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_stamped(&self) -> bool {
        self.stamped
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Host capabilities injected at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// An operator is attached; lines are mirrored to the live display.
    #[serde(default)]
    pub interactive: bool,

    /// Dedicated server with no local player; adds tracker diagnostics.
    #[serde(default)]
    pub headless: bool,
}

/// Single choke point for session output.
pub struct LineSink {
    sink: Box<dyn PersistentSink>,
    mirror: Option<Box<dyn LiveMirror>>,
    clock: Box<dyn Clock>,
    interactive: bool,
    echo_to_debug: bool,
}

impl LineSink {
    pub fn new(sink: Box<dyn PersistentSink>, clock: Box<dyn Clock>) -> Self {
        Self {
            sink,
            mirror: None,
            clock,
            interactive: false,
            echo_to_debug: false,
        }
    }

    /// Attach a live mirror. It receives lines only when the owning session's
    /// capabilities mark the host as interactive.
    pub fn with_mirror(mut self, mirror: Box<dyn LiveMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Gate the mirror. Set from [`Capabilities::interactive`] by `SessionLog::new`.
    pub(crate) fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn with_debug_echo(mut self, enabled: bool) -> Self {
        self.echo_to_debug = enabled;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn sink(&self) -> &dyn PersistentSink {
        self.sink.as_ref()
    }

    pub(crate) fn sink_mut(&mut self) -> &mut dyn PersistentSink {
        self.sink.as_mut()
    }

    /// Write a line to every enabled destination. Empty lines are dropped.
    pub fn emit(&mut self, line: LogLine) {
        if line.is_empty() {
            return;
        }

        let rendered = if line.stamped {
            let now = self.clock.now();
            let mut text = timestamp::line_prefix(now.as_ref());
            text.push_str(&line.text);
            text
        } else {
            line.text
        };

        self.sink.append_line(&rendered);

        if self.interactive {
            if let Some(mirror) = self.mirror.as_mut() {
                mirror.push_line(&rendered);
            }
        }

        if self.echo_to_debug {
            tracing::debug!(target: ECHO_TARGET, "ML {}", rendered);
        }
    }
}
