//! Live mirrors: transient displays of session lines for an attached operator.

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracing::warn;

/// Fire-and-forget receiver of session lines.
pub trait LiveMirror {
    fn push_line(&mut self, text: &str);
}

/// Writes mirrored lines to the operator's terminal (stderr).
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMirror {
    color: bool,
}

impl ConsoleMirror {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render(&self, text: &str) -> String {
        if self.color {
            format!("{} {}", "[multilog]".dimmed(), text)
        } else {
            format!("[multilog] {}", text)
        }
    }
}

impl Default for ConsoleMirror {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LiveMirror for ConsoleMirror {
    /// A failed terminal write is reported and the line is dropped.
    fn push_line(&mut self, text: &str) {
        let line = self.render(text);
        if let Err(err) = writeln!(std::io::stderr().lock(), "{line}") {
            warn!(error = %err, "failed to mirror session line");
        }
    }
}

/// In-memory mirror. Clones share the captured lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryMirror {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LiveMirror for MemoryMirror {
    fn push_line(&mut self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}
