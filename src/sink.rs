//! Persistent Sinks
//!
//! The append-only destination a session writes to. The session only opens,
//! appends and closes; everything about where the bytes land lives here.

use crate::error::SinkError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Append-only line sink with an explicit open/close lifecycle.
pub trait PersistentSink {
    /// Open the sink for a new session.
    fn open(&mut self, session_id: &str) -> Result<(), SinkError>;

    /// Append one line. The sink adds the terminator. Appending to a closed
    /// sink is a no-op, and I/O failures are handled by the sink.
    fn append_line(&mut self, text: &str);

    /// Close the sink. Closing a sink that is not open is a no-op.
    fn close(&mut self);

    /// Where the open session's lines land, for sinks backed by a file.
    fn location(&self) -> Option<PathBuf> {
        None
    }
}

/// Where each session's log file goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePolicy {
    /// Every session appends to the configured path.
    #[default]
    PerProcess,
    /// Each session gets `<dir>/<stem>-<session_id>.log`.
    PerSession,
}

/// Append-only text file.
pub struct FileSink {
    path: PathBuf,
    policy: FilePolicy,
    file: Option<File>,
    current_path: Option<PathBuf>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, policy: FilePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            file: None,
            current_path: None,
        }
    }

    /// Path of the file currently open, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Resolve the file path for a session under this sink's policy.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        match self.policy {
            FilePolicy::PerProcess => self.path.clone(),
            FilePolicy::PerSession => {
                let stem = self
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("multilog");
                let file_name = format!("{stem}-{session_id}.log");
                match self.path.parent() {
                    Some(parent) => parent.join(file_name),
                    None => PathBuf::from(file_name),
                }
            }
        }
    }
}

impl PersistentSink for FileSink {
    fn open(&mut self, session_id: &str) -> Result<(), SinkError> {
        // A previous session left open is closed first; one writer per file.
        self.close();

        let path = self.session_path(session_id);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SinkError::Open {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), session_id, "opened session log file");
        self.file = Some(file);
        self.current_path = Some(path);
        Ok(())
    }

    fn append_line(&mut self, text: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(err) = writeln!(file, "{text}") {
            warn!(
                path = ?self.current_path,
                error = %err,
                "failed to append to session log"
            );
        }
    }

    fn close(&mut self) {
        if let Some(mut file) = self.file.take() {
            if let Err(err) = file.flush() {
                warn!(path = ?self.current_path, error = %err, "failed to flush session log");
            }
            debug!(path = ?self.current_path, "closed session log file");
        }
        self.current_path = None;
    }

    fn location(&self) -> Option<PathBuf> {
        self.current_path.clone()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.close();
    }
}

/// In-memory sink. Clones share the captured lines.
///
/// Useful for hosts that render the log elsewhere, and for tests. A sink
/// built with [`MemorySink::failing`] refuses to open.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemorySinkState>>,
}

#[derive(Debug, Default)]
struct MemorySinkState {
    lines: Vec<String>,
    open: bool,
    fail_open: bool,
    opened_sessions: Vec<String>,
    close_calls: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let sink = Self::default();
        sink.inner.lock().fail_open = true;
        sink
    }

    /// Every line appended while open, in order.
    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().lines.clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().open
    }

    /// Session ids passed to successful `open` calls.
    pub fn opened_sessions(&self) -> Vec<String> {
        self.inner.lock().opened_sessions.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.inner.lock().close_calls
    }
}

impl PersistentSink for MemorySink {
    fn open(&mut self, session_id: &str) -> Result<(), SinkError> {
        let mut state = self.inner.lock();
        if state.fail_open {
            return Err(SinkError::Unavailable(format!(
                "memory sink refused session {session_id}"
            )));
        }
        state.open = true;
        state.opened_sessions.push(session_id.to_string());
        Ok(())
    }

    fn append_line(&mut self, text: &str) {
        let mut state = self.inner.lock();
        if state.open {
            state.lines.push(text.to_string());
        }
    }

    fn close(&mut self) {
        let mut state = self.inner.lock();
        state.open = false;
        state.close_calls += 1;
    }
}
