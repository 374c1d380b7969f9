//! Multilog: session log for multiplayer servers
//!
//! A human-readable, append-only narrative of a server's lifetime: an opening
//! banner, a one-shot diagnostic snapshot, periodic uptime reports and a
//! closing banner. Every line goes to a persistent sink and, when an operator
//! is attached, to a live mirror.

pub mod cli;
pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod line;
pub mod logging;
pub mod mirror;
pub mod session;
pub mod sink;
pub mod timestamp;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use diagnostics::{HostInfo, StaticHostInfo, TrackerInfo};
pub use line::{Capabilities, LineSink, LogLine};
pub use mirror::{ConsoleMirror, LiveMirror, MemoryMirror};
pub use session::{SessionClock, SessionLog, SessionState, Uptime};
pub use sink::{FilePolicy, FileSink, MemorySink, PersistentSink};
