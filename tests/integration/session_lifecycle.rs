//! Session framing, diagnostics and uptime reporting through the public API.

use super::test_utils::{headless, host, interactive, t0, Harness};
use chrono::Duration;
use multilog::diagnostics::MISSING_CONFIG_WARNING;
use multilog::{Capabilities, MemorySink, SessionState, StaticHostInfo};

const PREFIX: &str = "03/14 15:09:26~   ";

#[test]
fn start_then_stop_frames_diagnostics() {
    let mut h = Harness::new(Capabilities::default());

    h.log.start(&host());
    h.log.stop();

    let lines = h.sink.lines();
    assert_eq!(
        lines,
        vec![
            "Multiplayer Log - Opened Sat, Mar 14, 2026 at 03:09PM\n----\n----\n----\n".to_string(),
            format!("{PREFIX}Multiplayer version: 23.2.1"),
            format!("{PREFIX}Protocol version: 52"),
            format!("{PREFIX}Startup options:\n  -port 7808"),
            "\n\n----\n----\n----\nMultiplayer Log - Closing Sat, Mar 14, 2026 at 03:09PM".to_string(),
        ]
    );
    assert!(!lines.iter().any(|l| l.contains("Server has been active")));
    assert_eq!(h.log.state(), &SessionState::Idle);
}

#[test]
fn closing_banner_follows_opening_banner() {
    let mut h = Harness::new(Capabilities::default());

    h.log.start(&host());
    h.clock.advance_secs(3000);
    h.log.poll_now();
    h.log.stop();
    h.log.stop();

    let lines = h.sink.lines();
    let opened = lines.iter().position(|l| l.contains("Log - Opened")).unwrap();
    let closing: Vec<_> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("Log - Closing"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(closing.len(), 1, "closing banner written once");
    assert!(opened < closing[0]);
}

#[test]
fn stop_without_start_writes_nothing() {
    let mut h = Harness::new(interactive());

    h.log.stop();

    assert!(h.sink.lines().is_empty());
    assert!(h.mirror.lines().is_empty());
    assert_eq!(h.sink.close_calls(), 1);
}

#[test]
fn missing_configuration_warning_is_first_diagnostic() {
    let mut h = Harness::new(Capabilities::default());
    let info = StaticHostInfo {
        config_present: false,
        ..host()
    };

    h.log.start(&info);

    let lines = h.sink.lines();
    assert_eq!(lines[1], format!("{PREFIX}{MISSING_CONFIG_WARNING}"));
    assert_eq!(lines[2], format!("{PREFIX}Multiplayer version: 23.2.1"));
}

#[test]
fn headless_session_reports_tracker() {
    let mut h = Harness::new(headless());

    h.log.start(&host());

    let lines = h.sink.lines();
    assert_eq!(lines[lines.len() - 2], format!("{PREFIX}Tracker: Enabled"));
    assert_eq!(lines[lines.len() - 1], format!("{PREFIX}Tracker channel: #lobby"));
}

#[test]
fn uptime_report_after_9999_seconds() {
    let mut h = Harness::new(Capabilities::default());
    h.log.start(&host());

    h.clock.advance_secs(9999);
    assert!(h.log.poll_now());

    let last = h.sink.lines().last().cloned().unwrap();
    assert_eq!(
        last,
        "03/14 17:56:05~   Server has been active for 2 hours, 46 minutes, and 39 seconds"
    );
}

#[test]
fn polling_self_throttles() {
    let mut h = Harness::new(Capabilities::default());
    h.log.start(&host());
    let baseline = h.sink.lines().len();

    // Frequent polls within the first interval write nothing.
    for secs in (0..2520).step_by(7) {
        assert!(!h.log.poll(t0() + Duration::seconds(secs)));
    }
    assert_eq!(h.sink.lines().len(), baseline);

    assert!(h.log.poll(t0() + Duration::seconds(2520)));
    assert!(!h.log.poll(t0() + Duration::seconds(2520)));
    assert!(!h.log.poll(t0() + Duration::seconds(5039)));
    assert!(h.log.poll(t0() + Duration::seconds(5040)));

    assert_eq!(h.sink.lines().len(), baseline + 2);
    assert_eq!(
        h.log.session_clock().unwrap().last_report_at(),
        t0() + Duration::seconds(5040)
    );
}

#[test]
fn interactive_mirror_sees_every_line() {
    let mut h = Harness::new(interactive());

    h.log.start(&host());
    h.clock.advance_secs(2600);
    h.log.poll_now();
    h.log.stop();

    assert!(!h.sink.lines().is_empty());
    assert_eq!(h.mirror.lines(), h.sink.lines());
}

#[test]
fn non_interactive_mirror_sees_nothing() {
    let mut h = Harness::new(headless());

    h.log.start(&host());
    h.clock.advance_secs(2600);
    h.log.poll_now();
    h.log.stop();

    assert!(!h.sink.lines().is_empty());
    assert!(h.mirror.lines().is_empty());
}

#[test]
fn sink_open_failure_degrades_silently() {
    let mut h = Harness::with_sink(MemorySink::failing(), interactive());

    h.log.start(&host());
    assert_eq!(h.log.state(), &SessionState::Disabled);
    h.clock.advance_secs(10_000);
    assert!(!h.log.poll_now());
    h.log.stop();

    assert!(h.sink.lines().is_empty());
    assert!(h.mirror.lines().is_empty());
    assert_eq!(h.log.state(), &SessionState::Idle);
}
