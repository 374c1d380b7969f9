//! Property-based tests for uptime decomposition and report throttling

use chrono::{Duration, FixedOffset, TimeZone};
use multilog::{Capabilities, LineSink, ManualClock, MemorySink, SessionLog, StaticHostInfo, Uptime};
use proptest::prelude::*;

proptest! {
    #[test]
    fn uptime_components_recompose(elapsed in 0u64..10_000_000) {
        let uptime = Uptime::from_secs(elapsed);
        prop_assert!(uptime.minutes < 60);
        prop_assert!(uptime.seconds < 60);
        prop_assert_eq!(uptime.hours * 3600 + uptime.minutes * 60 + uptime.seconds, elapsed);
    }

    #[test]
    fn polls_report_only_after_interval(offsets in proptest::collection::vec(0i64..20_000, 1..40)) {
        let t0 = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let sink = MemorySink::new();
        let clock = ManualClock::new(t0);
        let lines = LineSink::new(Box::new(sink.clone()), Box::new(clock));
        let mut log = SessionLog::new(lines, Capabilities::default());
        log.start(&StaticHostInfo::default());

        let mut sorted = offsets;
        sorted.sort_unstable();
        for offset in sorted {
            let now = t0 + Duration::seconds(offset);
            let last = log.session_clock().unwrap().last_report_at();
            let before = sink.lines().len();
            let due = now - last >= Duration::seconds(2520);

            let reported = log.poll(now);

            prop_assert_eq!(reported, due);
            let after = log.session_clock().unwrap().last_report_at();
            if due {
                prop_assert_eq!(sink.lines().len(), before + 1);
                prop_assert_eq!(after, now);
            } else {
                prop_assert_eq!(sink.lines().len(), before);
                prop_assert_eq!(after, last);
            }
            prop_assert!(after >= log.session_clock().unwrap().opened_at());
        }
    }
}
