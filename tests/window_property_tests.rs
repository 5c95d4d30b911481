//! Property tests for window resolution and delay calculation.
//!
//! These sweep arbitrary window shapes (same-day, overnight, degenerate
//! equal-endpoint) against arbitrary instants, asserting the invariants the
//! scheduler depends on rather than specific values.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

use walkr::core::schedule::minutes_until_next_reminder;
use walkr::core::window::{ResolvedWindow, WorkWindow};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

proptest! {
    #[test]
    fn resolution_orders_start_before_end(
        sh in 0u32..24, sm in 0u32..60,
        eh in 0u32..24, em in 0u32..60,
        nh in 0u32..24, nm in 0u32..60,
    ) {
        let window = WorkWindow::new(time(sh, sm), time(eh, em));
        let now = at(nh, nm);
        let resolved = ResolvedWindow::resolve(&window, now);

        prop_assert!(resolved.start < resolved.end);
        // The resolution stays anchored to the current cycle
        prop_assert!(resolved.start <= now + Duration::days(1));
        prop_assert!(resolved.end >= now - Duration::days(1));
    }

    #[test]
    fn delay_is_at_least_one_minute_and_at_most_a_day(
        sh in 0u32..24, sm in 0u32..60,
        eh in 0u32..24, em in 0u32..60,
        nh in 0u32..24, nm in 0u32..60,
        interval in 1i64..=240,
    ) {
        let window = WorkWindow::new(time(sh, sm), time(eh, em));
        let now = at(nh, nm);
        let resolved = ResolvedWindow::resolve(&window, now);

        let delay = minutes_until_next_reminder(&resolved, now, Duration::minutes(interval));
        prop_assert!(delay >= 1);
        prop_assert!(delay <= 24 * 60);
    }

    #[test]
    fn in_window_delays_land_on_interval_boundaries(
        sh in 0u32..24, sm in 0u32..60,
        eh in 0u32..24, em in 0u32..60,
        nh in 0u32..24, nm in 0u32..60,
        interval in 1i64..=240,
    ) {
        let window = WorkWindow::new(time(sh, sm), time(eh, em));
        let now = at(nh, nm);
        let resolved = ResolvedWindow::resolve(&window, now);

        // The boundary-stepping branch only applies strictly before the end
        prop_assume!(resolved.start <= now && now < resolved.end);

        let delay = minutes_until_next_reminder(&resolved, now, Duration::minutes(interval));
        let firing = now + Duration::minutes(delay);

        prop_assert!(firing > now);
        // With whole-minute inputs the firing is an exact interval multiple
        // past the window start
        prop_assert_eq!((firing - resolved.start).num_minutes() % interval, 0);
        prop_assert!(firing - now <= Duration::minutes(interval));
    }
}
