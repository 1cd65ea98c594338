//! Now-relative status: the ongoing or next outage for an area, and
//! human-readable durations for the banner.

use chrono::Duration;

use crate::record::{Interval, is_chronological};
use crate::time::Timestamp;

/// Where `now` sits relative to an area's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutageStatus {
    NoUpcomingOutage,
    Ongoing { ends_in: Duration },
    Upcoming { starts_in: Duration },
}

impl NextOutageStatus {
    /// One-line banner text.
    pub fn banner(&self) -> String {
        match self {
            Self::NoUpcomingOutage => "No loadshedding scheduled".to_string(),
            Self::Ongoing { ends_in } => {
                format!("Loadshedding now, ends in {}", format_duration(*ends_in))
            }
            Self::Upcoming { starts_in } => {
                format!("Next loadshedding in {}", format_duration(*starts_in))
            }
        }
    }
}

/// Find the first window not yet fully elapsed at `now`.
///
/// `events` must be sorted by `start` then `end` (see `sort_chronologically`).
pub fn next_outage<T: Interval>(events: &[T], now: Timestamp) -> NextOutageStatus {
    debug_assert!(is_chronological(events), "events must be chronologically sorted");

    match events.iter().find(|e| e.end() > now) {
        None => NextOutageStatus::NoUpcomingOutage,
        Some(e) if e.start() <= now => NextOutageStatus::Ongoing {
            ends_in: e.end() - now,
        },
        Some(e) => NextOutageStatus::Upcoming {
            starts_in: e.start() - now,
        },
    }
}

fn unit(n: i64, name: &str) -> String {
    if n == 1 {
        format!("1 {name}")
    } else {
        format!("{n} {name}s")
    }
}

/// Render a duration as e.g. `"1 day 3 hours 5 minutes"`.
///
/// Sign is ignored, seconds are truncated, zero units are omitted, and a
/// duration under one minute renders as `"0 minutes"`.
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.abs().num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let parts: Vec<String> = [(days, "day"), (hours, "hour"), (minutes, "minute")]
        .into_iter()
        .filter(|(n, _)| *n != 0)
        .map(|(n, name)| unit(n, name))
        .collect();

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DisplayEvent;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ev(start: Timestamp, end: Timestamp) -> DisplayEvent {
        DisplayEvent {
            title: "🔌 test Stage 2☹️".to_string(),
            start,
            end,
        }
    }

    #[test]
    fn ongoing_event_reports_time_to_end() {
        let status = next_outage(&[ev(at(10, 0), at(11, 0))], at(10, 30));
        assert_eq!(status, NextOutageStatus::Ongoing { ends_in: Duration::minutes(30) });
        assert_eq!(status.banner(), "Loadshedding now, ends in 30 minutes");
    }

    #[test]
    fn future_event_reports_time_to_start() {
        let status = next_outage(&[ev(at(14, 0), at(15, 0))], at(10, 0));
        match status {
            NextOutageStatus::Upcoming { starts_in } => assert_eq!(format_duration(starts_in), "4 hours"),
            other => panic!("expected upcoming, got {other:?}"),
        }
    }

    #[test]
    fn empty_list_has_nothing_upcoming() {
        let events: Vec<DisplayEvent> = vec![];
        assert_eq!(next_outage(&events, at(9, 0)), NextOutageStatus::NoUpcomingOutage);
        assert_eq!(NextOutageStatus::NoUpcomingOutage.banner(), "No loadshedding scheduled");
    }

    #[test]
    fn elapsed_events_are_skipped() {
        let events = [ev(at(6, 0), at(8, 0)), ev(at(12, 0), at(14, 0))];
        assert_eq!(
            next_outage(&events, at(9, 0)),
            NextOutageStatus::Upcoming { starts_in: Duration::hours(3) }
        );
        assert_eq!(next_outage(&events, at(14, 0)), NextOutageStatus::NoUpcomingOutage);
    }

    #[test]
    fn boundaries_are_start_inclusive_end_exclusive() {
        let events = [ev(at(10, 0), at(11, 0)), ev(at(11, 0), at(12, 0))];
        assert_eq!(
            next_outage(&events, at(10, 0)),
            NextOutageStatus::Ongoing { ends_in: Duration::hours(1) }
        );
        // The first window has ended exactly; the adjacent one is now ongoing.
        assert_eq!(
            next_outage(&events, at(11, 0)),
            NextOutageStatus::Ongoing { ends_in: Duration::hours(1) }
        );
    }

    #[test]
    fn formats_compound_durations() {
        assert_eq!(format_duration(Duration::zero()), "0 minutes");
        assert_eq!(format_duration(Duration::seconds(59)), "0 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::minutes(61)), "1 hour 1 minute");
        assert_eq!(format_duration(Duration::days(2)), "2 days");
        assert_eq!(
            format_duration(Duration::days(1) + Duration::hours(3) + Duration::minutes(5)),
            "1 day 3 hours 5 minutes"
        );
        assert_eq!(format_duration(Duration::days(1) + Duration::minutes(5)), "1 day 5 minutes");
    }

    #[test]
    fn formatting_ignores_sign() {
        assert_eq!(format_duration(Duration::minutes(-90)), "1 hour 30 minutes");
    }
}
