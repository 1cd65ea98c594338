//! Schedule model: parsed records, day-clipped segments and display events.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Lowest domain-valid stage.
pub const MIN_STAGE: u8 = 1;
/// Highest domain-valid stage.
pub const MAX_STAGE: u8 = 8;
/// Reserved stage value meaning "unknown/unspecified".
pub const UNKNOWN_STAGE: u8 = 0;

/// Anything with a half-open `[start, end)` interval.
pub trait Interval {
    fn start(&self) -> Timestamp;
    fn end(&self) -> Timestamp;
}

/// An interval that belongs to an area at a given stage.
///
/// Implemented by both raw records and day segments so the projector can
/// consume either.
pub trait OutageWindow: Interval {
    fn area_name(&self) -> &str;
    fn stage(&self) -> u8;
}

/// One outage window for one area, as published in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub area_name: String,
    pub start: Timestamp,
    /// Exclusive; always after `start` for parser output.
    pub end: Timestamp,
    /// 1-8, or 0 when the payload did not say.
    pub stage: u8,
    pub source: String,
}

impl ScheduleRecord {
    pub fn new(
        area_name: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
        stage: u8,
    ) -> Self {
        Self {
            area_name: area_name.into(),
            start,
            end,
            stage,
            source: String::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// True when `end > start`.
    pub fn has_valid_interval(&self) -> bool {
        self.end > self.start
    }
}

/// A record clipped to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySegment {
    pub area_name: String,
    pub stage: u8,
    pub source: String,
    pub segment_start: Timestamp,
    /// Exclusive; at most the following midnight.
    pub segment_end: Timestamp,
    /// Index of the originating record, shared by all pieces of one outage.
    pub group_id: usize,
}

/// UI-facing event, the minimal shape a calendar renderer accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEvent {
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Interval for ScheduleRecord {
    fn start(&self) -> Timestamp {
        self.start
    }
    fn end(&self) -> Timestamp {
        self.end
    }
}

impl OutageWindow for ScheduleRecord {
    fn area_name(&self) -> &str {
        &self.area_name
    }
    fn stage(&self) -> u8 {
        self.stage
    }
}

impl Interval for DaySegment {
    fn start(&self) -> Timestamp {
        self.segment_start
    }
    fn end(&self) -> Timestamp {
        self.segment_end
    }
}

impl OutageWindow for DaySegment {
    fn area_name(&self) -> &str {
        &self.area_name
    }
    fn stage(&self) -> u8 {
        self.stage
    }
}

impl Interval for DisplayEvent {
    fn start(&self) -> Timestamp {
        self.start
    }
    fn end(&self) -> Timestamp {
        self.end
    }
}

/// Order by `start` ascending, ties broken by `end` ascending.
///
/// The sort is stable, so fully tied items keep their input order.
pub fn sort_chronologically<T: Interval>(items: &mut [T]) {
    items.sort_by_key(|i| (i.start(), i.end()));
}

/// Whether `items` already satisfy the chronological ordering.
pub fn is_chronological<T: Interval>(items: &[T]) -> bool {
    items
        .windows(2)
        .all(|w| (w[0].start(), w[0].end()) <= (w[1].start(), w[1].end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn sort_breaks_ties_on_end() {
        let mut recs = vec![
            ScheduleRecord::new("a", at(1, 10), at(1, 14), 2),
            ScheduleRecord::new("a", at(1, 10), at(1, 12), 2),
            ScheduleRecord::new("a", at(1, 8), at(1, 9), 2),
        ];
        assert!(!is_chronological(&recs));

        sort_chronologically(&mut recs);
        assert!(is_chronological(&recs));
        assert_eq!(recs[0].start, at(1, 8));
        assert_eq!(recs[1].end, at(1, 12));
        assert_eq!(recs[2].end, at(1, 14));
    }

    #[test]
    fn zero_length_interval_is_invalid() {
        let r = ScheduleRecord::new("a", at(1, 10), at(1, 10), 1);
        assert!(!r.has_valid_interval());
    }
}
