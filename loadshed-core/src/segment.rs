//! Day-boundary segmentation: split outage windows at local midnights so a
//! day grid can render each piece in its own column.

use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::record::{DaySegment, ScheduleRecord};
use crate::time::Timestamp;

/// Start of the calendar day after the one containing `t`.
///
/// `None` only at the very end of chrono's representable range.
fn next_midnight(t: Timestamp) -> Option<Timestamp> {
    t.date().succ_opt().map(|d| d.and_time(NaiveTime::MIN))
}

/// Split one record into per-day segments covering `[start, end)` exactly.
///
/// A record with `end <= start` yields no segments.
pub fn segment_record(record: &ScheduleRecord, group_id: usize) -> Vec<DaySegment> {
    if !record.has_valid_interval() {
        warn!(
            area = %record.area_name,
            start = %record.start,
            end = %record.end,
            "interval is empty or inverted; no segments produced"
        );
        return vec![];
    }

    let mut out = Vec::new();
    let mut cursor = record.start;

    while cursor < record.end {
        let seg_end = match next_midnight(cursor) {
            Some(midnight) => midnight.min(record.end),
            None => record.end,
        };

        out.push(DaySegment {
            area_name: record.area_name.clone(),
            stage: record.stage,
            source: record.source.clone(),
            segment_start: cursor,
            segment_end: seg_end,
            group_id,
        });

        cursor = seg_end;
    }

    out
}

/// Segment every record; `group_id` is the record's index in `records`.
pub fn segment_records(records: &[ScheduleRecord]) -> Vec<DaySegment> {
    let out: Vec<DaySegment> = records
        .iter()
        .enumerate()
        .flat_map(|(i, r)| segment_record(r, i))
        .collect();

    debug!(records = records.len(), segments = out.len(), "segmented schedule");
    out
}
