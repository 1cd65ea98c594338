//! Parser for the `machine_friendly.csv` schedule export.
//!
//! Expected rows (header optional):
//!   area_name,start,finsh,stage,source
//!   city-of-cape-town-area-15,2024-01-01T22:00:00+02:00,2024-01-02T00:30:00+02:00,4,https://twitter.com/...
//!
//! One bad line never aborts the batch: it is dropped and reported. Quoting is
//! off so a stray `"` cannot run on into the following lines; a field may
//! still be wrapped in one pair of quotes, which are stripped.

use csv::StringRecord;
use std::num::IntErrorKind;
use loadshed_core::{MAX_STAGE, MIN_STAGE, ScheduleRecord, UNKNOWN_STAGE, parse_timestamp};
use tracing::{debug, warn};

use crate::types::{IngestWarning, Malformed, ParsedSchedule};

const FIELD_COUNT: usize = 5;

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|f| f.eq_ignore_ascii_case("area_name"))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.is_empty())
}

/// Strip one surrounding pair of quotes; `None` if any other `"` remains.
fn unquote(field: &str) -> Option<&str> {
    let inner = field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field);
    (!inner.contains('"')).then_some(inner)
}

/// Stage as an integer; values too large for `i64` saturate so they clamp.
fn parse_stage(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Clamp a raw stage into 1-8, keeping 0 as "unknown".
fn clamp_stage(raw: i64) -> (u8, bool) {
    if raw == i64::from(UNKNOWN_STAGE) {
        return (UNKNOWN_STAGE, false);
    }
    let clamped = raw.clamp(i64::from(MIN_STAGE), i64::from(MAX_STAGE));
    // In range 1..=8 after the clamp, so the cast is lossless.
    (clamped as u8, clamped != raw)
}

/// Parse one data row. `Ok` may still carry a stage-clamp warning.
fn parse_row(
    record: &StringRecord,
    line: u64,
) -> Result<(ScheduleRecord, Option<IngestWarning>), IngestWarning> {
    let malformed = |reason| IngestWarning::MalformedRecord { line, reason };

    if record.len() != FIELD_COUNT {
        return Err(malformed(Malformed::FieldCount {
            expected: FIELD_COUNT,
            found: record.len(),
        }));
    }

    let mut fields = Vec::with_capacity(FIELD_COUNT);
    for (index, raw) in record.iter().enumerate() {
        match unquote(raw) {
            Some(f) => fields.push(f.trim()),
            None => return Err(malformed(Malformed::StrayQuote { field: index + 1 })),
        }
    }

    let start = parse_timestamp(fields[1]).map_err(|source| {
        malformed(Malformed::Timestamp {
            field: "start",
            source,
        })
    })?;
    let end = parse_timestamp(fields[2]).map_err(|source| {
        malformed(Malformed::Timestamp {
            field: "finsh",
            source,
        })
    })?;
    let raw_stage = parse_stage(fields[3])
        .ok_or_else(|| malformed(Malformed::Stage(fields[3].to_string())))?;

    if end <= start {
        return Err(IngestWarning::InvalidInterval { line, start, end });
    }

    let (stage, was_clamped) = clamp_stage(raw_stage);
    let clamp_warning = was_clamped.then_some(IngestWarning::StageClamped {
        line,
        raw: fields[3].to_string(),
        clamped: stage,
    });

    let rec = ScheduleRecord::new(fields[0], start, end, stage).with_source(fields[4]);
    Ok((rec, clamp_warning))
}

/// Parse the raw payload into records plus per-line warnings.
pub fn parse_machine_friendly(text: &str) -> ParsedSchedule {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = ParsedSchedule::default();
    let mut seen_data = false;

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                let w = IngestWarning::MalformedRecord {
                    line,
                    reason: Malformed::Csv(e.to_string()),
                };
                warn!("{w}");
                out.warnings.push(w);
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        // Header is only recognised before the first data row.
        if !seen_data {
            seen_data = true;
            if is_header(&record) {
                continue;
            }
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse_row(&record, line) {
            Ok((rec, clamp_warning)) => {
                if let Some(w) = clamp_warning {
                    warn!("{w}");
                    out.warnings.push(w);
                }
                out.records.push(rec);
            }
            Err(w) => {
                warn!("{w}");
                out.warnings.push(w);
            }
        }
    }

    debug!(
        records = out.records.len(),
        warnings = out.warnings.len(),
        "parsed schedule payload"
    );
    out
}
