//! loadshed-core: schedule model and the pure transformations behind the
//! loadshedding calendar (day segmentation, area projection, next-outage status).

pub mod names;
pub mod project;
pub mod record;
pub mod segment;
pub mod status;
pub mod time;

pub use names::{AreaPrettifier, area_names, canonical_area_id, matches_query};
pub use project::{EventProjector, StagePalette};
pub use record::{
    DaySegment, DisplayEvent, Interval, MAX_STAGE, MIN_STAGE, OutageWindow, ScheduleRecord,
    UNKNOWN_STAGE, is_chronological, sort_chronologically,
};
pub use segment::{segment_record, segment_records};
pub use status::{NextOutageStatus, format_duration, next_outage};
pub use time::{Timestamp, TimestampError, local_now, parse_timestamp};
