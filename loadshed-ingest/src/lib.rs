//! loadshed-ingest: turn the raw schedule payload into validated records,
//! with per-line problems reported beside them instead of aborting.

pub mod parsers;
pub mod types;

pub use parsers::machine_friendly::parse_machine_friendly;
pub use types::{IngestWarning, Malformed, ParsedSchedule};
