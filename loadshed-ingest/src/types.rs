use loadshed_core::{ScheduleRecord, Timestamp, TimestampError};
use thiserror::Error;

/// Why a line could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("{field} {source}")]
    Timestamp {
        field: &'static str,
        source: TimestampError,
    },
    #[error("stray quote in field {field}")]
    StrayQuote { field: usize },
    #[error("non-numeric stage '{0}'")]
    Stage(String),
    #[error("unreadable line: {0}")]
    Csv(String),
}

/// A recoverable problem found while parsing one line of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestWarning {
    /// Line dropped.
    #[error("line {line}: malformed record, {reason}")]
    MalformedRecord { line: u64, reason: Malformed },
    /// Record kept with the clamped stage.
    #[error("line {line}: stage {raw} outside 1-8, clamped to {clamped}")]
    StageClamped { line: u64, raw: String, clamped: u8 },
    /// Line dropped; `end` is not after `start`.
    #[error("line {line}: interval {start} .. {end} is empty or inverted")]
    InvalidInterval {
        line: u64,
        start: Timestamp,
        end: Timestamp,
    },
}

impl IngestWarning {
    /// 1-based line number in the payload.
    pub fn line(&self) -> u64 {
        match self {
            Self::MalformedRecord { line, .. }
            | Self::StageClamped { line, .. }
            | Self::InvalidInterval { line, .. } => *line,
        }
    }
}

/// Parser output: every usable record plus the side channel of warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSchedule {
    pub records: Vec<ScheduleRecord>,
    pub warnings: Vec<IngestWarning>,
}

impl ParsedSchedule {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Lines that were dropped entirely (clamped stages are kept, not dropped).
    pub fn dropped_lines(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| !matches!(w, IngestWarning::StageClamped { .. }))
            .count()
    }
}
