//! The stateful side of the pipeline: holds the parsed payload and display
//! configuration, and calls the pure core on demand.

use anyhow::Result;
use loadshed_core::{
    AreaPrettifier, DisplayEvent, EventProjector, NextOutageStatus, Timestamp, area_names,
    canonical_area_id, matches_query, next_outage, segment_records, sort_chronologically,
};
use loadshed_ingest::{ParsedSchedule, parse_machine_friendly};

use crate::config::DisplaySection;

pub struct Session {
    pub schedule: ParsedSchedule,
    projector: EventProjector,
    prettifier: AreaPrettifier,
}

impl Session {
    pub fn new(payload: &str, display: &DisplaySection) -> Result<Self> {
        let prettifier = AreaPrettifier::standard()?;
        let mut projector = EventProjector::new(display.palette());
        if display.prettify {
            projector = projector.with_prettifier(prettifier.clone());
        }

        Ok(Self {
            schedule: parse_machine_friendly(payload),
            projector,
            prettifier,
        })
    }

    pub fn display_name(&self, area: &str) -> String {
        self.prettifier.prettify(area)
    }

    /// Areas in the payload, optionally narrowed by a search query.
    pub fn areas(&self, query: Option<&str>) -> Vec<String> {
        area_names(&self.schedule.records)
            .into_iter()
            .filter(|a| query.is_none_or(|q| matches_query(a, q)))
            .collect()
    }

    /// Chronological events for `area`, day-split when `segmented`.
    pub fn events(&self, area: &str, segmented: bool) -> Vec<DisplayEvent> {
        let area = canonical_area_id(area);
        let mut events = if segmented {
            self.projector
                .project(&segment_records(&self.schedule.records), &area)
        } else {
            self.projector.project(&self.schedule.records, &area)
        };
        sort_chronologically(&mut events);
        events
    }

    /// Uses whole records so an outage crossing midnight reports its real end.
    pub fn status(&self, area: &str, now: Timestamp) -> NextOutageStatus {
        next_outage(&self.events(area, false), now)
    }
}
