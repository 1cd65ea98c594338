//! Area event projection: filter windows to one area and map them to
//! display-ready calendar events.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::names::AreaPrettifier;
use crate::record::{DisplayEvent, MIN_STAGE, OutageWindow};

const DEFAULT_EMOJIS: [&str; 8] = ["😕", "☹️", "😖", "😤", "😡", "🤬", "🔪", "☠️"];

/// Ordered stage → emoji table; stage 1 maps to the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePalette {
    pub emojis: Vec<String>,
}

impl Default for StagePalette {
    fn default() -> Self {
        Self {
            emojis: DEFAULT_EMOJIS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl StagePalette {
    pub fn new(emojis: Vec<String>) -> Self {
        Self { emojis }
    }

    /// Emoji for `stage`, clamping out-of-range stages to the nearest entry.
    pub fn emoji_for(&self, stage: u8) -> &str {
        let Some(last) = self.emojis.len().checked_sub(1) else {
            return "";
        };
        let idx = usize::from(stage.saturating_sub(MIN_STAGE)).min(last);
        &self.emojis[idx]
    }
}

/// Maps outage windows for one area into `DisplayEvent`s.
#[derive(Debug, Clone, Default)]
pub struct EventProjector {
    pub palette: StagePalette,
    /// When set, titles show the prettified area name instead of the raw id.
    pub prettifier: Option<AreaPrettifier>,
}

impl EventProjector {
    pub fn new(palette: StagePalette) -> Self {
        Self {
            palette,
            prettifier: None,
        }
    }

    pub fn with_prettifier(mut self, prettifier: AreaPrettifier) -> Self {
        self.prettifier = Some(prettifier);
        self
    }

    pub fn title<T: OutageWindow>(&self, window: &T) -> String {
        let area = match &self.prettifier {
            Some(p) => p.prettify(window.area_name()),
            None => window.area_name().to_string(),
        };
        format!(
            "🔌 {} Stage {}{}",
            area,
            window.stage(),
            self.palette.emoji_for(window.stage())
        )
    }

    /// Keep windows whose area exactly equals `area_name`, in input order.
    ///
    /// An area with no windows yields an empty list.
    pub fn project<T: OutageWindow>(&self, windows: &[T], area_name: &str) -> Vec<DisplayEvent> {
        let out: Vec<DisplayEvent> = windows
            .iter()
            .filter(|w| w.area_name() == area_name)
            .map(|w| DisplayEvent {
                title: self.title(w),
                start: w.start(),
                end: w.end(),
            })
            .collect();

        debug!(area = area_name, input = windows.len(), events = out.len(), "projected area events");
        out
    }
}
