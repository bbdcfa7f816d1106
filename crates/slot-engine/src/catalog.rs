//! The configured set of bookable slots for a day.
//!
//! A catalog is an ordered, non-overlapping list of [`TimeInterval`]s with unique
//! ids. It is loaded from configuration (JSON) or generated as a uniform grid
//! between opening and closing time.

use std::collections::HashSet;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::TimeInterval;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct SlotCatalog {
    slots: Vec<TimeInterval>,
}

/// On-disk shape: `{ "slots": [ ... ] }`.
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    slots: Vec<TimeInterval>,
}

impl TryFrom<CatalogFile> for SlotCatalog {
    type Error = SlotError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        SlotCatalog::new(file.slots)
    }
}

impl From<SlotCatalog> for CatalogFile {
    fn from(catalog: SlotCatalog) -> Self {
        CatalogFile {
            slots: catalog.slots,
        }
    }
}

impl SlotCatalog {
    /// Build a catalog from explicit slots.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` if a slot has `start >= end`, and
    /// `SlotError::InvalidCatalog` for duplicate ids or slots that are out of
    /// order or overlap their predecessor.
    pub fn new(slots: Vec<TimeInterval>) -> Result<Self> {
        let mut ids = HashSet::with_capacity(slots.len());
        for slot in &slots {
            slot.validate()?;
            if !ids.insert(slot.id.as_str()) {
                return Err(SlotError::InvalidCatalog(format!(
                    "duplicate slot id '{}'",
                    slot.id
                )));
            }
        }

        for pair in slots.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.end {
                return Err(SlotError::InvalidCatalog(format!(
                    "slot '{}' ({}-{}) overlaps or precedes slot '{}' ({}-{})",
                    next.id, next.start, next.end, prev.id, prev.start, prev.end
                )));
            }
        }

        Ok(Self { slots })
    }

    /// Partition `[open, close)` into consecutive slots of `step_minutes`.
    ///
    /// A trailing remainder shorter than one step is dropped. Slot ids are
    /// `slot-HHMM` and labels `HH:MM-HH:MM`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidCatalog` if `step_minutes` is zero, if
    /// `open >= close`, or if the window is shorter than one step.
    pub fn uniform(open: NaiveTime, close: NaiveTime, step_minutes: u32) -> Result<Self> {
        if step_minutes == 0 {
            return Err(SlotError::InvalidCatalog(
                "step must be at least one minute".to_string(),
            ));
        }
        if open >= close {
            return Err(SlotError::InvalidCatalog(format!(
                "opening time {} is not before closing time {}",
                open, close
            )));
        }

        let step = Duration::minutes(i64::from(step_minutes));
        let mut slots = Vec::new();
        let mut cursor = open;

        // NaiveTime arithmetic wraps at midnight, so compare against the
        // remaining window instead of the wrapped end time.
        while close - cursor >= step {
            let end = cursor + step;
            slots.push(TimeInterval {
                id: format!("slot-{}", cursor.format("%H%M")),
                label: format!("{}-{}", cursor.format("%H:%M"), end.format("%H:%M")),
                start: cursor,
                end,
            });
            cursor = end;
        }

        if slots.is_empty() {
            return Err(SlotError::InvalidCatalog(format!(
                "window {}-{} is shorter than one {}-minute step",
                open, close, step_minutes
            )));
        }

        Ok(Self { slots })
    }

    /// Parse a catalog from its JSON configuration form.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.slots)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.slots
    }

    pub fn get(&self, id: &str) -> Option<&TimeInterval> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
