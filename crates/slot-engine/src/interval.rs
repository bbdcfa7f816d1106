//! Slot and reservation types.
//!
//! Times are wall-clock `NaiveTime` values within a single booking day; the day
//! itself is carried as a `NaiveDate` on each reservation.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A candidate booking window within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Unique within a day's slot set.
    pub id: String,
    /// Display name (e.g., "09:00-10:00").
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeInterval {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            start,
            end,
        }
    }

    /// Check the `start < end` invariant.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidInterval` when `start >= end`.
    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::InvalidInterval(format!(
                "slot '{}' starts at {} but ends at {}",
                self.id, self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Reject a blank resource id.
pub(crate) fn validate_resource(resource_id: &str) -> Result<()> {
    if resource_id.trim().is_empty() {
        return Err(SlotError::InvalidResource(
            "resource id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// An existing commitment of a resource on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub resource_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Reservation {
    pub fn new(
        resource_id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            date,
            start,
            end,
        }
    }

    /// Whether this reservation belongs to the given resource and day.
    pub fn applies_to(&self, resource_id: &str, date: NaiveDate) -> bool {
        self.resource_id == resource_id && self.date == date
    }

    /// A reservation with `start >= end` occupies no time.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn validate_accepts_forward_interval() {
        let slot = TimeInterval::new("a", "09:00-10:00", t(9, 0), t(10, 0));
        assert!(slot.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_interval() {
        let slot = TimeInterval::new("a", "09:00", t(9, 0), t(9, 0));
        assert!(matches!(
            slot.validate(),
            Err(SlotError::InvalidInterval(_))
        ));
    }

    #[test]
    fn validate_resource_rejects_blank_ids() {
        assert!(validate_resource("desk-1").is_ok());
        for id in ["", " ", "\t"] {
            assert!(matches!(
                validate_resource(id),
                Err(SlotError::InvalidResource(_))
            ));
        }
    }

    #[test]
    fn applies_to_requires_resource_and_date() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let other_day = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        let r = Reservation::new("desk-1", day, t(9, 0), t(10, 0));

        assert!(r.applies_to("desk-1", day));
        assert!(!r.applies_to("desk-2", day));
        assert!(!r.applies_to("desk-1", other_day));
    }
}
