//! Classify the slots of a booking day as available or booked.
//!
//! Each slot is tested against every reservation for the same resource and date,
//! stopping at the first conflict. The result is recomputed in full on every call;
//! nothing is cached between queries.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::{validate_resource, Reservation, TimeInterval};
use crate::policy::OverlapPolicy;

/// Availability of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    pub id: String,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// `true` when no reservation conflicts with the slot.
    pub available: bool,
}

/// Per-slot availability for one resource on one date, in input slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub resource_id: String,
    pub date: NaiveDate,
    pub policy: OverlapPolicy,
    pub slots: Vec<SlotStatus>,
}

impl AvailabilityResult {
    /// Availability flag for a slot id, or `None` if the id was not resolved.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.status(id).map(|s| s.available)
    }

    pub fn status(&self, id: &str) -> Option<&SlotStatus> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// The id → available mapping.
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.slots
            .iter()
            .map(|s| (s.id.clone(), s.available))
            .collect()
    }

    pub fn available_ids(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.available)
            .map(|s| s.id.as_str())
            .collect()
    }

    pub fn booked_ids(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.id.as_str())
            .collect()
    }

    pub fn available_count(&self) -> usize {
        self.slots.iter().filter(|s| s.available).count()
    }

    /// The earliest-listed available slot.
    pub fn first_available(&self) -> Option<&SlotStatus> {
        self.slots.iter().find(|s| s.available)
    }

    /// Select a slot for booking. Only available slots can be selected.
    ///
    /// # Errors
    /// Returns `SlotError::UnknownSlot` if no slot has this id, and
    /// `SlotError::SlotBooked` if the slot conflicts with a reservation.
    pub fn select(&self, id: &str) -> Result<&SlotStatus> {
        let status = self
            .status(id)
            .ok_or_else(|| SlotError::UnknownSlot(id.to_string()))?;
        if !status.available {
            return Err(SlotError::SlotBooked(format!(
                "{} ({}) on {} for '{}'",
                status.id, status.label, self.date, self.resource_id
            )));
        }
        Ok(status)
    }
}

/// Stateless availability resolver parameterised by an [`OverlapPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotAvailabilityResolver {
    policy: OverlapPolicy,
}

impl SlotAvailabilityResolver {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    /// Resolve availability of `intervals` for `resource_id` on `date`.
    ///
    /// Reservations for other resources or other dates are ignored. Overlapping
    /// reservations are not deduplicated; each is simply tested in turn.
    ///
    /// All inputs are validated before any slot is classified, so either every
    /// slot gets a flag or the call fails.
    ///
    /// `intervals` is expected to be non-empty. An empty slice is not an error:
    /// it resolves to a result with no slots.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidResource` if `resource_id` is blank.
    /// Returns `SlotError::InvalidInterval` if any slot has `start >= end` or if
    /// two slots share an id.
    pub fn resolve(
        &self,
        resource_id: &str,
        date: NaiveDate,
        intervals: &[TimeInterval],
        reservations: &[Reservation],
    ) -> Result<AvailabilityResult> {
        validate_resource(resource_id)?;

        let mut seen = HashSet::with_capacity(intervals.len());
        for interval in intervals {
            interval.validate()?;
            if !seen.insert(interval.id.as_str()) {
                return Err(SlotError::InvalidInterval(format!(
                    "duplicate slot id '{}'",
                    interval.id
                )));
            }
        }

        let applicable: Vec<&Reservation> = reservations
            .iter()
            .filter(|r| r.applies_to(resource_id, date))
            .inspect(|r| {
                if r.is_degenerate() {
                    tracing::warn!(
                        resource_id,
                        %date,
                        start = %r.start,
                        end = %r.end,
                        policy = %self.policy,
                        "reservation has no duration"
                    );
                }
            })
            .collect();

        tracing::debug!(
            resource_id,
            %date,
            slots = intervals.len(),
            reservations = applicable.len(),
            ignored = reservations.len() - applicable.len(),
            policy = %self.policy,
            "resolving slot availability"
        );

        let slots = intervals
            .iter()
            .map(|slot| {
                let conflict = applicable
                    .iter()
                    .find(|r| self.policy.conflicts(slot.start, slot.end, r.start, r.end));
                if let Some(r) = conflict {
                    tracing::trace!(slot = %slot.id, start = %r.start, end = %r.end, "slot booked");
                }
                SlotStatus {
                    id: slot.id.clone(),
                    label: slot.label.clone(),
                    start: slot.start,
                    end: slot.end,
                    available: conflict.is_none(),
                }
            })
            .collect();

        Ok(AvailabilityResult {
            resource_id: resource_id.to_string(),
            date,
            policy: self.policy,
            slots,
        })
    }
}

/// Resolve availability with the default half-open overlap policy.
///
/// See [`SlotAvailabilityResolver::resolve`].
pub fn resolve(
    resource_id: &str,
    date: NaiveDate,
    intervals: &[TimeInterval],
    reservations: &[Reservation],
) -> Result<AvailabilityResult> {
    SlotAvailabilityResolver::default().resolve(resource_id, date, intervals, reservations)
}
