//! Reservation data sources.
//!
//! Fetching reservations is the caller's job: a source may be networked and
//! fail, the resolver never does I/O. [`check_availability`] awaits a source
//! and hands the result to a resolver, without retrying.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::SlotCatalog;
use crate::error::Result;
use crate::interval::{validate_resource, Reservation};
use crate::resolver::{AvailabilityResult, SlotAvailabilityResolver};

/// Failure to load reservations from a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The store could not be reached or refused the request.
    #[error("reservation store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with data that could not be understood.
    #[error("malformed reservation data: {0}")]
    Malformed(String),
}

/// Something that can list the reservations of a resource on a date.
#[async_trait]
pub trait ReservationSource: Send + Sync {
    async fn fetch_reservations(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> std::result::Result<Vec<Reservation>, FetchError>;
}

/// A fixed reservation set held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservations {
    reservations: Vec<Reservation>,
}

impl InMemoryReservations {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations }
    }

    /// Load from a JSON array of reservations.
    pub fn from_json(json: &str) -> std::result::Result<Self, FetchError> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }

    pub fn push(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}

#[async_trait]
impl ReservationSource for InMemoryReservations {
    async fn fetch_reservations(
        &self,
        resource_id: &str,
        date: NaiveDate,
    ) -> std::result::Result<Vec<Reservation>, FetchError> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.applies_to(resource_id, date))
            .cloned()
            .collect())
    }
}

/// Fetch reservations for `resource_id` on `date`, then resolve the catalog.
///
/// # Errors
/// Returns `SlotError::InvalidResource` for a blank `resource_id` without
/// contacting the source. Returns `SlotError::Fetch` if the source fails; the
/// caller decides whether to fall back to prior data or block booking. Slot
/// validation errors from the resolver pass through unchanged.
pub async fn check_availability<S: ReservationSource + ?Sized>(
    source: &S,
    resolver: &SlotAvailabilityResolver,
    resource_id: &str,
    date: NaiveDate,
    catalog: &SlotCatalog,
) -> Result<AvailabilityResult> {
    validate_resource(resource_id)?;
    let reservations = source
        .fetch_reservations(resource_id, date)
        .await
        .inspect_err(|e| tracing::warn!(resource_id, %date, error = %e, "reservation fetch failed"))?;
    resolver.resolve(resource_id, date, catalog.intervals(), &reservations)
}
