//! # slot-engine
//!
//! Deterministic time-slot availability for workspace booking.
//!
//! Given the bookable slots of a day and the reservations already made for a
//! resource (seat, desk, room), the engine decides which slots are still free.
//! Resolution is a pure function of its inputs: no I/O, no shared state, no
//! caching between calls.
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInterval` and `Reservation` types
//! - [`policy`] — Overlap tests (half-open, legacy)
//! - [`resolver`] — Classify slots as available or booked
//! - [`catalog`] — Configured or generated slot sets for a day
//! - [`source`] — Reservation sources and fetch-then-resolve
//! - [`error`] — Error types

pub mod catalog;
pub mod error;
pub mod interval;
pub mod policy;
pub mod resolver;
pub mod source;

pub use catalog::SlotCatalog;
pub use error::SlotError;
pub use interval::{Reservation, TimeInterval};
pub use policy::OverlapPolicy;
pub use resolver::{resolve, AvailabilityResult, SlotAvailabilityResolver, SlotStatus};
pub use source::{check_availability, FetchError, InMemoryReservations, ReservationSource};
