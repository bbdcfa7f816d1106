//! Error types for slot-engine operations.

use thiserror::Error;

use crate::source::FetchError;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// The slot exists but conflicts with a reservation and cannot be selected.
    #[error("Slot already booked: {0}")]
    SlotBooked(String),

    #[error("Reservation fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
