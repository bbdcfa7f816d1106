//! Tests for reservation sources and fetch-then-resolve.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use slot_engine::{
    check_availability, FetchError, InMemoryReservations, OverlapPolicy, Reservation,
    ReservationSource, SlotAvailabilityResolver, SlotCatalog, SlotError,
};

fn t(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn catalog() -> SlotCatalog {
    SlotCatalog::uniform(t(9, 0), t(12, 0), 60).unwrap()
}

/// A source whose backend is always down.
struct Offline;

#[async_trait]
impl ReservationSource for Offline {
    async fn fetch_reservations(
        &self,
        _resource_id: &str,
        _date: NaiveDate,
    ) -> Result<Vec<Reservation>, FetchError> {
        Err(FetchError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn in_memory_source_filters_by_resource_and_date() {
    let source = InMemoryReservations::new(vec![
        Reservation::new("desk-4", day(), t(9, 0), t(10, 0)),
        Reservation::new("desk-5", day(), t(9, 0), t(10, 0)),
        Reservation::new("desk-4", day().succ_opt().unwrap(), t(9, 0), t(10, 0)),
    ]);

    let fetched = source.fetch_reservations("desk-4", day()).await.unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].resource_id, "desk-4");
    assert_eq!(fetched[0].date, day());
}

#[tokio::test]
async fn check_availability_resolves_fetched_reservations() {
    let mut source = InMemoryReservations::default();
    source.push(Reservation::new("desk-4", day(), t(10, 15), t(10, 45)));

    let result = check_availability(
        &source,
        &SlotAvailabilityResolver::default(),
        "desk-4",
        day(),
        &catalog(),
    )
    .await
    .unwrap();

    assert_eq!(result.booked_ids(), vec!["slot-1000"]);
    assert_eq!(result.available_ids(), vec!["slot-0900", "slot-1100"]);
}

#[tokio::test]
async fn fetch_failure_is_surfaced_to_the_caller() {
    let err = check_availability(
        &Offline,
        &SlotAvailabilityResolver::new(OverlapPolicy::Legacy),
        "desk-4",
        day(),
        &catalog(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        SlotError::Fetch(FetchError::Unavailable(_))
    ));
}

#[tokio::test]
async fn validation_errors_pass_through() {
    let err = check_availability(
        &InMemoryReservations::default(),
        &SlotAvailabilityResolver::default(),
        "",
        day(),
        &catalog(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SlotError::InvalidResource(_)));
}

/// Counts fetches and always fails.
#[derive(Default)]
struct CountingOffline {
    fetches: AtomicUsize,
}

#[async_trait]
impl ReservationSource for CountingOffline {
    async fn fetch_reservations(
        &self,
        _resource_id: &str,
        _date: NaiveDate,
    ) -> Result<Vec<Reservation>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Unavailable("down".to_string()))
    }
}

#[tokio::test]
async fn blank_resource_is_rejected_before_fetching() {
    let source = CountingOffline::default();

    for id in ["", "  "] {
        let err = check_availability(
            &source,
            &SlotAvailabilityResolver::default(),
            id,
            day(),
            &catalog(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, SlotError::InvalidResource(_)), "got {err:?}");
    }
    assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

    let err = check_availability(&Offline, &SlotAvailabilityResolver::default(), "", day(), &catalog())
        .await
        .unwrap_err();
    assert!(matches!(err, SlotError::InvalidResource(_)));
}

#[test]
fn in_memory_source_loads_json() {
    let json = r#"[
        {"resource_id": "desk-4", "date": "2026-03-16", "start": "09:30:00", "end": "09:45:00"}
    ]"#;

    let source = InMemoryReservations::from_json(json).unwrap();
    assert_eq!(source.len(), 1);

    assert!(matches!(
        InMemoryReservations::from_json(r#"{"resource_id": 1}"#),
        Err(FetchError::Malformed(_))
    ));
}

#[tokio::test]
async fn sources_work_behind_trait_objects() {
    let sources: Vec<std::sync::Arc<dyn ReservationSource>> = vec![
        std::sync::Arc::new(InMemoryReservations::new(vec![Reservation::new(
            "desk-4",
            day(),
            t(9, 0),
            t(12, 0),
        )])),
        std::sync::Arc::new(Offline),
    ];
    let resolver = SlotAvailabilityResolver::default();

    let booked = check_availability(sources[0].as_ref(), &resolver, "desk-4", day(), &catalog())
        .await
        .unwrap();
    let offline =
        check_availability(sources[1].as_ref(), &resolver, "desk-4", day(), &catalog()).await;

    assert_eq!(booked.available_count(), 0);
    assert!(offline.is_err());
}
