//! Allocation integration tests: exclusive booking over time windows.

mod common;

use smart_parking::domain::DomainError;
use smart_parking::notifications::Event;

use common::{at, harness};

#[tokio::test]
async fn overlapping_request_is_rejected_without_side_effects() {
    let h = harness().await;

    // DRV001 books A001 09:00-10:00.
    h.allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    // DRV002 wants A001 09:30-10:30. Must conflict.
    let err = h
        .allocator
        .reserve("DRV002", "A001", at(9, 30), at(10, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SlotConflict { ref slot_id } if slot_id == "A001"));

    // The rejected request wrote nothing.
    let active = h
        .repos
        .reservations()
        .find_active_for_slot("A001")
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].driver_id, "DRV001");
}

#[tokio::test]
async fn adjacent_windows_on_same_slot_coexist() {
    let h = harness().await;

    h.allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    // Exit is exclusive: a booking starting exactly at 10:00 fits.
    h.allocator
        .reserve("DRV002", "A001", at(10, 0), at(11, 0))
        .await
        .unwrap();

    let active = h
        .repos
        .reservations()
        .find_active_for_slot("A001")
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn concurrent_requests_for_same_window_commit_exactly_one() {
    let h = harness().await;

    let drivers = ["DRV001", "DRV002", "DRV003", "DRV004", "DRV005"];
    let mut handles = Vec::new();
    for driver in drivers {
        let allocator = h.allocator.clone();
        handles.push(tokio::spawn(async move {
            allocator.reserve(driver, "B001", at(14, 0), at(15, 0)).await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::SlotConflict { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, drivers.len() - 1);

    let active = h
        .repos
        .reservations()
        .find_active_for_slot("B001")
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn disjoint_slots_are_allocated_independently() {
    let h = harness().await;

    // Same window, different slots: all must succeed.
    let slots = ["A001", "A002", "B001", "B002", "A101"];
    let mut handles = Vec::new();
    for slot in slots {
        let allocator = h.allocator.clone();
        handles.push(tokio::spawn(async move {
            allocator.reserve("DRV001", slot, at(9, 0), at(17, 0)).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn degenerate_and_inverted_ranges_are_invalid() {
    let h = harness().await;

    let err = h
        .allocator
        .reserve("DRV001", "A001", at(10, 0), at(10, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { .. }));

    let err = h
        .allocator
        .reserve("DRV001", "A001", at(11, 0), at(10, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { .. }));

    // Neither attempt reached the store.
    assert!(h
        .repos
        .reservations()
        .find_active_for_slot("A001")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unknown_driver_and_slot_are_not_found() {
    let h = harness().await;

    let err = h
        .allocator
        .reserve("DRV999", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref entity, .. } if *entity == "Driver"));

    let err = h
        .allocator
        .reserve("DRV001", "Z999", at(9, 0), at(10, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref entity, .. } if *entity == "Slot"));
}

#[tokio::test]
async fn successful_booking_broadcasts_slot_and_reservation_events() {
    let h = harness().await;
    let mut subscriber = h.event_bus.subscribe();

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    let first = subscriber.recv().await.unwrap();
    assert!(matches!(first.event, Event::SlotUpdated(ref e) if e.slot_id == "A001"));

    let second = subscriber.recv().await.unwrap();
    match second.event {
        Event::ReservationUpdated(e) => {
            assert_eq!(e.reservation_id, reservation.reservation_id);
            assert_eq!(e.driver_id, "DRV001");
        }
        other => panic!("expected reservation event, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_booking_broadcasts_nothing() {
    let h = harness().await;

    h.allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    // Subscribe after the successful booking so only new events arrive.
    let mut subscriber = h.event_bus.subscribe();

    h.allocator
        .reserve("DRV002", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap_err();

    let outcome = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        subscriber.recv(),
    )
    .await;
    assert!(outcome.is_err(), "conflict must not publish events");
}
