//! Lifecycle integration tests: transitions, time edits, deletes.

mod common;

use smart_parking::domain::{DomainError, ReservationStatus};
use smart_parking::notifications::{Event, ReservationChange};

use common::{at, harness};

#[tokio::test]
async fn failed_edit_leaves_times_unchanged() {
    let h = harness().await;

    let first = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();
    h.allocator
        .reserve("DRV002", "A001", at(10, 0), at(11, 0))
        .await
        .unwrap();

    // Extending the first booking into the second must conflict.
    let err = h
        .lifecycle
        .edit(&first.reservation_id, at(9, 0), at(10, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SlotConflict { .. }));

    let unchanged = h
        .repos
        .reservations()
        .find_by_id(&first.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.entry_time, at(9, 0));
    assert_eq!(unchanged.exit_time, at(10, 0));
}

#[tokio::test]
async fn edit_may_keep_its_own_window() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    // Shrinking within the original window overlaps only itself.
    let edited = h
        .lifecycle
        .edit(&reservation.reservation_id, at(9, 15), at(9, 45))
        .await
        .unwrap();
    assert_eq!(edited.entry_time, at(9, 15));
    assert_eq!(edited.exit_time, at(9, 45));
}

#[tokio::test]
async fn cancelled_window_can_be_rebooked() {
    let h = harness().await;

    let first = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    h.lifecycle
        .transition(&first.reservation_id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    // The cancelled reservation no longer blocks the window.
    let second = h
        .allocator
        .reserve("DRV002", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();
    assert_eq!(second.driver_id, "DRV002");
    assert_eq!(second.status, ReservationStatus::Active);
}

#[tokio::test]
async fn terminal_states_accept_no_further_transitions() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    h.lifecycle
        .transition(&reservation.reservation_id, ReservationStatus::Completed)
        .await
        .unwrap();

    for target in [
        ReservationStatus::Active,
        ReservationStatus::Cancelled,
        ReservationStatus::Completed,
    ] {
        let err = h
            .lifecycle
            .transition(&reservation.reservation_id, target)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn reactivation_is_rejected_even_from_active() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    let err = h
        .lifecycle
        .transition(&reservation.reservation_id, ReservationStatus::Active)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}

#[tokio::test]
async fn editing_a_terminal_reservation_fails() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();
    h.lifecycle
        .transition(&reservation.reservation_id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    let err = h
        .lifecycle
        .edit(&reservation.reservation_id, at(11, 0), at(12, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}

#[tokio::test]
async fn delete_frees_the_window_in_any_status() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    h.lifecycle.delete(&reservation.reservation_id).await.unwrap();

    assert!(h
        .repos
        .reservations()
        .find_by_id(&reservation.reservation_id)
        .await
        .unwrap()
        .is_none());

    // Window is bookable again.
    h.allocator
        .reserve("DRV002", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_of_unknown_reservation_is_not_found() {
    let h = harness().await;

    let err = h.lifecycle.delete("no-such-id").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref entity, .. } if *entity == "Reservation"));
}

#[tokio::test]
async fn racing_transitions_commit_exactly_one_terminal_status() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    // Hold the slot's lock so both transitions queue behind it and race
    // only against each other once it is released.
    let gate = h.locks.lock_for("A001");
    let held = gate.lock().await;

    let complete = tokio::spawn({
        let lifecycle = h.lifecycle.clone();
        let id = reservation.reservation_id.clone();
        async move { lifecycle.transition(&id, ReservationStatus::Completed).await }
    });
    let cancel = tokio::spawn({
        let lifecycle = h.lifecycle.clone();
        let id = reservation.reservation_id.clone();
        async move { lifecycle.transition(&id, ReservationStatus::Cancelled).await }
    });

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    drop(held);

    let results = [complete.await.unwrap(), cancel.await.unwrap()];
    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1, "exactly one transition must commit");

    for r in &results {
        if let Err(e) = r {
            assert!(matches!(e, DomainError::InvalidTransition { .. }));
        }
    }

    // The committed terminal status is never overwritten by the loser.
    let stored = h
        .repos
        .reservations()
        .find_by_id(&reservation.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, winners[0].status);
    assert!(stored.status.is_terminal());
}

#[tokio::test]
async fn edit_queued_behind_a_cancel_fails_instead_of_rewriting() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    let gate = h.locks.lock_for("A001");
    let held = gate.lock().await;

    // Queue the cancel first, then the edit; the slot mutex is fair, so
    // the edit acquires the lock after the reservation is already terminal.
    let cancel = tokio::spawn({
        let lifecycle = h.lifecycle.clone();
        let id = reservation.reservation_id.clone();
        async move { lifecycle.transition(&id, ReservationStatus::Cancelled).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let edit = tokio::spawn({
        let lifecycle = h.lifecycle.clone();
        let id = reservation.reservation_id.clone();
        async move { lifecycle.edit(&id, at(11, 0), at(12, 0)).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    drop(held);

    cancel.await.unwrap().unwrap();
    let err = edit.await.unwrap().unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));

    let stored = h
        .repos
        .reservations()
        .find_by_id(&reservation.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReservationStatus::Cancelled);
    assert_eq!(stored.entry_time, at(9, 0));
    assert_eq!(stored.exit_time, at(10, 0));
}

#[tokio::test]
async fn transition_broadcasts_the_matching_change() {
    let h = harness().await;

    let reservation = h
        .allocator
        .reserve("DRV001", "A001", at(9, 0), at(10, 0))
        .await
        .unwrap();

    let mut subscriber = h.event_bus.subscribe();
    h.lifecycle
        .transition(&reservation.reservation_id, ReservationStatus::Completed)
        .await
        .unwrap();

    // slot_updated first, then reservation_updated.
    let first = subscriber.recv().await.unwrap();
    assert!(matches!(first.event, Event::SlotUpdated(_)));

    let second = subscriber.recv().await.unwrap();
    match second.event {
        Event::ReservationUpdated(e) => {
            assert_eq!(e.change, ReservationChange::Completed);
            assert_eq!(e.reservation_id, reservation.reservation_id);
        }
        other => panic!("expected reservation event, got {other:?}"),
    }
}
