//! Derived slot availability
//!
//! `is_available` on a slot is a cache of "no active reservation covers
//! now". This module recomputes it from the authoritative
//! reservation set and runs the periodic refresh task that keeps the cache
//! tracking windows that open or close with no accompanying API call.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::allocator::SlotLockRegistry;
use crate::domain::{derive_availability, DomainResult, RepositoryProvider};
use crate::notifications::{Event, SharedEventBus, SlotUpdatedEvent};
use crate::shared::shutdown::ShutdownSignal;

/// Recompute and persist one slot's derived availability.
///
/// Returns the new value. Callers that mutate the reservation set invoke
/// this inside the slot's critical section so the cache never runs ahead
/// of the set it is derived from.
pub async fn recompute_slot_availability(
    repos: &dyn RepositoryProvider,
    slot_id: &str,
) -> DomainResult<bool> {
    let active = repos.reservations().find_active_for_slot(slot_id).await?;
    let is_available = derive_availability(&active, chrono::Utc::now());
    repos
        .slots()
        .update_availability(slot_id, is_available)
        .await?;
    Ok(is_available)
}

/// Start the availability refresh background task.
///
/// Every `interval_secs` (default 10, the observers' polling fallback
/// bound) the task re-derives `is_available` for every slot and broadcasts
/// a `slot_updated` event for each slot whose cached value changed.
pub fn start_availability_refresh_task(
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLockRegistry>,
    event_bus: SharedEventBus,
    shutdown: ShutdownSignal,
    interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(interval = interval_secs, "Availability refresh task started");

        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = refresh_all(&repos, &locks, &event_bus).await {
                        warn!(error = %e, "Availability refresh error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Availability refresh task shutting down");
                    break;
                }
            }
        }

        info!("Availability refresh task stopped");
    });
}

async fn refresh_all(
    repos: &Arc<dyn RepositoryProvider>,
    locks: &Arc<SlotLockRegistry>,
    event_bus: &SharedEventBus,
) -> DomainResult<()> {
    let slots = repos.slots().find_all().await?;

    for slot in slots {
        let lock = locks.lock_for(&slot.slot_id);
        let _guard = lock.lock().await;

        let is_available = recompute_slot_availability(repos.as_ref(), &slot.slot_id).await?;
        drop(_guard);

        if is_available != slot.is_available {
            event_bus.publish(Event::SlotUpdated(SlotUpdatedEvent {
                slot_id: slot.slot_id.clone(),
                is_available,
                timestamp: chrono::Utc::now(),
            }));
        }
    }

    Ok(())
}
