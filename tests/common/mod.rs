//! Shared fixtures for integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use smart_parking::application::{LifecycleManager, SlotAllocator, SlotLockRegistry};
use smart_parking::domain::RepositoryProvider;
use smart_parking::infrastructure::database::seed::seed_if_empty;
use smart_parking::infrastructure::MemoryRepositoryProvider;
use smart_parking::notifications::create_event_bus;
use smart_parking::SharedEventBus;

pub struct TestHarness {
    pub repos: Arc<dyn RepositoryProvider>,
    pub allocator: Arc<SlotAllocator>,
    pub lifecycle: Arc<LifecycleManager>,
    pub event_bus: SharedEventBus,
    pub locks: Arc<SlotLockRegistry>,
}

/// In-memory service wired the same way main() wires the real one,
/// pre-seeded with the default slot catalog and sample drivers.
pub async fn harness() -> TestHarness {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
    seed_if_empty(repos.as_ref()).await.unwrap();

    let locks = SlotLockRegistry::shared();
    let event_bus = create_event_bus();

    TestHarness {
        allocator: Arc::new(SlotAllocator::new(
            repos.clone(),
            locks.clone(),
            event_bus.clone(),
        )),
        lifecycle: Arc::new(LifecycleManager::new(
            repos.clone(),
            locks.clone(),
            event_bus.clone(),
        )),
        repos,
        event_bus,
        locks,
    }
}

/// Today at `hour:minute` UTC. Tests only care about relative ordering.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, minute, 0).unwrap()
}
