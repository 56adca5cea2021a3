//! Business logic: allocation, lifecycle, derived availability.

pub mod allocator;
pub mod availability;
pub mod lifecycle;

pub use allocator::{SlotAllocator, SlotLockRegistry};
pub use availability::{recompute_slot_availability, start_availability_refresh_task};
pub use lifecycle::LifecycleManager;
