//! Notification events
//!
//! Defines the change notifications broadcast to connected observers.
//! Events are hints to refresh, never the system of record: an observer
//! that misses one recovers by re-fetching state on reconnect or via its
//! polling fallback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// A slot's derived availability changed
    SlotUpdated(SlotUpdatedEvent),
    /// A reservation was created or changed
    ReservationUpdated(ReservationUpdatedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::SlotUpdated(_) => "slot_updated",
            Event::ReservationUpdated(_) => "reservation_updated",
        }
    }

    /// The slot this event concerns
    pub fn slot_id(&self) -> &str {
        match self {
            Event::SlotUpdated(e) => &e.slot_id,
            Event::ReservationUpdated(e) => &e.slot_id,
        }
    }
}

/// What happened to a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationChange {
    Created,
    TimesChanged,
    Completed,
    Cancelled,
    Deleted,
}

/// Slot availability changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotUpdatedEvent {
    pub slot_id: String,
    pub is_available: bool,
    pub timestamp: DateTime<Utc>,
}

/// Reservation changed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdatedEvent {
    pub reservation_id: String,
    pub slot_id: String,
    pub driver_id: String,
    pub change: ReservationChange,
    pub timestamp: DateTime<Utc>,
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let msg = EventMessage::new(Event::SlotUpdated(SlotUpdatedEvent {
            slot_id: "A001".to_string(),
            is_available: false,
            timestamp: Utc::now(),
        }));

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "slot_updated");
        assert_eq!(json["data"]["slot_id"], "A001");
        assert_eq!(json["data"]["is_available"], false);
        assert!(json["id"].is_string());
    }

    #[test]
    fn change_kind_uses_snake_case() {
        let json = serde_json::to_value(ReservationChange::TimesChanged).unwrap();
        assert_eq!(json, "times_changed");
    }

    #[test]
    fn slot_id_accessor_covers_both_kinds() {
        let slot_event = Event::SlotUpdated(SlotUpdatedEvent {
            slot_id: "B003".to_string(),
            is_available: true,
            timestamp: Utc::now(),
        });
        assert_eq!(slot_event.slot_id(), "B003");
        assert_eq!(slot_event.event_type(), "slot_updated");

        let res_event = Event::ReservationUpdated(ReservationUpdatedEvent {
            reservation_id: "r1".to_string(),
            slot_id: "B003".to_string(),
            driver_id: "DRV001".to_string(),
            change: ReservationChange::Created,
            timestamp: Utc::now(),
        });
        assert_eq!(res_event.slot_id(), "B003");
        assert_eq!(res_event.event_type(), "reservation_updated");
    }
}
