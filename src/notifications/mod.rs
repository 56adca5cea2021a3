//! Notifications module
//!
//! Real-time change notifications for observer clients (availability
//! dashboards, reservation portals).
//!
//! # Features
//! - Event bus for pub/sub messaging
//! - WebSocket endpoint for observers
//! - Filtering by slot and event type
//!
//! # Usage
//! ```ignore
//! use smart_parking::notifications::{create_event_bus, Event, SlotUpdatedEvent};
//! use chrono::Utc;
//!
//! let event_bus = create_event_bus();
//!
//! event_bus.publish(Event::SlotUpdated(SlotUpdatedEvent {
//!     slot_id: "A001".to_string(),
//!     is_available: false,
//!     timestamp: Utc::now(),
//! }));
//! ```
//!
//! # WebSocket Endpoint
//! Connect to `/api/v1/notifications/ws` with optional query parameters:
//! - `slot_id` - Filter events by slot
//! - `event_types` - Comma-separated list of event types to receive

pub mod event_bus;
pub mod events;
pub mod websocket;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
pub use websocket::{create_notification_state, ws_notifications_handler, NotificationState};
