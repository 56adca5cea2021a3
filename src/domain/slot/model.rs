//! Parking slot domain entity

use chrono::{DateTime, Utc};

use crate::domain::reservation::Reservation;

/// A physical, uniquely identified parking space.
///
/// `is_available` is a derived cache of "no active reservation covers now".
/// It exists for cheap display reads only; commit decisions
/// always recompute overlap against the actual reservation set.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Human-facing ID, e.g. `A001`. Immutable.
    pub slot_id: String,
    /// Descriptive location, e.g. "Ground Floor - Section A"
    pub location: String,
    pub floor: String,
    pub section: String,
    /// Derived availability cache, never the source of truth
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Slot {
    pub fn new(
        slot_id: impl Into<String>,
        location: impl Into<String>,
        floor: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            slot_id: slot_id.into(),
            location: location.into(),
            floor: floor.into(),
            section: section.into(),
            is_available: true,
            created_at: Utc::now(),
        }
    }
}

/// Derive slot availability at instant `t` from its active-reservation set.
///
/// Pure function of the set and `t`: a slot is available iff no active
/// reservation's `[entry, exit)` window contains `t`. Reservations in the
/// list that are not active are ignored, so callers may pass unfiltered rows.
pub fn derive_availability(reservations: &[Reservation], t: DateTime<Utc>) -> bool {
    !reservations.iter().any(|r| r.covers(t))
}

// ── Tests ──────────────────────────────────────────────────────
