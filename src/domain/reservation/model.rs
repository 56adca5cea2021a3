//! Reservation domain entity
//!
//! A reservation is an exclusive claim by one driver on one slot for the
//! half-open window `[entry_time, exit_time)`. The active reservations of
//! any slot are pairwise non-overlapping.

use chrono::{DateTime, Utc};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Half-open time window `[entry, exit)`.
///
/// Constructed only through [`TimeRange::new`], which rejects empty and
/// inverted windows, so every `TimeRange` in the system is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    entry: DateTime<Utc>,
    exit: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, failing with `InvalidRange` unless `exit > entry`.
    pub fn new(entry: DateTime<Utc>, exit: DateTime<Utc>) -> DomainResult<Self> {
        if exit <= entry {
            return Err(DomainError::InvalidRange);
        }
        Ok(Self { entry, exit })
    }

    pub fn entry(&self) -> DateTime<Utc> {
        self.entry
    }

    pub fn exit(&self) -> DateTime<Utc> {
        self.exit
    }

    /// Two half-open ranges `[a,b)` and `[c,d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.entry < other.exit && other.entry < self.exit
    }

    /// Whether `t` falls inside `[entry, exit)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.entry <= t && t < self.exit
    }
}

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// The claim is currently in force
    Active,
    /// Driver left, or the window ran out
    Completed,
    /// Cancelled by driver or operator
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Completed and cancelled are terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exclusive claim on one slot for a time window
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID, generated at creation
    pub reservation_id: String,
    /// Driver holding the claim
    pub driver_id: String,
    /// Slot being claimed
    pub slot_id: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    /// Creation timestamp, immutable
    pub reserved_at: DateTime<Utc>,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Create a new active reservation with a fresh ID.
    pub fn new(driver_id: impl Into<String>, slot_id: impl Into<String>, range: TimeRange) -> Self {
        Self {
            reservation_id: uuid::Uuid::new_v4().to_string(),
            driver_id: driver_id.into(),
            slot_id: slot_id.into(),
            entry_time: range.entry(),
            exit_time: range.exit(),
            reserved_at: Utc::now(),
            status: ReservationStatus::Active,
        }
    }

    /// The reservation's window as a validated range.
    ///
    /// Stored rows always satisfy `exit > entry`, so this cannot fail for
    /// data written through the domain layer.
    pub fn range(&self) -> TimeRange {
        TimeRange {
            entry: self.entry_time,
            exit: self.exit_time,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Whether this reservation claims the slot at instant `t`.
    pub fn covers(&self, t: DateTime<Utc>) -> bool {
        self.is_active() && self.range().contains(t)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeRange {
        TimeRange::new(at(h1, m1), at(h2, m2)).unwrap()
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        assert!(matches!(
            TimeRange::new(at(10, 0), at(9, 0)),
            Err(DomainError::InvalidRange)
        ));
        assert!(matches!(
            TimeRange::new(at(10, 0), at(10, 0)),
            Err(DomainError::InvalidRange)
        ));
    }

    #[test]
    fn overlap_is_half_open() {
        let morning = range(9, 0, 10, 0);

        // Adjacent windows share a boundary instant but do not overlap.
        assert!(!morning.overlaps(&range(10, 0, 11, 0)));
        assert!(!range(10, 0, 11, 0).overlaps(&morning));

        // Contained, partial and identical windows all overlap.
        assert!(morning.overlaps(&range(9, 30, 9, 45)));
        assert!(morning.overlaps(&range(9, 30, 10, 30)));
        assert!(morning.overlaps(&range(8, 0, 9, 1)));
        assert!(morning.overlaps(&morning));

        // Disjoint windows do not.
        assert!(!morning.overlaps(&range(11, 0, 12, 0)));
    }

    #[test]
    fn contains_includes_entry_excludes_exit() {
        let r = range(9, 0, 10, 0);
        assert!(r.contains(at(9, 0)));
        assert!(r.contains(at(9, 59)));
        assert!(!r.contains(at(10, 0)));
        assert!(!r.contains(at(8, 59)));
    }

    #[test]
    fn new_reservation_is_active_with_fresh_id() {
        let now = Utc::now();
        let r = Reservation::new(
            "DRV001",
            "A001",
            TimeRange::new(now + Duration::hours(1), now + Duration::hours(2)).unwrap(),
        );
        assert!(r.is_active());
        assert!(!r.reservation_id.is_empty());
        assert_eq!(r.status, ReservationStatus::Active);
        assert_eq!(r.slot_id, "A001");

        let other = Reservation::new(
            "DRV001",
            "A001",
            TimeRange::new(now + Duration::hours(1), now + Duration::hours(2)).unwrap(),
        );
        assert_ne!(r.reservation_id, other.reservation_id);
    }

    #[test]
    fn covers_requires_active_status() {
        let mut r = Reservation::new("DRV001", "A001", range(9, 0, 10, 0));
        assert!(r.covers(at(9, 30)));
        assert!(!r.covers(at(10, 0)));

        r.status = ReservationStatus::Cancelled;
        assert!(!r.covers(at(9, 30)));
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::parse("expired"), None);
    }

    #[test]
    fn terminality() {
        assert!(!ReservationStatus::Active.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
    }
}
