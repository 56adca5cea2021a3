use thiserror::Error;

/// Domain-level error taxonomy.
///
/// All variants are terminal, synchronous validation failures: the core
/// never retries them, and a failed operation leaves the store untouched.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid time range: exit_time must be after entry_time")]
    InvalidRange,

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Slot {slot_id} has an active reservation overlapping the requested range")]
    SlotConflict { slot_id: String },

    #[error("Reservation {reservation_id} is {status} and can no longer change")]
    InvalidTransition {
        reservation_id: String,
        status: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_field() {
        let e = DomainError::not_found("Slot", "slot_id", "A001");
        assert_eq!(e.to_string(), "Not found: Slot with slot_id=A001");
    }

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::InvalidRange.is_transient());
        assert!(!DomainError::SlotConflict {
            slot_id: "A001".into()
        }
        .is_transient());
    }
}
