//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_required(&self, reservation_id: &str) -> DomainResult<reservation::Model> {
        reservation::Entity::find_by_id(reservation_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                DomainError::not_found("Reservation", "reservation_id", reservation_id)
            })
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    // Rows are written only through this repository; a status string
    // outside the known set means the row is corrupt, and treating it as
    // terminal would silently free its window.
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!(
            "reservation {} has unknown status '{}'",
            m.reservation_id, m.status
        ))
    })?;

    Ok(Reservation {
        reservation_id: m.reservation_id,
        driver_id: m.driver_id,
        slot_id: m.slot_id,
        entry_time: m.entry_time,
        exit_time: m.exit_time,
        reserved_at: m.reserved_at,
        status,
    })
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {}", r.reservation_id);

        let model = reservation::ActiveModel {
            reservation_id: Set(r.reservation_id),
            driver_id: Set(r.driver_id),
            slot_id: Set(r.slot_id),
            entry_time: Set(r.entry_time),
            exit_time: Set(r.exit_time),
            reserved_at: Set(r.reserved_at),
            status: Set(r.status.as_str().to_string()),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(reservation_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_active_for_slot(&self, slot_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::SlotId.eq(slot_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
            .order_by_asc(reservation::Column::EntryTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_desc(reservation::Column::ReservedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_driver(&self, driver_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::DriverId.eq(driver_id))
            .order_by_desc(reservation::Column::ReservedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> DomainResult<()> {
        let existing = self.find_required(reservation_id).await?;

        let mut active: reservation::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_range(
        &self,
        reservation_id: &str,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
    ) -> DomainResult<()> {
        let existing = self.find_required(reservation_id).await?;

        let mut active: reservation::ActiveModel = existing.into();
        active.entry_time = Set(entry_time);
        active.exit_time = Set(exit_time);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, reservation_id: &str) -> DomainResult<()> {
        let result = reservation::Entity::delete_by_id(reservation_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found(
                "Reservation",
                "reservation_id",
                reservation_id,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(status: &str) -> reservation::Model {
        let now = Utc::now();
        reservation::Model {
            reservation_id: "r1".to_string(),
            driver_id: "DRV001".to_string(),
            slot_id: "A001".to_string(),
            entry_time: now,
            exit_time: now + chrono::Duration::hours(1),
            reserved_at: now,
            status: status.to_string(),
        }
    }

    #[test]
    fn known_status_strings_convert() {
        for status in ["active", "completed", "cancelled"] {
            let r = model_to_domain(row(status)).unwrap();
            assert_eq!(r.status.as_str(), status);
        }
    }

    #[test]
    fn corrupt_status_surfaces_as_storage_error() {
        let err = model_to_domain(row("expired")).unwrap_err();
        match err {
            DomainError::Storage(msg) => {
                assert!(msg.contains("expired"));
                assert!(msg.contains("r1"));
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }
}
