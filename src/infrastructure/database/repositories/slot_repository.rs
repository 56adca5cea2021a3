//! SeaORM implementation of SlotRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::slot;

pub struct SeaOrmSlotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSlotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: slot::Model) -> Slot {
    Slot {
        slot_id: m.slot_id,
        location: m.location,
        floor: m.floor,
        section: m.section,
        is_available: m.is_available,
        created_at: m.created_at,
    }
}

#[async_trait]
impl SlotRepository for SeaOrmSlotRepository {
    async fn save(&self, s: Slot) -> DomainResult<()> {
        debug!("Saving slot: {}", s.slot_id);

        if slot::Entity::find_by_id(&s.slot_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some()
        {
            return Err(DomainError::Conflict(format!("Slot {}", s.slot_id)));
        }

        let model = slot::ActiveModel {
            slot_id: Set(s.slot_id),
            location: Set(s.location),
            floor: Set(s.floor),
            section: Set(s.section),
            is_available: Set(s.is_available),
            created_at: Set(s.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, slot_id: &str) -> DomainResult<Option<Slot>> {
        let model = slot::Entity::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        let models = slot::Entity::find()
            .order_by_asc(slot::Column::SlotId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update_availability(&self, slot_id: &str, is_available: bool) -> DomainResult<()> {
        let existing = slot::Entity::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Slot", "slot_id", slot_id));
        };

        let mut active: slot::ActiveModel = existing.into();
        active.is_available = Set(is_available);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        slot::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
