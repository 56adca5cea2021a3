//! SeaORM implementation of DriverRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::db_err;
use crate::domain::driver::{Driver, DriverRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::driver;

pub struct SeaOrmDriverRepository {
    db: DatabaseConnection,
}

impl SeaOrmDriverRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: driver::Model) -> Driver {
    Driver {
        driver_id: m.driver_id,
        name: m.name,
        email: m.email,
        nic: m.nic,
        created_at: m.created_at,
    }
}

#[async_trait]
impl DriverRepository for SeaOrmDriverRepository {
    async fn save(&self, d: Driver) -> DomainResult<()> {
        debug!("Saving driver: {}", d.driver_id);

        if driver::Entity::find_by_id(&d.driver_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some()
        {
            return Err(DomainError::Conflict(format!("Driver {}", d.driver_id)));
        }

        let model = driver::ActiveModel {
            driver_id: Set(d.driver_id),
            name: Set(d.name),
            email: Set(d.email),
            nic: Set(d.nic),
            created_at: Set(d.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, driver_id: &str) -> DomainResult<Option<Driver>> {
        let model = driver::Entity::find_by_id(driver_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn exists(&self, driver_id: &str) -> DomainResult<bool> {
        let count = driver::Entity::find_by_id(driver_id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> DomainResult<Vec<Driver>> {
        let models = driver::Entity::find()
            .order_by_asc(driver::Column::DriverId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, d: Driver) -> DomainResult<()> {
        let existing = driver::Entity::find_by_id(&d.driver_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Driver", "driver_id", d.driver_id));
        };

        let mut active: driver::ActiveModel = existing.into();
        active.name = Set(d.name);
        active.email = Set(d.email);
        active.nic = Set(d.nic);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, driver_id: &str) -> DomainResult<()> {
        let result = driver::Entity::delete_by_id(driver_id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Driver", "driver_id", driver_id));
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        driver::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
