//! Create reservations table
//!
//! Stores slot reservations with their half-open time window. Indexed by
//! (slot_id, status) because the allocator's overlap check lists the active
//! set of one slot on every commit.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_slots::Slots;
use super::m20250101_000002_create_drivers::Drivers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::ReservationId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::DriverId).string().not_null())
                    .col(ColumnDef::new(Reservations::SlotId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::EntryTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ExitTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::ReservedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_slot")
                            .from(Reservations::Table, Reservations::SlotId)
                            .to(Slots::Table, Slots::SlotId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_driver")
                            .from(Reservations::Table, Reservations::DriverId)
                            .to(Drivers::Table, Drivers::DriverId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_slot_status")
                    .table(Reservations::Table)
                    .col(Reservations::SlotId)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    ReservationId,
    DriverId,
    SlotId,
    EntryTime,
    ExitTime,
    ReservedAt,
    Status,
}
