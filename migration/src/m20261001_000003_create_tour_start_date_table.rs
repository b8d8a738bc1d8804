use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000002_create_tour_table::Tour;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourStartDate::Table)
                    .if_not_exists()
                    .col(pk_auto(TourStartDate::Id))
                    .col(integer(TourStartDate::TourId))
                    .col(timestamp_with_time_zone(TourStartDate::StartDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_start_date_tour_id")
                            .from(TourStartDate::Table, TourStartDate::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourStartDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourStartDate {
    Table,
    Id,
    TourId,
    StartDate,
}
