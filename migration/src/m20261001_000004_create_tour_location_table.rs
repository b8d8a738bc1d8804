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
                    .table(TourLocation::Table)
                    .if_not_exists()
                    .col(pk_auto(TourLocation::Id))
                    .col(integer(TourLocation::TourId))
                    .col(integer(TourLocation::Position))
                    .col(double(TourLocation::Lng))
                    .col(double(TourLocation::Lat))
                    .col(string_null(TourLocation::Address))
                    .col(string_null(TourLocation::Description))
                    .col(integer(TourLocation::Day))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_location_tour_id")
                            .from(TourLocation::Table, TourLocation::TourId)
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
            .drop_table(Table::drop().table(TourLocation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourLocation {
    Table,
    Id,
    TourId,
    Position,
    Lng,
    Lat,
    Address,
    Description,
    Day,
}
