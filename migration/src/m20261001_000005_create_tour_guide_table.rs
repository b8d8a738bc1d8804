use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User, m20261001_000002_create_tour_table::Tour,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourGuide::Table)
                    .if_not_exists()
                    .col(integer(TourGuide::TourId))
                    .col(integer(TourGuide::UserId))
                    .primary_key(
                        Index::create()
                            .col(TourGuide::TourId)
                            .col(TourGuide::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_guide_tour_id")
                            .from(TourGuide::Table, TourGuide::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_guide_user_id")
                            .from(TourGuide::Table, TourGuide::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourGuide::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourGuide {
    Table,
    TourId,
    UserId,
}
