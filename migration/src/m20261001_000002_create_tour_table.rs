use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tour::Table)
                    .if_not_exists()
                    .col(pk_auto(Tour::Id))
                    .col(string_uniq(Tour::Name))
                    .col(integer(Tour::Duration))
                    .col(integer(Tour::MaxGroupSize))
                    .col(string(Tour::Difficulty))
                    .col(double(Tour::RatingsAverage).default(4.5))
                    .col(integer(Tour::RatingsQuantity).default(0))
                    .col(double(Tour::Price))
                    .col(double_null(Tour::PriceDiscount))
                    .col(string(Tour::Summary))
                    .col(text_null(Tour::Description))
                    .col(string(Tour::ImageCover))
                    .col(json(Tour::Images))
                    .col(
                        timestamp_with_time_zone(Tour::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(double_null(Tour::StartLng))
                    .col(double_null(Tour::StartLat))
                    .col(string_null(Tour::StartAddress))
                    .col(string_null(Tour::StartDescription))
                    .to_owned(),
            )
            .await?;

        // Covers the tour-stats match and the default listing sort.
        manager
            .create_index(
                Index::create()
                    .name("idx_tour_price_ratings_average")
                    .table(Tour::Table)
                    .col(Tour::Price)
                    .col(Tour::RatingsAverage)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tour::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tour {
    Table,
    Id,
    Name,
    Duration,
    MaxGroupSize,
    Difficulty,
    RatingsAverage,
    RatingsQuantity,
    Price,
    PriceDiscount,
    Summary,
    Description,
    ImageCover,
    Images,
    CreatedAt,
    StartLng,
    StartLat,
    StartAddress,
    StartDescription,
}
