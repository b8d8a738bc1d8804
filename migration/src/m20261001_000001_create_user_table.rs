use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Name))
                    .col(string_uniq(User::Email))
                    .col(string(User::Photo).default("default.jpg"))
                    .col(string(User::Role).default("user"))
                    .col(string(User::Password))
                    .col(timestamp_with_time_zone_null(User::PasswordChangedAt))
                    .col(string_null(User::PasswordResetToken))
                    .col(timestamp_with_time_zone_null(User::PasswordResetExpires))
                    .col(boolean(User::Active).default(true))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_password_reset_token")
                    .table(User::Table)
                    .col(User::PasswordResetToken)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    Photo,
    Role,
    Password,
    PasswordChangedAt,
    PasswordResetToken,
    PasswordResetExpires,
    Active,
    CreatedAt,
}
