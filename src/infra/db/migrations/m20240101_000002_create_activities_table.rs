//! Migration: Create activities table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Activities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Activities::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Activities::Description).text().not_null())
                    .col(ColumnDef::new(Activities::Content).text().null())
                    .col(ColumnDef::new(Activities::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Activities::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Activities::Category).string_len(50).null())
                    .col(
                        ColumnDef::new(Activities::Tags)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Activities::RegistrationLink).string().null())
                    .col(
                        ColumnDef::new(Activities::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Activities::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Activities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Activities::UpdatedBy).uuid().null())
                    .col(ColumnDef::new(Activities::UpdatedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        // Canonical public ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_activities_status_order")
                    .table(Activities::Table)
                    .col(Activities::Status)
                    .col(Activities::OrderIndex)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
    Title,
    Description,
    Content,
    ImageUrl,
    Status,
    Category,
    Tags,
    RegistrationLink,
    OrderIndex,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
}
