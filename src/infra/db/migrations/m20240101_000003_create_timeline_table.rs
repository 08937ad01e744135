//! Migration: Create timeline table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Timeline::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Timeline::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Timeline::Title).string().not_null())
                    .col(ColumnDef::new(Timeline::Date).date().not_null())
                    .col(ColumnDef::new(Timeline::Description).text().not_null())
                    .col(ColumnDef::new(Timeline::Tags).string().null())
                    .col(
                        ColumnDef::new(Timeline::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timeline_date")
                    .table(Timeline::Table)
                    .col(Timeline::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Timeline::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Timeline {
    Table,
    Id,
    Title,
    Date,
    Description,
    Tags,
    CreatedAt,
}
