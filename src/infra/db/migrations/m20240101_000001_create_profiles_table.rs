//! Migration: Create profiles table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Profiles::ProfileId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Profiles::FullName).string_len(100).null())
                    .col(ColumnDef::new(Profiles::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Profiles::Role)
                            .string_len(20)
                            .not_null()
                            .default("user"),
                    )
                    .col(
                        ColumnDef::new(Profiles::Status)
                            .string_len(30)
                            .not_null()
                            .default("pending_verification"),
                    )
                    .col(
                        ColumnDef::new(Profiles::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Profiles::Reason).text().null())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Profiles::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Profiles::ApprovedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Profiles::ApprovedBy).uuid().null())
                    .col(ColumnDef::new(Profiles::RejectedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Profiles::SuspendedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        // Pending list and admin-management filters
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_role_status")
                    .table(Profiles::Table)
                    .col(Profiles::Role)
                    .col(Profiles::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    ProfileId,
    FullName,
    Email,
    Role,
    Status,
    IsApproved,
    Reason,
    CreatedAt,
    UpdatedAt,
    ApprovedAt,
    ApprovedBy,
    RejectedAt,
    SuspendedAt,
}
