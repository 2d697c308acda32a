//! Groups, parties and wallets.
//!
//! `user_id` is checked by the engine at write time; there is no database
//! foreign key so deleting a user never cascades into bookkeeping records.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Parties {
    Table,
    Id,
    Name,
    Description,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Wallets {
    Table,
    Id,
    Name,
    Type,
    Description,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Groups
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::Description).text())
                    .col(ColumnDef::new(Groups::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Groups::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Parties
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Parties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parties::Name).string().not_null())
                    .col(ColumnDef::new(Parties::Description).text())
                    .col(ColumnDef::new(Parties::UserId).integer().not_null())
                    .col(ColumnDef::new(Parties::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Parties::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-parties-user_id")
                    .table(Parties::Table)
                    .col(Parties::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Wallets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallets::Name).string().not_null())
                    .col(ColumnDef::new(Wallets::Type).string().not_null())
                    .col(ColumnDef::new(Wallets::Description).text())
                    .col(ColumnDef::new(Wallets::UserId).integer().not_null())
                    .col(ColumnDef::new(Wallets::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Wallets::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-wallets-user_id")
                    .table(Wallets::Table)
                    .col(Wallets::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wallets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        Ok(())
    }
}
