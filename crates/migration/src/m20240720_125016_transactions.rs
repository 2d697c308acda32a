//! Incomes and expenses.
//!
//! Same layout for both variants. `party_id`, `wallet_id`, `group_id` and
//! `category_id` are logical references validated by the engine; deleting
//! the referenced row leaves the transaction untouched.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TABLES: [&str; 2] = ["incomes", "expenses"];

#[derive(Iden)]
enum Transactions {
    Id,
    Date,
    Amount,
    Description,
    PartyId,
    WalletId,
    GroupId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}

fn transaction_table(table: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Transactions::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Transactions::Date).date().not_null())
        .col(ColumnDef::new(Transactions::Amount).double().not_null())
        .col(ColumnDef::new(Transactions::Description).text())
        .col(ColumnDef::new(Transactions::PartyId).integer().not_null())
        .col(ColumnDef::new(Transactions::WalletId).integer().not_null())
        .col(ColumnDef::new(Transactions::GroupId).integer().not_null())
        .col(ColumnDef::new(Transactions::CategoryId).integer())
        .col(ColumnDef::new(Transactions::CreatedAt).timestamp().not_null())
        .col(ColumnDef::new(Transactions::UpdatedAt).timestamp().not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            manager.create_table(transaction_table(table)).await?;
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx-{table}-date"))
                        .table(Alias::new(table))
                        .col(Transactions::Date)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
