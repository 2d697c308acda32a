//! Income and expense categories.
//!
//! Both variants share the same shape and live in their own table, so a
//! category id is only meaningful together with its variant.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const TABLES: [&str; 2] = ["income_categories", "expense_categories"];

#[derive(Iden)]
enum Categories {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

fn category_table(table: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Categories::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Categories::Name).string().not_null())
        .col(ColumnDef::new(Categories::CreatedAt).timestamp().not_null())
        .col(ColumnDef::new(Categories::UpdatedAt).timestamp().not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in TABLES {
            manager.create_table(category_table(table)).await?;
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
