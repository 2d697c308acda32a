//! Income and expense categories.
//!
//! Both variants have the same shape and are stored in separate tables
//! (`income_categories`, `expense_categories`). The variant is never a
//! column: it is the table a record lives in, so ids are only unique within
//! one variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Parse the raw `type` discriminator of a request.
    pub fn parse(value: Option<&str>) -> ResultEngine<Self> {
        value
            .ok_or_else(|| EngineError::InvalidType("category".to_string()))
            .and_then(Self::try_from)
    }
}

impl TryFrom<&str> for CategoryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidType("category".to_string())),
        }
    }
}

/// A category together with the variant it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub kind: CategoryKind,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Declare the entity of one category variant.
macro_rules! category_table {
    ($module:ident, $table:tt, $kind:expr) => {
        pub mod $module {
            use sea_orm::entity::prelude::*;

            #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
            #[sea_orm(table_name = $table)]
            pub struct Model {
                #[sea_orm(primary_key)]
                pub id: i32,
                pub name: String,
                pub created_at: DateTimeUtc,
                pub updated_at: DateTimeUtc,
            }

            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {}

            impl ActiveModelBehavior for ActiveModel {}

            impl From<Model> for super::Category {
                fn from(model: Model) -> Self {
                    Self {
                        id: model.id,
                        kind: $kind,
                        name: model.name,
                        created_at: model.created_at,
                        updated_at: model.updated_at,
                    }
                }
            }
        }
    };
}

category_table!(income, "income_categories", super::CategoryKind::Income);
category_table!(expense, "expense_categories", super::CategoryKind::Expense);
