//! Incomes and expenses.
//!
//! A transaction is either an income or an expense. The two variants share
//! one layout and are stored in separate tables (`incomes`, `expenses`);
//! like categories, ids are scoped per variant and `kind` is derived from
//! the table a record was read from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{CategoryKind, EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse the raw `type` discriminator of a request.
    pub fn parse(value: Option<&str>) -> ResultEngine<Self> {
        value
            .ok_or_else(|| EngineError::InvalidType("transaction".to_string()))
            .and_then(Self::try_from)
    }

    /// Category variant a transaction of this kind may reference.
    pub fn category_kind(self) -> CategoryKind {
        match self {
            Self::Income => CategoryKind::Income,
            Self::Expense => CategoryKind::Expense,
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidType("transaction".to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    /// Plain magnitude; the sign is implied by `kind`.
    pub amount: f64,
    pub description: Option<String>,
    pub party_id: i32,
    pub wallet_id: i32,
    pub group_id: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a transaction, ready to be written to either table.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TransactionFields {
    pub(crate) date: NaiveDate,
    pub(crate) amount: f64,
    /// `None` leaves the stored value untouched on update.
    pub(crate) description: Option<Option<String>>,
    pub(crate) party_id: i32,
    pub(crate) wallet_id: i32,
    pub(crate) group_id: i32,
    /// `None` leaves the stored value untouched on update.
    pub(crate) category_id: Option<Option<i32>>,
}

/// Declare the entity of one transaction variant.
macro_rules! transaction_table {
    ($module:ident, $table:tt, $kind:expr) => {
        pub mod $module {
            use chrono::{NaiveDate, Utc};
            use sea_orm::{ActiveValue, entity::prelude::*};

            use super::TransactionFields;

            #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
            #[sea_orm(table_name = $table)]
            pub struct Model {
                #[sea_orm(primary_key)]
                pub id: i32,
                pub date: NaiveDate,
                pub amount: f64,
                pub description: Option<String>,
                pub party_id: i32,
                pub wallet_id: i32,
                pub group_id: i32,
                pub category_id: Option<i32>,
                pub created_at: DateTimeUtc,
                pub updated_at: DateTimeUtc,
            }

            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {}

            impl ActiveModelBehavior for ActiveModel {}

            impl From<Model> for super::Transaction {
                fn from(model: Model) -> Self {
                    Self {
                        id: model.id,
                        kind: $kind,
                        date: model.date,
                        amount: model.amount,
                        description: model.description,
                        party_id: model.party_id,
                        wallet_id: model.wallet_id,
                        group_id: model.group_id,
                        category_id: model.category_id,
                        created_at: model.created_at,
                        updated_at: model.updated_at,
                    }
                }
            }

            impl ActiveModel {
                /// A new row carrying `fields`.
                pub(crate) fn from_fields(fields: TransactionFields) -> Self {
                    let now = Utc::now();
                    Self {
                        id: ActiveValue::NotSet,
                        date: ActiveValue::Set(fields.date),
                        amount: ActiveValue::Set(fields.amount),
                        description: ActiveValue::Set(fields.description.flatten()),
                        party_id: ActiveValue::Set(fields.party_id),
                        wallet_id: ActiveValue::Set(fields.wallet_id),
                        group_id: ActiveValue::Set(fields.group_id),
                        category_id: ActiveValue::Set(fields.category_id.flatten()),
                        created_at: ActiveValue::Set(now),
                        updated_at: ActiveValue::Set(now),
                    }
                }

                /// Overwrite an existing row with `fields`.
                pub(crate) fn apply(model: Model, fields: TransactionFields) -> Self {
                    let mut active: Self = model.into();
                    active.date = ActiveValue::Set(fields.date);
                    active.amount = ActiveValue::Set(fields.amount);
                    if let Some(description) = fields.description {
                        active.description = ActiveValue::Set(description);
                    }
                    active.party_id = ActiveValue::Set(fields.party_id);
                    active.wallet_id = ActiveValue::Set(fields.wallet_id);
                    active.group_id = ActiveValue::Set(fields.group_id);
                    if let Some(category_id) = fields.category_id {
                        active.category_id = ActiveValue::Set(category_id);
                    }
                    active.updated_at = ActiveValue::Set(Utc::now());
                    active
                }
            }
        }
    };
}

transaction_table!(income, "incomes", super::TransactionKind::Income);
transaction_table!(expense, "expenses", super::TransactionKind::Expense);
