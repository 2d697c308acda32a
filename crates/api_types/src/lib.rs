//! Request and response bodies of the HTTP API.
//!
//! Request bodies are deliberately loose: every field is optional and kept
//! as a raw JSON value, so the engine can report every missing or mistyped
//! field at once instead of stopping at the first one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub mod envelope {
    use super::*;

    /// Body of every successful response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Success<T> {
        pub success: bool,
        pub message: String,
        pub data: T,
    }

    impl<T> Success<T> {
        pub fn new(message: impl Into<String>, data: T) -> Self {
            Self {
                success: true,
                message: message.into(),
                data,
            }
        }
    }

    /// Body of every failed response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Failure {
        pub success: bool,
        pub message: String,
        pub errors: Vec<FieldError>,
    }

    impl Failure {
        pub fn new(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
            Self {
                success: false,
                message: message.into(),
                errors,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FieldError {
        pub field: String,
        pub message: String,
    }

    /// One page of a listing.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Page<T> {
        pub data: Vec<T>,
        pub current_page: u64,
        pub per_page: u64,
        pub total: u64,
        pub last_page: u64,
    }
}

pub mod query {
    use super::*;

    /// Query string of variant-scoped endpoints (`/categories`,
    /// `/transactions`).
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TypeQuery {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub page: Option<u64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PageQuery {
        pub page: Option<u64>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub username: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod group {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GroupInput {
        pub name: Option<Value>,
        #[serde(default, deserialize_with = "nullable")]
        pub description: Option<Option<Value>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod party {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PartyInput {
        pub name: Option<Value>,
        #[serde(default, deserialize_with = "nullable")]
        pub description: Option<Option<Value>>,
        /// Defaults to the authenticated user on create.
        pub user_id: Option<Value>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartyView {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub user_id: i32,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod wallet {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WalletInput {
        pub name: Option<Value>,
        /// Free-form label such as `cash` or `bank`.
        #[serde(rename = "type")]
        pub kind: Option<Value>,
        #[serde(default, deserialize_with = "nullable")]
        pub description: Option<Option<Value>>,
        /// Defaults to the authenticated user on create.
        pub user_id: Option<Value>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: i32,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub description: Option<String>,
        pub user_id: i32,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryKind {
        Income,
        Expense,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryInput {
        /// Only read on create; other verbs take `type` from the query.
        #[serde(rename = "type")]
        pub kind: Option<Value>,
        pub name: Option<Value>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        #[serde(rename = "type")]
        pub kind: CategoryKind,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// Body of `POST /transactions` and `PUT /transactions/{id}`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionInput {
        /// Only read on create; other verbs take `type` from the query.
        #[serde(rename = "type")]
        pub kind: Option<Value>,
        /// Calendar date, `YYYY-MM-DD`.
        pub date: Option<Value>,
        pub amount: Option<Value>,
        #[serde(default, deserialize_with = "nullable")]
        pub description: Option<Option<Value>>,
        pub party_id: Option<Value>,
        pub wallet_id: Option<Value>,
        pub group_id: Option<Value>,
        #[serde(default, deserialize_with = "nullable")]
        pub category_id: Option<Option<Value>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i32,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub date: NaiveDate,
        pub amount: f64,
        pub description: Option<String>,
        pub party_id: i32,
        pub wallet_id: i32,
        pub group_id: i32,
        pub category_id: Option<i32>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}
