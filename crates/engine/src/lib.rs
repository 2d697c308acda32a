//! Bookkeeping engine: records of groups, parties, wallets, categories and
//! transactions persisted through sea-orm.
//!
//! Categories and transactions come in two variants (income and expense),
//! each stored in its own table. Every variant-aware operation takes the raw
//! `type` discriminator of the request and resolves it before touching the
//! database.

pub use categories::{Category, CategoryKind};
pub use error::{EngineError, FieldError};
pub use ops::{
    CategoryDraft, Engine, EngineBuilder, GroupDraft, PartyDraft, TransactionDraft, WalletDraft,
};
pub use store::{PAGE_SIZE, Page};
pub use transactions::{Transaction, TransactionKind};

pub type Group = groups::Model;
pub type Party = parties::Model;
pub type Wallet = wallets::Model;
pub type User = users::Model;

mod categories;
mod error;
mod groups;
mod ops;
mod parties;
mod store;
mod transactions;
mod users;
mod validation;
mod wallets;

type ResultEngine<T> = Result<T, EngineError>;
