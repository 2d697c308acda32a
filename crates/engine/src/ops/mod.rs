use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod categories;
mod groups;
mod parties;
mod transactions;
mod users;
mod wallets;

pub use categories::CategoryDraft;
pub use groups::GroupDraft;
pub use parties::PartyDraft;
pub use transactions::TransactionDraft;
pub use wallets::WalletDraft;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Evaluate `$body` against the category table selected by `$kind`, with
/// `$table` naming that table's entity module.
macro_rules! per_category_table {
    ($kind:expr, |$table:ident| $body:expr) => {
        match $kind {
            $crate::CategoryKind::Income => {
                use $crate::categories::income as $table;
                $body
            }
            $crate::CategoryKind::Expense => {
                use $crate::categories::expense as $table;
                $body
            }
        }
    };
}

pub(crate) use per_category_table;

/// Same as [`per_category_table!`] for the income and expense tables.
macro_rules! per_transaction_table {
    ($kind:expr, |$table:ident| $body:expr) => {
        match $kind {
            $crate::TransactionKind::Income => {
                use $crate::transactions::income as $table;
                $body
            }
            $crate::TransactionKind::Expense => {
                use $crate::transactions::expense as $table;
                $body
            }
        }
    };
}

pub(crate) use per_transaction_table;

/// Entry point of every bookkeeping operation.
///
/// The engine holds no state besides the connection pool, so a single
/// instance can be shared by every request.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
