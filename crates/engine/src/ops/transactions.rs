use sea_orm::{ConnectionTrait, TransactionTrait};
use serde_json::Value;

use crate::{
    ResultEngine, Transaction, TransactionKind, groups, parties,
    store::{self, Page},
    transactions::TransactionFields,
    validation::Violations,
    wallets,
};

use super::{Engine, per_category_table, per_transaction_table, with_tx};

const TRANSACTION: &str = "Transaction";

/// Unvalidated transaction fields as received from a caller.
///
/// Numeric fields are kept as raw JSON so that every malformed value can be
/// reported at once instead of failing on the first one.
#[derive(Clone, Debug, Default)]
pub struct TransactionDraft {
    pub date: Option<Value>,
    pub amount: Option<Value>,
    /// `None` keeps the stored value on update, `Some(None)` clears it.
    pub description: Option<Option<Value>>,
    pub party_id: Option<Value>,
    pub wallet_id: Option<Value>,
    pub group_id: Option<Value>,
    /// `None` keeps the stored value on update, `Some(None)` clears it.
    pub category_id: Option<Option<Value>>,
}

/// Check the shape of every field, then that every reference points to an
/// existing record. The category must belong to the variant matching `kind`.
async fn validate<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    draft: TransactionDraft,
) -> ResultEngine<TransactionFields> {
    let mut violations = Violations::default();

    let date = violations.date("date", draft.date.as_ref());
    let amount = violations.number("amount", draft.amount.as_ref());
    let description = violations.text(
        "description",
        draft.description.as_ref().map(Option::as_ref),
    );
    let party_id = violations.id("party_id", draft.party_id.as_ref());
    let wallet_id = violations.id("wallet_id", draft.wallet_id.as_ref());
    let group_id = violations.id("group_id", draft.group_id.as_ref());
    let category_id = match draft.category_id {
        None => None,
        Some(None | Some(Value::Null)) => Some(None),
        Some(Some(value)) => violations.id("category_id", Some(&value)).map(Some),
    };

    if let Some(id) = party_id
        && !store::exists::<parties::Entity, _>(db, id).await?
    {
        violations.unknown_reference("party_id");
    }
    if let Some(id) = wallet_id
        && !store::exists::<wallets::Entity, _>(db, id).await?
    {
        violations.unknown_reference("wallet_id");
    }
    if let Some(id) = group_id
        && !store::exists::<groups::Entity, _>(db, id).await?
    {
        violations.unknown_reference("group_id");
    }
    if let Some(Some(id)) = category_id {
        let found = per_category_table!(kind.category_kind(), |table| {
            store::exists::<table::Entity, _>(db, id).await?
        });
        if !found {
            violations.unknown_reference("category_id");
        }
    }

    let fields = match (date, amount, party_id, wallet_id, group_id) {
        (Some(date), Some(amount), Some(party_id), Some(wallet_id), Some(group_id)) => {
            Some(TransactionFields {
                date,
                amount,
                description,
                party_id,
                wallet_id,
                group_id,
                category_id,
            })
        }
        _ => None,
    };
    violations.finish_with(fields)
}

impl Engine {
    /// List one variant of transactions. `kind` is the raw `type`
    /// discriminator.
    pub async fn list_transactions(
        &self,
        kind: Option<&str>,
        page: u64,
    ) -> ResultEngine<Page<Transaction>> {
        let kind = TransactionKind::parse(kind)?;
        per_transaction_table!(kind, |table| {
            let page = store::paginate::<table::Entity, _>(&self.database, page).await?;
            Ok(page.map(Transaction::from))
        })
    }

    pub async fn transaction(&self, kind: Option<&str>, id: i32) -> ResultEngine<Transaction> {
        let kind = TransactionKind::parse(kind)?;
        per_transaction_table!(kind, |table| {
            let model =
                store::find_required::<table::Entity, _>(&self.database, id, TRANSACTION).await?;
            Ok(Transaction::from(model))
        })
    }

    /// Validate `draft` and store it as an income or an expense.
    ///
    /// Every rejected field is reported in a single
    /// [`EngineError::Validation`](crate::EngineError::Validation); nothing is
    /// written in that case.
    pub async fn create_transaction(
        &self,
        kind: Option<&str>,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let kind = TransactionKind::parse(kind)?;
        with_tx!(self, |db_tx| {
            let fields = validate(&db_tx, kind, draft).await?;
            per_transaction_table!(kind, |table| {
                let active = table::ActiveModel::from_fields(fields);
                Ok(Transaction::from(store::create(&db_tx, active).await?))
            })
        })
    }

    /// Re-validate the whole draft and overwrite transaction `id` of the
    /// variant selected by `kind`.
    pub async fn update_transaction(
        &self,
        kind: Option<&str>,
        id: i32,
        draft: TransactionDraft,
    ) -> ResultEngine<Transaction> {
        let kind = TransactionKind::parse(kind)?;
        with_tx!(self, |db_tx| {
            let fields = validate(&db_tx, kind, draft).await?;
            per_transaction_table!(kind, |table| {
                let model =
                    store::find_required::<table::Entity, _>(&db_tx, id, TRANSACTION).await?;
                let active = table::ActiveModel::apply(model, fields);
                Ok(Transaction::from(store::update(&db_tx, active).await?))
            })
        })
    }

    pub async fn delete_transaction(&self, kind: Option<&str>, id: i32) -> ResultEngine<()> {
        let kind = TransactionKind::parse(kind)?;
        with_tx!(self, |db_tx| {
            per_transaction_table!(kind, |table| {
                store::find_required::<table::Entity, _>(&db_tx, id, TRANSACTION).await?;
                store::delete::<table::Entity, _>(&db_tx, id).await
            })
        })
    }
}
