use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};
use serde_json::Value;

use crate::{
    ResultEngine, Wallet,
    store::{self, Page},
    validation::Violations,
    wallets,
};

use super::{Engine, users::user_reference, with_tx};

const WALLET: &str = "Wallet";

/// Unvalidated wallet fields as received from a caller.
#[derive(Clone, Debug, Default)]
pub struct WalletDraft {
    pub name: Option<Value>,
    /// Free-form label such as `cash` or `bank`.
    pub kind: Option<Value>,
    /// `Some(None)` clears the description on update.
    pub description: Option<Option<Value>>,
    /// Owner; must reference an existing user when present.
    pub user_id: Option<Value>,
}

impl WalletDraft {
    fn description_ref(&self) -> Option<Option<&Value>> {
        self.description.as_ref().map(Option::as_ref)
    }
}

impl Engine {
    pub async fn list_wallets(&self, page: u64) -> ResultEngine<Page<Wallet>> {
        store::paginate::<wallets::Entity, _>(&self.database, page).await
    }

    /// Return a wallet snapshot from DB.
    pub async fn wallet(&self, id: i32) -> ResultEngine<Wallet> {
        store::find_required::<wallets::Entity, _>(&self.database, id, WALLET).await
    }

    /// Add a new wallet. `name` and `type` are required; without an explicit
    /// `user_id` the wallet belongs to `owner_id`.
    pub async fn create_wallet(&self, draft: WalletDraft, owner_id: i32) -> ResultEngine<Wallet> {
        let mut violations = Violations::default();
        let name = violations.name("name", draft.name.as_ref());
        let kind = violations.name("type", draft.kind.as_ref());
        let description = violations.text("description", draft.description_ref());

        with_tx!(self, |db_tx| {
            let user_id = user_reference(&db_tx, &mut violations, draft.user_id.as_ref())
                .await?
                .unwrap_or(owner_id);
            let (name, kind) = violations.finish_with(name.zip(kind))?;

            let now = Utc::now();
            let active = wallets::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                kind: ActiveValue::Set(kind),
                description: ActiveValue::Set(description.flatten()),
                user_id: ActiveValue::Set(user_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            store::create(&db_tx, active).await
        })
    }

    /// Partially update a wallet: only the fields present in `draft` change.
    pub async fn update_wallet(&self, id: i32, draft: WalletDraft) -> ResultEngine<Wallet> {
        let mut violations = Violations::default();
        let name = violations.optional_name("name", draft.name.as_ref());
        let kind = violations.optional_name("type", draft.kind.as_ref());
        let description = violations.text("description", draft.description_ref());

        with_tx!(self, |db_tx| {
            let user_id =
                user_reference(&db_tx, &mut violations, draft.user_id.as_ref()).await?;
            violations.finish()?;

            let model = store::find_required::<wallets::Entity, _>(&db_tx, id, WALLET).await?;
            let mut active: wallets::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(kind) = kind {
                active.kind = ActiveValue::Set(kind);
            }
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(user_id) = user_id {
                active.user_id = ActiveValue::Set(user_id);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            store::update(&db_tx, active).await
        })
    }

    /// Delete a wallet. Transactions referencing it keep the dangling id.
    pub async fn delete_wallet(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            store::find_required::<wallets::Entity, _>(&db_tx, id, WALLET).await?;
            store::delete::<wallets::Entity, _>(&db_tx, id).await
        })
    }
}
