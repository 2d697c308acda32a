use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};
use serde_json::Value;

use crate::{
    Party, ResultEngine, parties,
    store::{self, Page},
    validation::Violations,
};

use super::{Engine, users::user_reference, with_tx};

const PARTY: &str = "Party";

/// Unvalidated party fields as received from a caller.
#[derive(Clone, Debug, Default)]
pub struct PartyDraft {
    pub name: Option<Value>,
    /// `Some(None)` clears the description on update.
    pub description: Option<Option<Value>>,
    /// Owner; must reference an existing user when present.
    pub user_id: Option<Value>,
}

impl PartyDraft {
    fn description_ref(&self) -> Option<Option<&Value>> {
        self.description.as_ref().map(Option::as_ref)
    }
}

impl Engine {
    pub async fn list_parties(&self, page: u64) -> ResultEngine<Page<Party>> {
        store::paginate::<parties::Entity, _>(&self.database, page).await
    }

    pub async fn party(&self, id: i32) -> ResultEngine<Party> {
        store::find_required::<parties::Entity, _>(&self.database, id, PARTY).await
    }

    /// Add a new party. Without an explicit `user_id` the party belongs to
    /// `owner_id`.
    pub async fn create_party(&self, draft: PartyDraft, owner_id: i32) -> ResultEngine<Party> {
        let mut violations = Violations::default();
        let name = violations.name("name", draft.name.as_ref());
        let description = violations.text("description", draft.description_ref());

        with_tx!(self, |db_tx| {
            let user_id = user_reference(&db_tx, &mut violations, draft.user_id.as_ref())
                .await?
                .unwrap_or(owner_id);
            let name = violations.finish_with(name)?;

            let now = Utc::now();
            let active = parties::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(description.flatten()),
                user_id: ActiveValue::Set(user_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            store::create(&db_tx, active).await
        })
    }

    /// Partially update a party: only the fields present in `draft` change.
    pub async fn update_party(&self, id: i32, draft: PartyDraft) -> ResultEngine<Party> {
        let mut violations = Violations::default();
        let name = violations.optional_name("name", draft.name.as_ref());
        let description = violations.text("description", draft.description_ref());

        with_tx!(self, |db_tx| {
            let user_id =
                user_reference(&db_tx, &mut violations, draft.user_id.as_ref()).await?;
            violations.finish()?;

            let model = store::find_required::<parties::Entity, _>(&db_tx, id, PARTY).await?;
            let mut active: parties::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
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

    /// Delete a party. Transactions referencing it keep the dangling id.
    pub async fn delete_party(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            store::find_required::<parties::Entity, _>(&db_tx, id, PARTY).await?;
            store::delete::<parties::Entity, _>(&db_tx, id).await
        })
    }
}
