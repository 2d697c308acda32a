use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};
use serde_json::Value;

use crate::{
    Group, ResultEngine, groups,
    store::{self, Page},
    validation::Violations,
};

use super::{Engine, with_tx};

const GROUP: &str = "Group";

/// Unvalidated group fields as received from a caller.
#[derive(Clone, Debug, Default)]
pub struct GroupDraft {
    pub name: Option<Value>,
    /// `Some(None)` clears the description on update.
    pub description: Option<Option<Value>>,
}

impl GroupDraft {
    fn description_ref(&self) -> Option<Option<&Value>> {
        self.description.as_ref().map(Option::as_ref)
    }
}

impl Engine {
    pub async fn list_groups(&self, page: u64) -> ResultEngine<Page<Group>> {
        store::paginate::<groups::Entity, _>(&self.database, page).await
    }

    pub async fn group(&self, id: i32) -> ResultEngine<Group> {
        store::find_required::<groups::Entity, _>(&self.database, id, GROUP).await
    }

    /// Add a new group. `name` is required.
    pub async fn create_group(&self, draft: GroupDraft) -> ResultEngine<Group> {
        let mut violations = Violations::default();
        let name = violations.name("name", draft.name.as_ref());
        let description = violations.text("description", draft.description_ref());
        let name = violations.finish_with(name)?;

        let now = Utc::now();
        let active = groups::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description.flatten()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        store::create(&self.database, active).await
    }

    /// Partially update a group: only the fields present in `draft` change.
    pub async fn update_group(&self, id: i32, draft: GroupDraft) -> ResultEngine<Group> {
        let mut violations = Violations::default();
        let name = violations.optional_name("name", draft.name.as_ref());
        let description = violations.text("description", draft.description_ref());
        violations.finish()?;

        with_tx!(self, |db_tx| {
            let model = store::find_required::<groups::Entity, _>(&db_tx, id, GROUP).await?;
            let mut active: groups::ActiveModel = model.into();
            if let Some(name) = name {
                active.name = ActiveValue::Set(name);
            }
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            active.updated_at = ActiveValue::Set(Utc::now());
            store::update(&db_tx, active).await
        })
    }

    /// Delete a group. Transactions tagged with it keep the dangling id.
    pub async fn delete_group(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            store::find_required::<groups::Entity, _>(&db_tx, id, GROUP).await?;
            store::delete::<groups::Entity, _>(&db_tx, id).await
        })
    }
}
