use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait};
use serde_json::Value;

use crate::{
    Category, CategoryKind, ResultEngine,
    store::{self, Page},
    validation::Violations,
};

use super::{Engine, per_category_table, with_tx};

const CATEGORY: &str = "Category";

/// Unvalidated category fields as received from a caller.
#[derive(Clone, Debug, Default)]
pub struct CategoryDraft {
    pub name: Option<Value>,
}

impl Engine {
    /// List one variant of categories. `kind` is the raw `type`
    /// discriminator.
    pub async fn list_categories(
        &self,
        kind: Option<&str>,
        page: u64,
    ) -> ResultEngine<Page<Category>> {
        let kind = CategoryKind::parse(kind)?;
        per_category_table!(kind, |table| {
            let page = store::paginate::<table::Entity, _>(&self.database, page).await?;
            Ok(page.map(Category::from))
        })
    }

    pub async fn category(&self, kind: Option<&str>, id: i32) -> ResultEngine<Category> {
        let kind = CategoryKind::parse(kind)?;
        per_category_table!(kind, |table| {
            let model =
                store::find_required::<table::Entity, _>(&self.database, id, CATEGORY).await?;
            Ok(Category::from(model))
        })
    }

    /// Add a category to the table selected by `kind`.
    pub async fn create_category(
        &self,
        kind: Option<&str>,
        draft: CategoryDraft,
    ) -> ResultEngine<Category> {
        let kind = CategoryKind::parse(kind)?;
        let mut violations = Violations::default();
        let name = violations.name("name", draft.name.as_ref());
        let name = violations.finish_with(name)?;

        let now = Utc::now();
        per_category_table!(kind, |table| {
            let active = table::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            Ok(Category::from(store::create(&self.database, active).await?))
        })
    }

    /// Rename a category. A draft without `name` only bumps `updated_at`.
    pub async fn update_category(
        &self,
        kind: Option<&str>,
        id: i32,
        draft: CategoryDraft,
    ) -> ResultEngine<Category> {
        let kind = CategoryKind::parse(kind)?;
        let mut violations = Violations::default();
        let name = violations.optional_name("name", draft.name.as_ref());
        violations.finish()?;

        with_tx!(self, |db_tx| {
            per_category_table!(kind, |table| {
                let model =
                    store::find_required::<table::Entity, _>(&db_tx, id, CATEGORY).await?;
                let mut active: table::ActiveModel = model.into();
                if let Some(name) = name {
                    active.name = ActiveValue::Set(name);
                }
                active.updated_at = ActiveValue::Set(Utc::now());
                Ok(Category::from(store::update(&db_tx, active).await?))
            })
        })
    }

    /// Delete a category. Transactions referencing it keep the dangling id.
    pub async fn delete_category(&self, kind: Option<&str>, id: i32) -> ResultEngine<()> {
        let kind = CategoryKind::parse(kind)?;
        with_tx!(self, |db_tx| {
            per_category_table!(kind, |table| {
                store::find_required::<table::Entity, _>(&db_tx, id, CATEGORY).await?;
                store::delete::<table::Entity, _>(&db_tx, id).await
            })
        })
    }
}
