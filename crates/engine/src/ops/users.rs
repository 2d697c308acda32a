use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};
use serde_json::Value;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, User, store, users, validation::Violations};

use super::{Engine, with_tx};

const USER: &str = "User";

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Validate an optional `user_id` reference.
///
/// Returns `None` when the value is absent (or `null`) and when it was
/// rejected; rejections are recorded in `violations`.
pub(super) async fn user_reference<C: ConnectionTrait>(
    db: &C,
    violations: &mut Violations,
    value: Option<&Value>,
) -> ResultEngine<Option<i32>> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let Some(id) = violations.id("user_id", Some(value)) else {
        return Ok(None);
    };
    if !store::exists::<users::Entity, _>(db, id).await? {
        violations.unknown_reference("user_id");
        return Ok(None);
    }
    Ok(Some(id))
}

impl Engine {
    /// Resolve the user owning an API token.
    pub async fn user_by_token(&self, token: &str) -> ResultEngine<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(users::Entity::find()
            .filter(users::Column::Token.eq(token))
            .one(&self.database)
            .await?)
    }

    /// Register a user and issue its first token.
    pub async fn create_user(&self, username: &str) -> ResultEngine<User> {
        let mut violations = Violations::default();
        let username = violations.name("username", Some(&Value::from(username)));
        let username = violations.finish_with(username)?;

        with_tx!(self, |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(username));
            }

            let now = Utc::now();
            let active = users::ActiveModel {
                id: ActiveValue::NotSet,
                username: ActiveValue::Set(username),
                token: ActiveValue::Set(new_token()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            store::create(&db_tx, active).await
        })
    }

    /// Replace the token of `username`; the previous one stops working.
    pub async fn rotate_user_token(&self, username: &str) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(USER.to_string()))?;

            let mut active: users::ActiveModel = model.into();
            active.token = ActiveValue::Set(new_token());
            active.updated_at = ActiveValue::Set(Utc::now());
            store::update(&db_tx, active).await
        })
    }
}
