//! The authenticated user.

use api_types::user::UserView;
use axum::Extension;
use engine::User;

use crate::{
    ServerError,
    envelope::{self, Reply},
};

pub async fn show(Extension(user): Extension<User>) -> Result<Reply<UserView>, ServerError> {
    Ok(envelope::ok(UserView {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    }))
}
