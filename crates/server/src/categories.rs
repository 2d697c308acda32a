//! Categories API endpoints.
//!
//! `type` selects the variant: it is read from the body on create and from
//! the query string everywhere else. A body `type` that is not a string is
//! treated as an unknown variant.

use api_types::{
    category::{CategoryInput, CategoryKind as ApiKind, CategoryView},
    envelope::Page,
    query::TypeQuery,
};
use axum::{extract::State, http::StatusCode};
use engine::{Category, CategoryDraft, CategoryKind};
use serde_json::Value;

use crate::{
    ServerError,
    envelope::{self, Reply},
    extract::{Id, Params, Payload},
    server::ServerState,
};

fn map_kind(kind: CategoryKind) -> ApiKind {
    match kind {
        CategoryKind::Income => ApiKind::Income,
        CategoryKind::Expense => ApiKind::Expense,
    }
}

fn map_category(category: Category) -> CategoryView {
    CategoryView {
        id: category.id,
        kind: map_kind(category.kind),
        name: category.name,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Params(query): Params<TypeQuery>,
) -> Result<Reply<Page<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .list_categories(query.kind.as_deref(), query.page.unwrap_or(1))
        .await?;
    Ok(envelope::page(categories, map_category))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<CategoryInput>,
) -> Result<Reply<CategoryView>, ServerError> {
    let category = state
        .engine
        .create_category(
            payload.kind.as_ref().and_then(Value::as_str),
            CategoryDraft { name: payload.name },
        )
        .await?;
    Ok(envelope::created(
        "Category created successfully",
        map_category(category),
    ))
}

pub async fn show(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
) -> Result<Reply<CategoryView>, ServerError> {
    let category = state.engine.category(query.kind.as_deref(), id).await?;
    Ok(envelope::ok(map_category(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
    Payload(payload): Payload<CategoryInput>,
) -> Result<Reply<CategoryView>, ServerError> {
    let category = state
        .engine
        .update_category(
            query.kind.as_deref(),
            id,
            CategoryDraft { name: payload.name },
        )
        .await?;
    Ok(envelope::updated(
        "Category updated successfully",
        map_category(category),
    ))
}

pub async fn destroy(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_category(query.kind.as_deref(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
