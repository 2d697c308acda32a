//! Transactions API endpoints.
//!
//! `type` selects the variant: it is read from the body on create and from
//! the query string everywhere else. A body `type` that is not a string is
//! treated as an unknown variant.

use api_types::{
    envelope::Page,
    query::TypeQuery,
    transaction::{TransactionInput, TransactionKind as ApiKind, TransactionView},
};
use axum::{extract::State, http::StatusCode};
use engine::{Transaction, TransactionDraft, TransactionKind};
use serde_json::Value;

use crate::{
    ServerError,
    envelope::{self, Reply},
    extract::{Id, Params, Payload},
    server::ServerState,
};

fn map_kind(kind: TransactionKind) -> ApiKind {
    match kind {
        TransactionKind::Income => ApiKind::Income,
        TransactionKind::Expense => ApiKind::Expense,
    }
}

fn map_transaction(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        date: tx.date,
        amount: tx.amount,
        description: tx.description,
        party_id: tx.party_id,
        wallet_id: tx.wallet_id,
        group_id: tx.group_id,
        category_id: tx.category_id,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

/// Split the body into the discriminator and the fields to validate.
fn draft(input: TransactionInput) -> (Option<Value>, TransactionDraft) {
    let draft = TransactionDraft {
        date: input.date,
        amount: input.amount,
        description: input.description,
        party_id: input.party_id,
        wallet_id: input.wallet_id,
        group_id: input.group_id,
        category_id: input.category_id,
    };
    (input.kind, draft)
}

pub async fn list(
    State(state): State<ServerState>,
    Params(query): Params<TypeQuery>,
) -> Result<Reply<Page<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions(query.kind.as_deref(), query.page.unwrap_or(1))
        .await?;
    Ok(envelope::page(transactions, map_transaction))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<TransactionInput>,
) -> Result<Reply<TransactionView>, ServerError> {
    let (kind, draft) = draft(payload);
    let tx = state
        .engine
        .create_transaction(kind.as_ref().and_then(Value::as_str), draft)
        .await?;
    Ok(envelope::created(
        "Transaction created successfully",
        map_transaction(tx),
    ))
}

pub async fn show(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
) -> Result<Reply<TransactionView>, ServerError> {
    let tx = state.engine.transaction(query.kind.as_deref(), id).await?;
    Ok(envelope::ok(map_transaction(tx)))
}

/// A `type` in the body is ignored: the query selects the table.
pub async fn update(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
    Payload(payload): Payload<TransactionInput>,
) -> Result<Reply<TransactionView>, ServerError> {
    let (_, draft) = draft(payload);
    let tx = state
        .engine
        .update_transaction(query.kind.as_deref(), id, draft)
        .await?;
    Ok(envelope::updated(
        "Transaction updated successfully",
        map_transaction(tx),
    ))
}

pub async fn destroy(
    State(state): State<ServerState>,
    Id(id): Id,
    Params(query): Params<TypeQuery>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(query.kind.as_deref(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
