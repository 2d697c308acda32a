//! Wallets API endpoints.

use api_types::{
    envelope::Page,
    query::PageQuery,
    wallet::{WalletInput, WalletView},
};
use axum::{Extension, extract::State, http::StatusCode};
use engine::{User, Wallet, WalletDraft};

use crate::{
    ServerError,
    envelope::{self, Reply},
    extract::{Id, Params, Payload},
    server::ServerState,
};

fn map_wallet(wallet: Wallet) -> WalletView {
    WalletView {
        id: wallet.id,
        name: wallet.name,
        kind: wallet.kind,
        description: wallet.description,
        user_id: wallet.user_id,
        created_at: wallet.created_at,
        updated_at: wallet.updated_at,
    }
}

fn draft(input: WalletInput) -> WalletDraft {
    WalletDraft {
        name: input.name,
        kind: input.kind,
        description: input.description,
        user_id: input.user_id,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Params(query): Params<PageQuery>,
) -> Result<Reply<Page<WalletView>>, ServerError> {
    let wallets = state.engine.list_wallets(query.page.unwrap_or(1)).await?;
    Ok(envelope::page(wallets, map_wallet))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Payload(payload): Payload<WalletInput>,
) -> Result<Reply<WalletView>, ServerError> {
    let wallet = state.engine.create_wallet(draft(payload), user.id).await?;
    Ok(envelope::created(
        "Wallet created successfully",
        map_wallet(wallet),
    ))
}

pub async fn show(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<Reply<WalletView>, ServerError> {
    let wallet = state.engine.wallet(id).await?;
    Ok(envelope::ok(map_wallet(wallet)))
}

pub async fn update(
    State(state): State<ServerState>,
    Id(id): Id,
    Payload(payload): Payload<WalletInput>,
) -> Result<Reply<WalletView>, ServerError> {
    let wallet = state.engine.update_wallet(id, draft(payload)).await?;
    Ok(envelope::updated(
        "Wallet updated successfully",
        map_wallet(wallet),
    ))
}

pub async fn destroy(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_wallet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
