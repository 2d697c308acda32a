//! Parties API endpoints.

use api_types::{
    envelope::Page,
    party::{PartyInput, PartyView},
    query::PageQuery,
};
use axum::{Extension, extract::State, http::StatusCode};
use engine::{Party, PartyDraft, User};

use crate::{
    ServerError,
    envelope::{self, Reply},
    extract::{Id, Params, Payload},
    server::ServerState,
};

fn map_party(party: Party) -> PartyView {
    PartyView {
        id: party.id,
        name: party.name,
        description: party.description,
        user_id: party.user_id,
        created_at: party.created_at,
        updated_at: party.updated_at,
    }
}

fn draft(input: PartyInput) -> PartyDraft {
    PartyDraft {
        name: input.name,
        description: input.description,
        user_id: input.user_id,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Params(query): Params<PageQuery>,
) -> Result<Reply<Page<PartyView>>, ServerError> {
    let parties = state.engine.list_parties(query.page.unwrap_or(1)).await?;
    Ok(envelope::page(parties, map_party))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Payload(payload): Payload<PartyInput>,
) -> Result<Reply<PartyView>, ServerError> {
    let party = state.engine.create_party(draft(payload), user.id).await?;
    Ok(envelope::created("Party created successfully", map_party(party)))
}

pub async fn show(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<Reply<PartyView>, ServerError> {
    let party = state.engine.party(id).await?;
    Ok(envelope::ok(map_party(party)))
}

pub async fn update(
    State(state): State<ServerState>,
    Id(id): Id,
    Payload(payload): Payload<PartyInput>,
) -> Result<Reply<PartyView>, ServerError> {
    let party = state.engine.update_party(id, draft(payload)).await?;
    Ok(envelope::updated("Party updated successfully", map_party(party)))
}

pub async fn destroy(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_party(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
