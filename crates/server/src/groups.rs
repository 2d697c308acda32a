//! Groups API endpoints.

use api_types::{
    envelope::Page,
    group::{GroupInput, GroupView},
    query::PageQuery,
};
use axum::{extract::State, http::StatusCode};
use engine::{Group, GroupDraft};

use crate::{
    ServerError,
    envelope::{self, Reply},
    extract::{Id, Params, Payload},
    server::ServerState,
};

fn map_group(group: Group) -> GroupView {
    GroupView {
        id: group.id,
        name: group.name,
        description: group.description,
        created_at: group.created_at,
        updated_at: group.updated_at,
    }
}

fn draft(input: GroupInput) -> GroupDraft {
    GroupDraft {
        name: input.name,
        description: input.description,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Params(query): Params<PageQuery>,
) -> Result<Reply<Page<GroupView>>, ServerError> {
    let groups = state.engine.list_groups(query.page.unwrap_or(1)).await?;
    Ok(envelope::page(groups, map_group))
}

pub async fn create(
    State(state): State<ServerState>,
    Payload(payload): Payload<GroupInput>,
) -> Result<Reply<GroupView>, ServerError> {
    let group = state.engine.create_group(draft(payload)).await?;
    Ok(envelope::created("Group created successfully", map_group(group)))
}

pub async fn show(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<Reply<GroupView>, ServerError> {
    let group = state.engine.group(id).await?;
    Ok(envelope::ok(map_group(group)))
}

pub async fn update(
    State(state): State<ServerState>,
    Id(id): Id,
    Payload(payload): Payload<GroupInput>,
) -> Result<Reply<GroupView>, ServerError> {
    let group = state.engine.update_group(id, draft(payload)).await?;
    Ok(envelope::updated("Group updated successfully", map_group(group)))
}

pub async fn destroy(
    State(state): State<ServerState>,
    Id(id): Id,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
