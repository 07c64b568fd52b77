//! Handlers for the `/rooms` resource.
//!
//! Request bodies are validated and their equipment lists encoded before
//! the store is called; every room read back from the store is decoded
//! into the client shape (`recursos` as a list) before it is returned.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use roomdesk_core::types::DbId;
use roomdesk_db::models::room::{CreateRoom, Room, RoomRecord, RoomStats, UpdateRoom};

use crate::error::AppResult;
use crate::extract::RoomBody;
use crate::response::{room_deleted, MessageResponse, RoomMessage, ROOM_CREATED, ROOM_UPDATED};
use crate::state::AppState;

fn to_room(record: RoomRecord) -> AppResult<Room> {
    Ok(Room::try_from(record)?)
}

fn to_rooms(records: Vec<RoomRecord>) -> AppResult<Vec<Room>> {
    records.into_iter().map(to_room).collect()
}

/// GET /rooms
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Room>>> {
    let records = state.store.list().await?;
    Ok(Json(to_rooms(records)?))
}

/// GET /rooms/sede/{sede}
pub async fn list_by_site(
    State(state): State<AppState>,
    Path(sede): Path<String>,
) -> AppResult<Json<Vec<Room>>> {
    let records = state.store.list_by_site(&sede).await?;
    Ok(Json(to_rooms(records)?))
}

/// GET /rooms/available
pub async fn list_available(State(state): State<AppState>) -> AppResult<Json<Vec<Room>>> {
    let records = state.store.list_available().await?;
    Ok(Json(to_rooms(records)?))
}

/// GET /rooms/reserved
pub async fn list_reserved(State(state): State<AppState>) -> AppResult<Json<Vec<Room>>> {
    let records = state.store.list_reserved().await?;
    Ok(Json(to_rooms(records)?))
}

/// GET /rooms/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<RoomStats>> {
    Ok(Json(state.store.stats().await?))
}

/// GET /rooms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Room>> {
    let record = state.store.get(id).await?;
    Ok(Json(to_room(record)?))
}

/// POST /rooms
pub async fn create(
    State(state): State<AppState>,
    RoomBody(input): RoomBody<CreateRoom>,
) -> AppResult<(StatusCode, Json<RoomMessage<Room>>)> {
    let new_room = input.into_new_room()?;
    let record = state.store.create(&new_room).await?;

    tracing::info!(
        room_id = record.id,
        numero = %record.numero,
        sede = %record.sede,
        "Room created",
    );

    Ok((
        StatusCode::CREATED,
        Json(RoomMessage {
            message: ROOM_CREATED.to_string(),
            room: to_room(record)?,
        }),
    ))
}

/// PUT /rooms/{id} and PATCH /rooms/{id}
///
/// Only the supplied fields are validated and written.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RoomBody(input): RoomBody<UpdateRoom>,
) -> AppResult<Json<RoomMessage<Room>>> {
    let changes = input.into_changes()?;
    let record = state.store.update(id, &changes).await?;

    tracing::info!(room_id = id, disponibilidade = %record.disponibilidade, "Room updated");

    Ok(Json(RoomMessage {
        message: ROOM_UPDATED.to_string(),
        room: to_room(record)?,
    }))
}

/// POST /rooms/{id}/toggle
///
/// Flip the room between `livre` and `reservada`.
pub async fn toggle_availability(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoomMessage<Room>>> {
    let record = state.store.toggle(id).await?;

    tracing::info!(
        room_id = id,
        disponibilidade = %record.disponibilidade,
        "Room availability toggled",
    );

    Ok(Json(RoomMessage {
        message: ROOM_UPDATED.to_string(),
        room: to_room(record)?,
    }))
}

/// DELETE /rooms/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let nome = state.store.delete(id).await?;

    tracing::info!(room_id = id, nome = %nome, "Room deleted");

    Ok(Json(MessageResponse {
        message: room_deleted(&nome),
    }))
}
