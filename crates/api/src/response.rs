//! Response envelopes for mutating room endpoints.
//!
//! Reads return the room (or list of rooms) as the bare JSON body; writes
//! wrap the result with a human-readable confirmation message.

use serde::Serialize;

/// Confirmation message shown after creating a room.
pub const ROOM_CREATED: &str = "Sala criada com sucesso!";

/// Confirmation message shown after updating a room.
pub const ROOM_UPDATED: &str = "Sala atualizada com sucesso!";

/// Confirmation message shown after deleting the room called `nome`.
pub fn room_deleted(nome: &str) -> String {
    format!("A sala {nome} foi removida com sucesso.")
}

/// `{ "message": ..., "room": ... }` envelope for create/update.
#[derive(Debug, Serialize)]
pub struct RoomMessage<T: Serialize> {
    pub message: String,
    pub room: T,
}

/// `{ "message": ... }` body for delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
