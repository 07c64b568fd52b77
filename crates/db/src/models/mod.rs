//! Room model structs and DTOs.
//!
//! - [`room::RoomRecord`]: a room as a store holds it (equipment still encoded)
//! - [`room::Room`]: the client-facing room (equipment decoded)
//! - [`room::CreateRoom`] / [`room::UpdateRoom`]: request bodies, validated
//!   into [`room::NewRoom`] / [`room::RoomChanges`] before reaching a store

pub mod room;
