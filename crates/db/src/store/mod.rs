//! The room store abstraction and its implementations.
//!
//! Handlers depend on `Arc<dyn RoomStore>` only, so the PostgreSQL store and
//! the in-memory store are interchangeable (the latter backs tests and the
//! offline demo mode).

use async_trait::async_trait;
use roomdesk_core::room::Availability;
use roomdesk_core::types::DbId;

use crate::error::StoreError;
use crate::models::room::{NewRoom, RoomChanges, RoomRecord, RoomStats};

mod memory_store;
mod pg_store;

pub use memory_store::MemoryRoomStore;
pub use pg_store::PgRoomStore;

/// CRUD and filtered reads over room records.
///
/// Inputs are already validated; stores enforce only what needs their state:
/// existence of ids and uniqueness of `(numero, sede)`. The uniqueness check
/// and the write it guards are atomic with respect to other writers.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// All rooms in insertion order.
    async fn list(&self) -> Result<Vec<RoomRecord>, StoreError>;

    /// Rooms whose `sede` equals `sede` exactly.
    async fn list_by_site(&self, sede: &str) -> Result<Vec<RoomRecord>, StoreError>;

    /// Rooms with the given availability.
    async fn list_by_availability(
        &self,
        availability: Availability,
    ) -> Result<Vec<RoomRecord>, StoreError>;

    async fn list_available(&self) -> Result<Vec<RoomRecord>, StoreError> {
        self.list_by_availability(Availability::Livre).await
    }

    async fn list_reserved(&self) -> Result<Vec<RoomRecord>, StoreError> {
        self.list_by_availability(Availability::Reservada).await
    }

    /// Fails with `NotFound` if `id` is absent.
    async fn get(&self, id: DbId) -> Result<RoomRecord, StoreError>;

    /// Insert a room. Fails with `Conflict` if `(numero, sede)` is taken.
    async fn create(&self, room: &NewRoom) -> Result<RoomRecord, StoreError>;

    /// Merge `changes` into room `id`. Fails with `NotFound` or `Conflict`.
    async fn update(&self, id: DbId, changes: &RoomChanges) -> Result<RoomRecord, StoreError>;

    /// Flip room `id` between `livre` and `reservada` in one atomic step.
    async fn toggle(&self, id: DbId) -> Result<RoomRecord, StoreError>;

    /// Remove room `id` permanently, returning its `nome`.
    async fn delete(&self, id: DbId) -> Result<String, StoreError>;

    async fn stats(&self) -> Result<RoomStats, StoreError>;

    /// Whether the backing storage is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

pub(crate) fn conflict_message(numero: &str, sede: &str) -> String {
    format!("Room number '{numero}' already exists at sede '{sede}'")
}
