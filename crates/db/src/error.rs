use roomdesk_core::error::CoreError;

/// Failure of a [`RoomStore`](crate::store::RoomStore) operation.
///
/// Domain outcomes (not found, conflict) travel as [`CoreError`]; anything
/// the database reports that is not one of those stays a raw `sqlx::Error`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(id: roomdesk_core::types::DbId) -> Self {
        StoreError::Core(CoreError::NotFound { entity: "Room", id })
    }
}
