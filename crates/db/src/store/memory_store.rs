//! In-process room store.

use async_trait::async_trait;
use chrono::Utc;
use roomdesk_core::equipment::StoredEquipment;
use roomdesk_core::error::CoreError;
use roomdesk_core::room::Availability;
use roomdesk_core::types::DbId;
use tokio::sync::RwLock;

use super::{conflict_message, RoomStore};
use crate::error::StoreError;
use crate::models::room::{NewRoom, RoomChanges, RoomRecord, RoomStats};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: DbId,
    rooms: Vec<RoomRecord>,
}

impl MemoryState {
    fn position(&self, id: DbId) -> Option<usize> {
        self.rooms.iter().position(|room| room.id == id)
    }

    fn location_taken(&self, numero: &str, sede: &str, except: Option<DbId>) -> bool {
        self.rooms
            .iter()
            .any(|room| Some(room.id) != except && room.numero == numero && room.sede == sede)
    }
}

/// Room store kept in memory behind a [`RwLock`].
///
/// Writes take the write lock for the whole check-then-write sequence, so two
/// creates racing for the same `(numero, sede)` cannot both succeed.
/// Equipment values are kept exactly as handed over.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    state: RwLock<MemoryState>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with two demo rooms (one free, one reserved).
    pub fn with_demo_rooms() -> Self {
        let now = Utc::now();
        let demo = [
            (
                "Sala de Reunião Principal",
                "101",
                12,
                Availability::Livre,
                "Sala principal para reuniões executivas",
                "Campus Central",
                &["Ar Condicionado", "Projetor", "TV", "WiFi"][..],
            ),
            (
                "Laboratório de Informática",
                "205",
                20,
                Availability::Reservada,
                "Laboratório com computadores para treinamentos",
                "Campus Norte",
                &["Computadores", "Ar Condicionado", "Quadro Digital", "WiFi"][..],
            ),
        ];

        let rooms: Vec<RoomRecord> = demo
            .into_iter()
            .zip(1..)
            .map(
                |((nome, numero, espaco, disponibilidade, descricao, sede, recursos), id)| {
                    RoomRecord {
                        id,
                        nome: nome.to_string(),
                        numero: numero.to_string(),
                        espaco,
                        disponibilidade,
                        descricao: Some(descricao.to_string()),
                        sede: sede.to_string(),
                        recursos: StoredEquipment::Native(
                            recursos.iter().map(|r| r.to_string()).collect(),
                        ),
                        created_at: now,
                        updated_at: now,
                    }
                },
            )
            .collect();

        Self {
            state: RwLock::new(MemoryState {
                last_id: rooms.len() as DbId,
                rooms,
            }),
        }
    }

    async fn filtered(&self, keep: impl Fn(&RoomRecord) -> bool) -> Vec<RoomRecord> {
        let state = self.state.read().await;
        state.rooms.iter().filter(|&room| keep(room)).cloned().collect()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn list(&self) -> Result<Vec<RoomRecord>, StoreError> {
        Ok(self.state.read().await.rooms.clone())
    }

    async fn list_by_site(&self, sede: &str) -> Result<Vec<RoomRecord>, StoreError> {
        Ok(self.filtered(|room| room.sede == sede).await)
    }

    async fn list_by_availability(
        &self,
        availability: Availability,
    ) -> Result<Vec<RoomRecord>, StoreError> {
        Ok(self
            .filtered(|room| room.disponibilidade == availability)
            .await)
    }

    async fn get(&self, id: DbId) -> Result<RoomRecord, StoreError> {
        let state = self.state.read().await;
        state
            .position(id)
            .map(|idx| state.rooms[idx].clone())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, room: &NewRoom) -> Result<RoomRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.location_taken(&room.numero, &room.sede, None) {
            return Err(CoreError::Conflict(conflict_message(&room.numero, &room.sede)).into());
        }

        let now = Utc::now();
        state.last_id += 1;
        let record = RoomRecord {
            id: state.last_id,
            nome: room.nome.clone(),
            numero: room.numero.clone(),
            espaco: room.espaco,
            disponibilidade: room.disponibilidade,
            descricao: room.descricao.clone(),
            sede: room.sede.clone(),
            recursos: room.recursos.clone(),
            created_at: now,
            updated_at: now,
        };
        state.rooms.push(record.clone());

        Ok(record)
    }

    async fn update(&self, id: DbId, changes: &RoomChanges) -> Result<RoomRecord, StoreError> {
        let mut state = self.state.write().await;
        let idx = state.position(id).ok_or_else(|| StoreError::not_found(id))?;

        if changes.touches_location() {
            let current = &state.rooms[idx];
            let numero = changes.numero.as_deref().unwrap_or(&current.numero).to_string();
            let sede = changes.sede.as_deref().unwrap_or(&current.sede).to_string();
            if state.location_taken(&numero, &sede, Some(id)) {
                return Err(CoreError::Conflict(conflict_message(&numero, &sede)).into());
            }
        }

        let record = &mut state.rooms[idx];
        record.apply(changes, Utc::now());
        Ok(record.clone())
    }

    async fn toggle(&self, id: DbId) -> Result<RoomRecord, StoreError> {
        let mut state = self.state.write().await;
        let idx = state.position(id).ok_or_else(|| StoreError::not_found(id))?;

        let record = &mut state.rooms[idx];
        let next = record.disponibilidade.toggled();
        record.apply(&RoomChanges::availability(next), Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, id: DbId) -> Result<String, StoreError> {
        let mut state = self.state.write().await;
        let idx = state.position(id).ok_or_else(|| StoreError::not_found(id))?;
        Ok(state.rooms.remove(idx).nome)
    }

    async fn stats(&self) -> Result<RoomStats, StoreError> {
        let state = self.state.read().await;
        let stats = state.rooms.iter().fold(RoomStats::default(), |mut acc, room| {
            acc.total += 1;
            match room.disponibilidade {
                Availability::Livre => acc.livres += 1,
                Availability::Reservada => acc.reservadas += 1,
            }
            acc.capacidade_total += i64::from(room.espaco);
            acc
        });
        Ok(stats)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
