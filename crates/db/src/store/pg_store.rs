//! PostgreSQL room store backed by the `rooms` table.

use async_trait::async_trait;
use roomdesk_core::equipment::StoredEquipment;
use roomdesk_core::error::CoreError;
use roomdesk_core::room::Availability;
use roomdesk_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use super::{conflict_message, RoomStore};
use crate::error::StoreError;
use crate::models::room::{NewRoom, RoomChanges, RoomRecord, RoomStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, numero, espaco, disponibilidade, descricao, sede, recursos, \
                       created_at, updated_at";

/// Unique constraint guarding `(numero, sede)`.
const UQ_NUMERO_SEDE: &str = "uq_rooms_numero_sede";

/// PostgreSQL unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// A row from the `rooms` table, before availability parsing.
#[derive(Debug, FromRow)]
struct RoomRow {
    id: DbId,
    nome: String,
    numero: String,
    espaco: i32,
    disponibilidade: String,
    descricao: Option<String>,
    sede: String,
    recursos: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl TryFrom<RoomRow> for RoomRecord {
    type Error = StoreError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let disponibilidade = row
            .disponibilidade
            .parse::<Availability>()
            .map_err(|err| CoreError::Internal(format!("Room {}: {err}", row.id)))?;

        Ok(RoomRecord {
            id: row.id,
            nome: row.nome,
            numero: row.numero,
            espaco: row.espaco,
            disponibilidade,
            descricao: row.descricao,
            sede: row.sede,
            recursos: StoredEquipment::Serialized(row.recursos),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_records(rows: Vec<RoomRow>) -> Result<Vec<RoomRecord>, StoreError> {
    rows.into_iter().map(RoomRecord::try_from).collect()
}

/// Turn a violation of [`UQ_NUMERO_SEDE`] into a domain conflict.
fn map_unique_violation(err: sqlx::Error, message: impl FnOnce() -> String) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(UQ_NUMERO_SEDE)
        {
            return CoreError::Conflict(message()).into();
        }
    }
    StoreError::Database(err)
}

/// Room store over a PostgreSQL pool.
///
/// Uniqueness of `(numero, sede)` is left to the table constraint, which
/// makes the check and the write a single atomic statement.
#[derive(Debug, Clone)]
pub struct PgRoomStore {
    pool: PgPool,
}

impl PgRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn list(&self) -> Result<Vec<RoomRecord>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM rooms ORDER BY id");
        let rows = sqlx::query_as::<_, RoomRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn list_by_site(&self, sede: &str) -> Result<Vec<RoomRecord>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE sede = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, RoomRow>(&query)
            .bind(sede)
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn list_by_availability(
        &self,
        availability: Availability,
    ) -> Result<Vec<RoomRecord>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE disponibilidade = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, RoomRow>(&query)
            .bind(availability.as_str())
            .fetch_all(&self.pool)
            .await?;
        into_records(rows)
    }

    async fn get(&self, id: DbId) -> Result<RoomRecord, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        let row = sqlx::query_as::<_, RoomRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;
        row.try_into()
    }

    async fn create(&self, room: &NewRoom) -> Result<RoomRecord, StoreError> {
        let query = format!(
            "INSERT INTO rooms (nome, numero, espaco, disponibilidade, descricao, sede, recursos)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let recursos = room.recursos.to_serialized()?;
        let row = sqlx::query_as::<_, RoomRow>(&query)
            .bind(&room.nome)
            .bind(&room.numero)
            .bind(room.espaco)
            .bind(room.disponibilidade.as_str())
            .bind(&room.descricao)
            .bind(&room.sede)
            .bind(recursos)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, || conflict_message(&room.numero, &room.sede)))?;

        tracing::debug!(room_id = row.id, sede = %row.sede, "Room row inserted");
        row.try_into()
    }

    async fn update(&self, id: DbId, changes: &RoomChanges) -> Result<RoomRecord, StoreError> {
        let query = format!(
            "UPDATE rooms SET
                nome = COALESCE($2, nome),
                numero = COALESCE($3, numero),
                espaco = COALESCE($4, espaco),
                disponibilidade = COALESCE($5, disponibilidade),
                descricao = CASE WHEN $6 THEN $7 ELSE descricao END,
                sede = COALESCE($8, sede),
                recursos = COALESCE($9, recursos),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let recursos = changes
            .recursos
            .as_ref()
            .map(StoredEquipment::to_serialized)
            .transpose()?;
        let descricao = changes.descricao.clone().flatten();

        let row = sqlx::query_as::<_, RoomRow>(&query)
            .bind(id)
            .bind(&changes.nome)
            .bind(&changes.numero)
            .bind(changes.espaco)
            .bind(changes.disponibilidade.map(Availability::as_str))
            .bind(changes.descricao.is_some())
            .bind(descricao)
            .bind(&changes.sede)
            .bind(recursos)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(e, || {
                    "Another room already uses this numero at this sede".to_string()
                })
            })?
            .ok_or_else(|| StoreError::not_found(id))?;

        row.try_into()
    }

    async fn toggle(&self, id: DbId) -> Result<RoomRecord, StoreError> {
        let query = format!(
            "UPDATE rooms SET
                disponibilidade = CASE disponibilidade
                    WHEN 'livre' THEN 'reservada'
                    ELSE 'livre'
                END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RoomRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(id))?;
        row.try_into()
    }

    async fn delete(&self, id: DbId) -> Result<String, StoreError> {
        let deleted: Option<(String,)> =
            sqlx::query_as("DELETE FROM rooms WHERE id = $1 RETURNING nome")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        deleted
            .map(|(nome,)| nome)
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn stats(&self) -> Result<RoomStats, StoreError> {
        let stats = sqlx::query_as::<_, RoomStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE disponibilidade = 'livre') AS livres,
                COUNT(*) FILTER (WHERE disponibilidade = 'reservada') AS reservadas,
                COALESCE(SUM(espaco), 0)::BIGINT AS capacidade_total
             FROM rooms",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
