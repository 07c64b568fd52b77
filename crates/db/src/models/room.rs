//! Room entity model and DTOs.

use roomdesk_core::equipment::{self, StoredEquipment};
use roomdesk_core::error::CoreError;
use roomdesk_core::room::{
    normalize_descricao, Availability, FieldChecks, Presence, MAX_NOME_LEN, MAX_NUMERO_LEN,
    MAX_SEDE_LEN,
};
use roomdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A room as held by a store. `recursos` is still in storage form.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRecord {
    pub id: DbId,
    pub nome: String,
    pub numero: String,
    pub espaco: i32,
    pub disponibilidade: Availability,
    pub descricao: Option<String>,
    pub sede: String,
    pub recursos: StoredEquipment,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomRecord {
    /// Merge the supplied fields into this record; everything else is kept.
    pub fn apply(&mut self, changes: &RoomChanges, now: Timestamp) {
        if let Some(nome) = &changes.nome {
            self.nome = nome.clone();
        }
        if let Some(numero) = &changes.numero {
            self.numero = numero.clone();
        }
        if let Some(espaco) = changes.espaco {
            self.espaco = espaco;
        }
        if let Some(disponibilidade) = changes.disponibilidade {
            self.disponibilidade = disponibilidade;
        }
        if let Some(descricao) = &changes.descricao {
            self.descricao = descricao.clone();
        }
        if let Some(sede) = &changes.sede {
            self.sede = sede.clone();
        }
        if let Some(recursos) = &changes.recursos {
            self.recursos = recursos.clone();
        }
        self.updated_at = now;
    }
}

/// A room as returned to clients, with `recursos` decoded to a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: DbId,
    pub nome: String,
    pub numero: String,
    pub espaco: i32,
    pub disponibilidade: Availability,
    pub descricao: Option<String>,
    pub sede: String,
    pub recursos: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<RoomRecord> for Room {
    type Error = CoreError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let recursos = equipment::decode(&record.recursos)?;
        Ok(Room {
            id: record.id,
            nome: record.nome,
            numero: record.numero,
            espaco: record.espaco,
            disponibilidade: record.disponibilidade,
            descricao: record.descricao,
            sede: record.sede,
            recursos,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// A validated room ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub nome: String,
    pub numero: String,
    pub espaco: i32,
    pub disponibilidade: Availability,
    pub descricao: Option<String>,
    pub sede: String,
    pub recursos: StoredEquipment,
}

/// A validated partial update. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomChanges {
    pub nome: Option<String>,
    pub numero: Option<String>,
    pub espaco: Option<i32>,
    pub disponibilidade: Option<Availability>,
    /// `Some(None)` clears the description.
    pub descricao: Option<Option<String>>,
    pub sede: Option<String>,
    pub recursos: Option<StoredEquipment>,
}

impl RoomChanges {
    /// Changes that only set the availability.
    pub fn availability(disponibilidade: Availability) -> Self {
        Self {
            disponibilidade: Some(disponibilidade),
            ..Self::default()
        }
    }

    /// Whether the update touches the `(numero, sede)` uniqueness key.
    pub fn touches_location(&self) -> bool {
        self.numero.is_some() || self.sede.is_some()
    }
}

/// Request body for creating a room.
///
/// Every field is optional at the serde level so that missing required
/// fields are reported together by [`CreateRoom::into_new_room`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRoom {
    pub nome: Option<String>,
    pub numero: Option<String>,
    pub espaco: Option<i64>,
    /// Defaults to `livre` if omitted.
    pub disponibilidade: Option<String>,
    pub descricao: Option<String>,
    pub sede: Option<String>,
    /// Defaults to an empty list if omitted.
    pub recursos: Option<Vec<String>>,
}

impl CreateRoom {
    /// Validate every field and encode the equipment list for storage.
    pub fn into_new_room(self) -> Result<NewRoom, CoreError> {
        let mut checks = FieldChecks::new();
        let nome = checks.text("nome", self.nome.as_deref(), MAX_NOME_LEN, Presence::Required);
        let numero = checks.text(
            "numero",
            self.numero.as_deref(),
            MAX_NUMERO_LEN,
            Presence::Required,
        );
        let espaco = checks.espaco(self.espaco, Presence::Required);
        let disponibilidade = checks.availability(self.disponibilidade.as_deref());
        let sede = checks.text("sede", self.sede.as_deref(), MAX_SEDE_LEN, Presence::Required);
        checks.finish()?;

        let (Some(nome), Some(numero), Some(espaco), Some(sede)) = (nome, numero, espaco, sede)
        else {
            return Err(CoreError::Internal(
                "Room fields passed validation but were not captured".to_string(),
            ));
        };

        let recursos = self.recursos.unwrap_or_default();

        Ok(NewRoom {
            nome,
            numero,
            espaco,
            disponibilidade: disponibilidade.unwrap_or_default(),
            descricao: normalize_descricao(self.descricao.as_deref()),
            sede,
            recursos: equipment::encode(&recursos)?,
        })
    }
}

/// Request body for a partial update. Only supplied fields are validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoom {
    pub nome: Option<String>,
    pub numero: Option<String>,
    pub espaco: Option<i64>,
    pub disponibilidade: Option<String>,
    /// Absent leaves the description alone; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub descricao: Option<Option<String>>,
    pub sede: Option<String>,
    pub recursos: Option<Vec<String>>,
}

impl UpdateRoom {
    /// Validate the supplied fields and encode the equipment list if present.
    pub fn into_changes(self) -> Result<RoomChanges, CoreError> {
        let mut checks = FieldChecks::new();
        let nome = checks.text("nome", self.nome.as_deref(), MAX_NOME_LEN, Presence::Sometimes);
        let numero = checks.text(
            "numero",
            self.numero.as_deref(),
            MAX_NUMERO_LEN,
            Presence::Sometimes,
        );
        let espaco = checks.espaco(self.espaco, Presence::Sometimes);
        let disponibilidade = checks.availability(self.disponibilidade.as_deref());
        let sede = checks.text("sede", self.sede.as_deref(), MAX_SEDE_LEN, Presence::Sometimes);
        checks.finish()?;

        let recursos = self
            .recursos
            .as_deref()
            .map(equipment::encode)
            .transpose()?;

        Ok(RoomChanges {
            nome,
            numero,
            espaco,
            disponibilidade,
            descricao: self
                .descricao
                .map(|descricao| normalize_descricao(descricao.as_deref())),
            sede,
            recursos,
        })
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Summary counters over all rooms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct RoomStats {
    pub total: i64,
    pub livres: i64,
    pub reservadas: i64,
    /// Sum of `espaco` over all rooms.
    pub capacidade_total: i64,
}
