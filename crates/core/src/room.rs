//! Room availability and field constraints.
//!
//! Provides the availability enum, the length/range limits for room fields
//! and a [`FieldChecks`] accumulator so create and update requests can
//! report every violated field at once instead of stopping at the first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldError};

/// A value that is neither `livre` nor `reservada`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid disponibilidade '{0}'. Must be one of: livre, reservada")]
pub struct InvalidAvailability(pub String);

/* --------------------------------------------------------------------------
   Availability
   -------------------------------------------------------------------------- */

/// Wire value for a free room.
pub const AVAILABILITY_LIVRE: &str = "livre";

/// Wire value for a reserved room.
pub const AVAILABILITY_RESERVADA: &str = "reservada";

/// Booking status of a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Livre,
    Reservada,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Livre => AVAILABILITY_LIVRE,
            Availability::Reservada => AVAILABILITY_RESERVADA,
        }
    }

    /// The opposite status (`livre` <-> `reservada`).
    pub fn toggled(self) -> Self {
        match self {
            Availability::Livre => Availability::Reservada,
            Availability::Reservada => Availability::Livre,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = InvalidAvailability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AVAILABILITY_LIVRE => Ok(Availability::Livre),
            AVAILABILITY_RESERVADA => Ok(Availability::Reservada),
            other => Err(InvalidAvailability(other.to_string())),
        }
    }
}

/* --------------------------------------------------------------------------
   Field limits
   -------------------------------------------------------------------------- */

/// Maximum length of `nome`, in characters.
pub const MAX_NOME_LEN: usize = 255;

/// Maximum length of `numero`, in characters.
pub const MAX_NUMERO_LEN: usize = 50;

/// Maximum length of `sede`, in characters.
pub const MAX_SEDE_LEN: usize = 255;

/// Minimum capacity of a room, in people.
pub const MIN_ESPACO: i64 = 1;

/// Upper bound for `espaco` (it is stored as a 32-bit integer).
pub const MAX_ESPACO: i64 = i32::MAX as i64;

/* --------------------------------------------------------------------------
   Field checks
   -------------------------------------------------------------------------- */

/// Whether a field has to be supplied.
///
/// Creates treat every required field as [`Presence::Required`]; updates
/// treat every field as [`Presence::Sometimes`] (validated only if present).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Sometimes,
}

/// Collects field violations across a whole request.
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Check a bounded, non-empty text field. Returns the trimmed value.
    pub fn text(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max_len: usize,
        presence: Presence,
    ) -> Option<String> {
        let Some(raw) = value else {
            if presence == Presence::Required {
                self.reject(field, format!("{field} is required"));
            }
            return None;
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.reject(field, format!("{field} must not be empty"));
            return None;
        }

        let len = trimmed.chars().count();
        if len > max_len {
            self.reject(
                field,
                format!("{field} too long: {len} chars (max {max_len})"),
            );
            return None;
        }

        Some(trimmed.to_string())
    }

    /// Check the room capacity.
    pub fn espaco(&mut self, value: Option<i64>, presence: Presence) -> Option<i32> {
        let Some(espaco) = value else {
            if presence == Presence::Required {
                self.reject("espaco", "espaco is required");
            }
            return None;
        };

        if espaco < MIN_ESPACO {
            self.reject("espaco", format!("espaco must be at least {MIN_ESPACO}"));
            return None;
        }
        if espaco > MAX_ESPACO {
            self.reject("espaco", format!("espaco must be at most {MAX_ESPACO}"));
            return None;
        }

        i32::try_from(espaco).ok()
    }

    /// Check an availability value. Absence is never an error here: creates
    /// fall back to [`Availability::Livre`].
    pub fn availability(&mut self, value: Option<&str>) -> Option<Availability> {
        let raw = value?;
        match raw.trim().parse::<Availability>() {
            Ok(availability) => Some(availability),
            Err(err) => {
                self.reject("disponibilidade", err.to_string());
                None
            }
        }
    }

    /// Check the JSON type of every field named in `schema` that is present
    /// and not `null` in `body`. Unknown keys are ignored.
    pub fn json_kinds(
        &mut self,
        body: &serde_json::Map<String, serde_json::Value>,
        schema: &[(&'static str, JsonKind)],
    ) {
        for &(field, kind) in schema {
            match body.get(field) {
                None | Some(serde_json::Value::Null) => {}
                Some(value) if kind.matches(value) => {}
                Some(_) => self.reject(field, format!("{field} must be {}", kind.describe())),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when nothing was rejected, otherwise every violation at once.
    pub fn finish(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self.errors))
        }
    }
}

/// Expected JSON type of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Text,
    Integer,
    /// An array whose items are all strings.
    TextList,
}

impl JsonKind {
    pub fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            JsonKind::Text => value.is_string(),
            JsonKind::Integer => value.as_i64().is_some(),
            JsonKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(serde_json::Value::is_string)),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            JsonKind::Text => "a string",
            JsonKind::Integer => "an integer",
            JsonKind::TextList => "an array of strings",
        }
    }
}

/// JSON types of the fields accepted by room create and update bodies.
pub const ROOM_FIELD_KINDS: &[(&str, JsonKind)] = &[
    ("nome", JsonKind::Text),
    ("numero", JsonKind::Text),
    ("espaco", JsonKind::Integer),
    ("disponibilidade", JsonKind::Text),
    ("descricao", JsonKind::Text),
    ("sede", JsonKind::Text),
    ("recursos", JsonKind::TextList),
];

/// Normalize an optional description: trimmed, and empty becomes `None`.
pub fn normalize_descricao(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
