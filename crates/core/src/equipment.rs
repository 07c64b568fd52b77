//! Storage encoding for room equipment tags (`recursos`).
//!
//! The PostgreSQL store keeps the tag list as a JSON array serialized into a
//! text column; the memory store may keep the list as-is. [`decode`] accepts
//! either representation and never reorders or alters tags, so
//! `decode(&encode(tags)?)? == tags` for every list.

use crate::error::CoreError;

/// Equipment tags as held by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredEquipment {
    /// A JSON array of strings serialized to text, e.g. `["WiFi","TV"]`.
    Serialized(String),
    /// A list kept natively by the backend.
    Native(Vec<String>),
}

impl Default for StoredEquipment {
    fn default() -> Self {
        StoredEquipment::Serialized("[]".to_string())
    }
}

impl StoredEquipment {
    /// The serialized text form, encoding a native list if needed.
    pub fn to_serialized(&self) -> Result<String, CoreError> {
        match self {
            StoredEquipment::Serialized(text) => Ok(text.clone()),
            StoredEquipment::Native(tags) => serialize(tags),
        }
    }
}

/// Encode a tag list into the storage representation.
pub fn encode(tags: &[String]) -> Result<StoredEquipment, CoreError> {
    serialize(tags).map(StoredEquipment::Serialized)
}

/// Decode the storage representation back into the ordered tag list.
///
/// An empty or `null` blob decodes to an empty list. A blob holding a JSON
/// string (a double-encoded array) is unwrapped once more.
pub fn decode(stored: &StoredEquipment) -> Result<Vec<String>, CoreError> {
    match stored {
        StoredEquipment::Native(tags) => Ok(tags.clone()),
        StoredEquipment::Serialized(text) => decode_text(text),
    }
}

fn serialize(tags: &[String]) -> Result<String, CoreError> {
    serde_json::to_string(tags)
        .map_err(|e| CoreError::Internal(format!("Failed to encode equipment list: {e}")))
}

fn decode_text(text: &str) -> Result<Vec<String>, CoreError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| CoreError::Internal(format!("Stored equipment list is not JSON: {e}")))?;

    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::String(inner) => decode_text(&inner),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(tag) => Ok(tag),
                other => Err(CoreError::Internal(format!(
                    "Stored equipment tag is not a string: {other}"
                ))),
            })
            .collect(),
        other => Err(CoreError::Internal(format!(
            "Stored equipment list is not an array: {other}"
        ))),
    }
}
