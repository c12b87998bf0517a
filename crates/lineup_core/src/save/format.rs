//! Storage keys and the board blob format
//!
//! A board is stored as a JSON array of slot records:
//! `[{"id":"GK","role":"GOALKEEPER","x":50.0,"y":92.0,"playerId":"p1"}, ...]`
//! `playerId` is omitted for empty slots.

use super::error::SaveError;
use crate::board::Slot;

pub const FORMATION_KEY_PREFIX: &str = "formation/";

/// Player id -> photo URI map, owned by the roster screens
pub const PHOTO_KEY: &str = "players/photos";

/// Storage key of a template's board.
pub fn formation_key(template_name: &str) -> String {
    format!("{FORMATION_KEY_PREFIX}{template_name}")
}

pub fn encode_slots(slots: &[Slot]) -> Result<String, SaveError> {
    Ok(serde_json::to_string(slots)?)
}

pub fn decode_slots(key: &str, blob: &str) -> Result<Vec<Slot>, SaveError> {
    serde_json::from_str(blob).map_err(|e| {
        tracing::warn!(key, error = %e, "Stored board is not a valid slot list");
        SaveError::Corrupted { key: key.to_string() }
    })
}
