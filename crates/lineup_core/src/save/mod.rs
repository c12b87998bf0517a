// Persistence for the formation board
// Key-value stores, the slot blob format and per-key serialized writes

pub mod error;
pub mod format;
pub mod photos;
pub mod queue;
pub mod store;

pub use error::SaveError;
pub use format::{decode_slots, encode_slots, formation_key, PHOTO_KEY};
pub use photos::PhotoMap;
pub use queue::{LaneStatus, WriteQueue};
pub use store::{FileStore, KeyValueStore, MemoryStore};
