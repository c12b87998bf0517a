use std::collections::HashMap;

use super::format::PHOTO_KEY;
use super::store::KeyValueStore;

/// Player id -> photo URI, read from `players/photos`.
///
/// The board never writes this key. A missing or unreadable map is treated
/// as "no photos", same as the roster screens do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoMap {
    uris: HashMap<String, Option<String>>,
}

impl PhotoMap {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let blob = match store.get(PHOTO_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read photo map, showing default avatars");
                return Self::default();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(uris) => Self { uris },
            Err(e) => {
                tracing::warn!(error = %e, "Photo map is not valid JSON, ignoring it");
                Self::default()
            }
        }
    }

    pub fn uri(&self, player_id: &str) -> Option<&str> {
        self.uris.get(player_id).and_then(|u| u.as_deref())
    }

    pub fn len(&self) -> usize {
        self.uris.values().filter(|u| u.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
