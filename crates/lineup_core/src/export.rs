//! Lineup export
//!
//! Resolves a board into a printable sheet (names and photos instead of ids)
//! and hands it to a share facility. Rendering the pitch image is left to the
//! front end; the crate ships a sink that writes the sheet as JSON.

use std::fs::{rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardState;
use crate::models::RosterProvider;
use crate::save::PhotoMap;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupRow {
    pub slot_id: String,
    /// GK/DF/MF/FW
    pub role: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupSheet {
    pub template: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<LineupRow>,
}

impl LineupSheet {
    pub fn from_board<R>(state: &BoardState, roster: &R, photos: &PhotoMap) -> Self
    where
        R: RosterProvider + ?Sized,
    {
        Self::from_board_at(state, roster, photos, Utc::now())
    }

    pub fn from_board_at<R>(
        state: &BoardState,
        roster: &R,
        photos: &PhotoMap,
        generated_at: DateTime<Utc>,
    ) -> Self
    where
        R: RosterProvider + ?Sized,
    {
        let rows = state
            .slots
            .iter()
            .map(|slot| {
                let player_id = slot.player_id.clone();
                let player_name = player_id.as_deref().and_then(|id| match roster.find(id) {
                    Some(player) => Some(player.name.clone()),
                    None => {
                        tracing::warn!(player = id, slot = %slot.id, "Assigned player is not in the roster");
                        None
                    }
                });
                let photo_uri =
                    player_id.as_deref().and_then(|id| photos.uri(id)).map(str::to_string);
                LineupRow {
                    slot_id: slot.id.clone(),
                    role: slot.role.short_name().to_string(),
                    x: slot.x,
                    y: slot.y,
                    player_id,
                    player_name,
                    photo_uri,
                }
            })
            .collect();

        Self { template: state.template_name.clone(), generated_at, rows }
    }

    /// Rows with a player on them
    pub fn filled_rows(&self) -> impl Iterator<Item = &LineupRow> {
        self.rows.iter().filter(|r| r.player_id.is_some())
    }

    pub fn file_name(&self) -> String {
        format!("lineup-{}-{}.json", self.template, self.generated_at.format("%Y%m%d-%H%M%S"))
    }
}

/// Share facility the finished sheet is handed to.
pub trait ExportSink {
    fn share(&self, sheet: &LineupSheet) -> Result<(), ExportError>;
}

/// Writes sheets as pretty JSON files into `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `sheet` and returns the path of the file.
    pub fn write(&self, sheet: &LineupSheet) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(sheet.file_name());
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(sheet)?;
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        rename(&tmp_path, &path)?;

        tracing::info!(template = %sheet.template, path = ?path, "Exported lineup");
        Ok(path)
    }
}

impl ExportSink for JsonFileSink {
    fn share(&self, sheet: &LineupSheet) -> Result<(), ExportError> {
        self.write(sheet).map(|_| ())
    }
}
