use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::models::PlayerRole;
use crate::tactics::{SlotDefinition, Template};

/// Live slot on the board: a copy of a template slot carrying its current
/// position and, optionally, the player standing there.
///
/// Coordinates are `f64` so positions stored by the club app as JS numbers
/// survive a load and save unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    /// Expected role, informational only
    pub role: PlayerRole,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

impl Slot {
    pub fn new(id: impl Into<String>, role: PlayerRole, x: f64, y: f64) -> Self {
        Self { id: id.into(), role, x, y, player_id: None }
    }

    pub fn is_empty(&self) -> bool {
        self.player_id.is_none()
    }
}

impl From<&SlotDefinition> for Slot {
    fn from(def: &SlotDefinition) -> Self {
        Slot::new(def.id, def.role, def.x, def.y)
    }
}

/// Snapshot of one template's board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub template_name: String,
    pub slots: Vec<Slot>,
}

impl BoardState {
    /// Default layout of `template`, nobody assigned.
    pub fn from_template(template: &Template) -> Self {
        Self {
            template_name: template.name.to_string(),
            slots: template.slots.iter().map(Slot::from).collect(),
        }
    }

    /// Board rebuilt from stored slot records.
    ///
    /// Stored data may have been edited by hand or written by an older app:
    /// coordinates are clamped to the pitch and a player listed twice keeps
    /// only the first slot.
    pub fn from_persisted(template_name: &str, mut slots: Vec<Slot>) -> Self {
        let mut seen = HashSet::new();
        for slot in &mut slots {
            let (x, y) = (clamp_percent(slot.x), clamp_percent(slot.y));
            if (x, y) != (slot.x, slot.y) {
                tracing::warn!(template = template_name, slot = %slot.id, "Clamped stored slot position");
                slot.x = x;
                slot.y = y;
            }
            if let Some(player_id) = &slot.player_id {
                if !seen.insert(player_id.clone()) {
                    tracing::warn!(
                        template = template_name,
                        slot = %slot.id,
                        player = %player_id,
                        "Dropped duplicate stored assignment"
                    );
                    slot.player_id = None;
                }
            }
        }
        Self { template_name: template_name.to_string(), slots }
    }

    /// Stored board of `template`. Slots are matched to the template by id
    /// and kept in template order: template slots missing from the record
    /// come back at their default position, unknown ids are dropped. The
    /// result is then sanitized like [`BoardState::from_persisted`].
    pub fn from_stored(template: &Template, slots: Vec<Slot>) -> Self {
        let mut by_id: HashMap<String, Slot> = HashMap::with_capacity(slots.len());
        let mut unknown = Vec::new();
        for slot in slots {
            if template.slot(&slot.id).is_none() {
                unknown.push(slot.id);
            } else if !by_id.contains_key(&slot.id) {
                by_id.insert(slot.id.clone(), slot);
            }
        }

        let mut missing = Vec::new();
        let aligned: Vec<Slot> = template
            .slots
            .iter()
            .map(|def| match by_id.remove(def.id) {
                Some(mut slot) => {
                    slot.role = def.role;
                    slot
                }
                None => {
                    missing.push(def.id);
                    Slot::from(def)
                }
            })
            .collect();

        if !unknown.is_empty() || !missing.is_empty() {
            tracing::warn!(
                template = template.name,
                unknown = ?unknown,
                missing = ?missing,
                "Stored board does not match the template slots, realigned"
            );
        }
        Self::from_persisted(template.name, aligned)
    }

    pub fn slot(&self, slot_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub(crate) fn slot_index(&self, slot_id: &str) -> Result<usize> {
        self.slots
            .iter()
            .position(|s| s.id == slot_id)
            .ok_or_else(|| BoardError::slot(&self.template_name, slot_id))
    }

    /// Slot currently holding `player_id`, if any.
    pub fn slot_of(&self, player_id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.player_id.as_deref() == Some(player_id))
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Player ids on the board, in slot order.
    pub fn assigned_players(&self) -> Vec<&str> {
        self.slots.iter().filter_map(|s| s.player_id.as_deref()).collect()
    }

    /// No player occupies two slots.
    pub fn has_unique_assignments(&self) -> bool {
        let mut seen = HashSet::new();
        self.assigned_players().into_iter().all(|id| seen.insert(id))
    }
}

/// Clamps a percent coordinate to the pitch. NaN lands on 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
