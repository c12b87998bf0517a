use serde::Serialize;

use crate::models::PlayerRole;

/// Canonical slot of a template: id, expected role and default position.
///
/// Coordinates are percent of the pitch (0-100):
/// - X: 0 = left touchline, 100 = right touchline
/// - Y: 0 = opponent goal line, 100 = own goal line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotDefinition {
    pub id: &'static str,
    pub role: PlayerRole,
    pub x: f64,
    pub y: f64,
}

impl SlotDefinition {
    pub const fn new(id: &'static str, role: PlayerRole, x: f64, y: f64) -> Self {
        Self { id, role, x, y }
    }
}

/// A named tactical formation. Never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub slots: &'static [SlotDefinition],
}

impl Template {
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, id: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn role_count(&self, role: PlayerRole) -> usize {
        self.slots.iter().filter(|s| s.role == role).count()
    }

    pub fn defender_count(&self) -> usize {
        self.role_count(PlayerRole::Defender)
    }

    pub fn midfielder_count(&self) -> usize {
        self.role_count(PlayerRole::Midfielder)
    }

    pub fn forward_count(&self) -> usize {
        self.role_count(PlayerRole::Forward)
    }
}
