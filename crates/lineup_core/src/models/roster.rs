//! Roster provider
//!
//! The roster is owned outside the board. The board reads it to resolve
//! names for export and to pre-filter the player picker, never to mutate it.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerRole};
use crate::save::SaveError;

/// Ordered, immutable source of roster players.
pub trait RosterProvider {
    fn players(&self) -> &[Player];

    fn find(&self, id: &str) -> Option<&Player> {
        self.players().iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl RosterProvider for Roster {
    fn players(&self) -> &[Player] {
        &self.players
    }
}

/// Listing filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub role: Option<PlayerRole>,
    pub year: Option<u16>,
    /// Case-insensitive substring of the player name
    pub search: Option<String>,
}

impl RosterFilter {
    pub fn matches(&self, player: &Player) -> bool {
        if let Some(role) = self.role {
            if player.role != role {
                return false;
            }
        }
        if let Some(year) = self.year {
            if player.year != Some(year) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                player.name.to_lowercase().contains(&needle.to_lowercase())
            }
            _ => true,
        }
    }
}

/// Players of one role, as shown under a roster heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSection<'a> {
    pub role: PlayerRole,
    pub players: Vec<&'a Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SaveError> {
        let content = std::fs::read_to_string(path)?;
        let roster = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), players = roster.players.len(), "Loaded roster");
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Filtered players, keepers first, then by name within a role.
    pub fn filter(&self, filter: &RosterFilter) -> Vec<&Player> {
        let mut matched: Vec<&Player> = self.players.iter().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| {
            a.role
                .order()
                .cmp(&b.role.order())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        matched
    }

    /// Filtered players grouped by role. Roles without matches are omitted.
    pub fn sections(&self, filter: &RosterFilter) -> Vec<RosterSection<'_>> {
        let matched = self.filter(filter);
        PlayerRole::all()
            .into_iter()
            .filter_map(|role| {
                let players: Vec<&Player> =
                    matched.iter().copied().filter(|p| p.role == role).collect();
                (!players.is_empty()).then_some(RosterSection { role, players })
            })
            .collect()
    }

    /// Distinct birth years, newest first.
    pub fn years(&self) -> Vec<u16> {
        let years: BTreeSet<u16> = self.players.iter().filter_map(|p| p.year).collect();
        years.into_iter().rev().collect()
    }
}
