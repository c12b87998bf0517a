use serde::{Deserialize, Serialize};

/// Tactical role of a roster player or a board slot.
///
/// Serialized in upper case. The Italian names the club app used to store
/// are accepted on input so older blobs keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerRole {
    #[serde(alias = "PORTIERE")]
    Goalkeeper,
    #[serde(alias = "DIFENSORE")]
    Defender,
    #[serde(alias = "CENTROCAMPISTA")]
    Midfielder,
    #[serde(alias = "ATTACCANTE")]
    Forward,
}

impl PlayerRole {
    pub fn all() -> [PlayerRole; 4] {
        [Self::Goalkeeper, Self::Defender, Self::Midfielder, Self::Forward]
    }

    /// Label shown on an empty slot.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DF",
            Self::Midfielder => "MF",
            Self::Forward => "FW",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defender => "Defender",
            Self::Midfielder => "Midfielder",
            Self::Forward => "Forward",
        }
    }

    /// Sort key for roster listings: keepers first, forwards last.
    pub fn order(&self) -> u8 {
        match self {
            Self::Goalkeeper => 1,
            Self::Defender => 2,
            Self::Midfielder => 3,
            Self::Forward => 4,
        }
    }

    /// Parses a role from user input (`GK`, `defender`, `CENTROCAMPISTA`, ...).
    pub fn parse(value: &str) -> Option<PlayerRole> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GK" | "GOALKEEPER" | "PORTIERE" => Some(Self::Goalkeeper),
            "DF" | "DEFENDER" | "DIFENSORE" => Some(Self::Defender),
            "MF" | "MIDFIELDER" | "CENTROCAMPISTA" => Some(Self::Midfielder),
            "FW" | "FORWARD" | "ATTACCANTE" => Some(Self::Forward),
            _ => None,
        }
    }
}

/// A roster entry. The board only ever references players by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: PlayerRole,
    /// Birth year, used by the roster year filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: PlayerRole) -> Self {
        Self { id: id.into(), name: name.into(), role, year: None }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}
