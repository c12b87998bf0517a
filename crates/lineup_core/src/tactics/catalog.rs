// crates/lineup_core/src/tactics/catalog.rs
// Fixed catalog of the club's 8 formations with default slot positions

use super::template::{SlotDefinition, Template};
use crate::error::{BoardError, Result};
use crate::models::PlayerRole::{Defender as DF, Forward as FW, Goalkeeper as GK, Midfielder as MF};

/// Template the board opens on when nothing else is configured
pub const DEFAULT_TEMPLATE: &str = "3-1-4-2";

// ============================================================================
// Formation Definitions (8 formations)
// Defence low on the pitch (high y), attack high (low y).
// ============================================================================

/// 3-1-4-2: holding midfielder behind a flat four
const T3142: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DF1", DF, 20.0, 74.0),
    SlotDefinition::new("DF2", DF, 50.0, 74.0),
    SlotDefinition::new("DF3", DF, 80.0, 74.0),
    SlotDefinition::new("MF1", MF, 50.0, 62.0),
    SlotDefinition::new("MF2", MF, 22.0, 50.0),
    SlotDefinition::new("MF5", MF, 40.0, 50.0),
    SlotDefinition::new("MF3", MF, 60.0, 50.0),
    SlotDefinition::new("MF4", MF, 78.0, 50.0),
    SlotDefinition::new("FW1", FW, 35.0, 22.0),
    SlotDefinition::new("FW2", FW, 65.0, 22.0),
];

/// 3-4-2-1
const T3421: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DF1", DF, 20.0, 74.0),
    SlotDefinition::new("DF2", DF, 50.0, 74.0),
    SlotDefinition::new("DF3", DF, 80.0, 74.0),
    SlotDefinition::new("MF1", MF, 20.0, 56.0),
    SlotDefinition::new("MF2", MF, 40.0, 56.0),
    SlotDefinition::new("MF3", MF, 60.0, 56.0),
    SlotDefinition::new("MF4", MF, 80.0, 56.0),
    SlotDefinition::new("TQ1", MF, 38.0, 36.0),
    SlotDefinition::new("TQ2", MF, 62.0, 36.0),
    SlotDefinition::new("PC", FW, 50.0, 18.0),
];

/// 4-4-2 Standard
const T442: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DL", DF, 12.0, 74.0),
    SlotDefinition::new("DC1", DF, 36.0, 74.0),
    SlotDefinition::new("DC2", DF, 64.0, 74.0),
    SlotDefinition::new("DR", DF, 88.0, 74.0),
    SlotDefinition::new("ML", MF, 18.0, 54.0),
    SlotDefinition::new("MC1", MF, 40.0, 54.0),
    SlotDefinition::new("MC2", MF, 60.0, 54.0),
    SlotDefinition::new("MR", MF, 82.0, 54.0),
    SlotDefinition::new("F1", FW, 42.0, 22.0),
    SlotDefinition::new("F2", FW, 58.0, 22.0),
];

/// 4-3-3
const T433: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DL", DF, 12.0, 74.0),
    SlotDefinition::new("DC1", DF, 36.0, 74.0),
    SlotDefinition::new("DC2", DF, 64.0, 74.0),
    SlotDefinition::new("DR", DF, 88.0, 74.0),
    SlotDefinition::new("MC", MF, 50.0, 58.0),
    SlotDefinition::new("MS", MF, 32.0, 56.0),
    SlotDefinition::new("MD", MF, 68.0, 56.0),
    SlotDefinition::new("AS", FW, 24.0, 26.0),
    SlotDefinition::new("PC", FW, 50.0, 18.0),
    SlotDefinition::new("AD", FW, 76.0, 26.0),
];

/// 4-2-3-1
const T4231: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DL", DF, 12.0, 74.0),
    SlotDefinition::new("DC1", DF, 36.0, 74.0),
    SlotDefinition::new("DC2", DF, 64.0, 74.0),
    SlotDefinition::new("DR", DF, 88.0, 74.0),
    SlotDefinition::new("MDM1", MF, 38.0, 62.0),
    SlotDefinition::new("MDM2", MF, 62.0, 62.0),
    SlotDefinition::new("TQ1", MF, 30.0, 40.0),
    SlotDefinition::new("TQ2", MF, 50.0, 38.0),
    SlotDefinition::new("TQ3", MF, 70.0, 40.0),
    SlotDefinition::new("PC", FW, 50.0, 18.0),
];

/// 4-3-2-1 (Christmas tree)
const T4321: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DL", DF, 12.0, 74.0),
    SlotDefinition::new("DC1", DF, 36.0, 74.0),
    SlotDefinition::new("DC2", DF, 64.0, 74.0),
    SlotDefinition::new("DR", DF, 88.0, 74.0),
    SlotDefinition::new("MC1", MF, 35.0, 58.0),
    SlotDefinition::new("REG", MF, 50.0, 58.0),
    SlotDefinition::new("MC2", MF, 65.0, 58.0),
    SlotDefinition::new("TQ1", MF, 42.0, 38.0),
    SlotDefinition::new("TQ2", MF, 57.0, 38.0),
    SlotDefinition::new("PC", FW, 50.0, 18.0),
];

/// 3-5-2
const T352: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DF1", DF, 20.0, 74.0),
    SlotDefinition::new("DF2", DF, 50.0, 74.0),
    SlotDefinition::new("DF3", DF, 80.0, 74.0),
    SlotDefinition::new("ES", MF, 16.0, 56.0),
    SlotDefinition::new("MC1", MF, 36.0, 58.0),
    SlotDefinition::new("REG", MF, 50.0, 60.0),
    SlotDefinition::new("MC2", MF, 64.0, 58.0),
    SlotDefinition::new("ED", MF, 84.0, 56.0),
    SlotDefinition::new("AT1", FW, 42.0, 22.0),
    SlotDefinition::new("AT2", FW, 58.0, 22.0),
];

/// 5-3-2
const T532: &[SlotDefinition] = &[
    SlotDefinition::new("GK", GK, 50.0, 92.0),
    SlotDefinition::new("DL", DF, 8.0, 74.0),
    SlotDefinition::new("DC1", DF, 28.0, 74.0),
    SlotDefinition::new("LDC", DF, 50.0, 76.0),
    SlotDefinition::new("DC2", DF, 72.0, 74.0),
    SlotDefinition::new("DR", DF, 92.0, 74.0),
    SlotDefinition::new("MC1", MF, 36.0, 56.0),
    SlotDefinition::new("REG", MF, 50.0, 58.0),
    SlotDefinition::new("MC2", MF, 64.0, 56.0),
    SlotDefinition::new("AT1", FW, 42.0, 22.0),
    SlotDefinition::new("AT2", FW, 58.0, 22.0),
];

/// All templates in catalog order
const TEMPLATES: &[Template] = &[
    Template {
        name: "3-1-4-2",
        description: "Three at the back, holding midfielder behind a flat four",
        slots: T3142,
    },
    Template { name: "3-4-2-1", description: "Two playmakers behind a lone striker", slots: T3421 },
    Template { name: "4-4-2", description: "Two banks of four, two forwards", slots: T442 },
    Template { name: "4-3-3", description: "Midfield three with wingers", slots: T433 },
    Template { name: "4-2-3-1", description: "Double pivot, three behind the striker", slots: T4231 },
    Template { name: "4-3-2-1", description: "Christmas tree", slots: T4321 },
    Template { name: "3-5-2", description: "Wing-backs and a regista", slots: T352 },
    Template { name: "5-3-2", description: "Back five with a covering centre-half", slots: T532 },
];

static CATALOG: TemplateCatalog = TemplateCatalog { templates: TEMPLATES };

/// Read-only registry of the supported templates.
#[derive(Debug)]
pub struct TemplateCatalog {
    templates: &'static [Template],
}

impl TemplateCatalog {
    /// The club catalog.
    pub fn global() -> &'static TemplateCatalog {
        &CATALOG
    }

    /// Template names in catalog order.
    pub fn list_template_names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name).collect()
    }

    pub fn get_template(&self, name: &str) -> Result<&'static Template> {
        self.templates.iter().find(|t| t.name == name).ok_or_else(|| BoardError::template(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t.name == name)
    }

    pub fn templates(&self) -> &'static [Template] {
        self.templates
    }
}
