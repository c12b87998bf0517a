//! # lineup_core - Formation Board for an amateur football club
//!
//! Core of the drag-and-drop lineup board: a static catalog of tactical
//! templates, a live board of slots that roster players are assigned to and
//! moved around on, and a template switcher that can carry the lineup over to
//! a new shape by nearest-slot snapping.
//!
//! ## Features
//! - Immutable template catalog ("3-1-4-2", "4-4-2", "3-5-2", ...)
//! - At most one slot per player on a board
//! - Clamped repositioning in percent coordinates (0-100)
//! - Deterministic greedy snapping on template switch
//! - Per-key serialized persistence writes over any key-value store

pub mod board;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod save;
pub mod tactics;

pub use board::{BoardState, FormationBoard, PersistenceNotice, Slot, SnapOutcome};
pub use config::{BoardConfig, ConfigError};
pub use error::{BoardError, Result};
pub use export::{ExportError, ExportSink, JsonFileSink, LineupSheet};
pub use models::{Player, PlayerRole, Roster, RosterFilter, RosterProvider};
pub use save::{FileStore, KeyValueStore, MemoryStore, PhotoMap, SaveError, WriteQueue};
pub use tactics::{SlotDefinition, Template, TemplateCatalog};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
