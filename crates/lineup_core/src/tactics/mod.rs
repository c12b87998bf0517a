// crates/lineup_core/src/tactics/mod.rs
// Static formation templates the board is laid out from

pub mod catalog;
pub mod template;

pub use catalog::{TemplateCatalog, DEFAULT_TEMPLATE};
pub use template::{SlotDefinition, Template};
