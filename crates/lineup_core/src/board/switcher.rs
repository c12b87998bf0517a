use super::snapping::{snap_assignments, SnapOutcome};
use super::state::BoardState;
use crate::error::Result;
use crate::tactics::{Template, TemplateCatalog};

/// Default layout of `template_name` with nobody assigned.
pub fn reset_to_template(catalog: &TemplateCatalog, template_name: &str) -> Result<BoardState> {
    let template = catalog.get_template(template_name)?;
    Ok(BoardState::from_template(template))
}

impl BoardState {
    /// This board's players snapped onto the default layout of `template`.
    pub fn snapped_onto(&self, template: &Template) -> (BoardState, Vec<String>) {
        let SnapOutcome { slots, dropped } = snap_assignments(&self.slots, template.slots);
        (BoardState { template_name: template.name.to_string(), slots }, dropped)
    }
}
