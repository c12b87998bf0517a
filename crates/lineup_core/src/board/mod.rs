//! Formation board: slots, assignments, positions and template switching

mod assignment;
mod formation_board;
mod reposition;
mod snapping;
mod state;
mod switcher;

pub use formation_board::{FormationBoard, PersistenceNotice};
pub use snapping::{snap_assignments, SnapOutcome};
pub use state::{clamp_percent, BoardState, Slot};
pub use switcher::reset_to_template;
