// Roster-side data the board reads but never owns

pub mod player;
pub mod roster;

pub use player::{Player, PlayerRole};
pub use roster::{Roster, RosterFilter, RosterProvider, RosterSection};
