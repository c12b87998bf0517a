//! Assignment engine
//!
//! Puts players on slots and takes them off again. Every operation returns a
//! new board and leaves slot positions alone.
//!
//! A player can stand on one slot only. Assigning a player who is already on
//! the board moves them: the previous slot is vacated. Pickers should still
//! offer only [`BoardState::available_players`], moving is the fallback for
//! direct calls.

use super::state::BoardState;
use crate::error::Result;
use crate::models::{Player, RosterProvider};

impl BoardState {
    /// Puts `player_id` on `slot_id`, replacing whoever stood there.
    pub fn assign(&self, slot_id: &str, player_id: &str) -> Result<BoardState> {
        let index = self.slot_index(slot_id)?;
        let mut next = self.clone();

        for (i, slot) in next.slots.iter_mut().enumerate() {
            if i != index && slot.player_id.as_deref() == Some(player_id) {
                tracing::debug!(
                    player = player_id,
                    from = %slot.id,
                    to = slot_id,
                    "Player already on the board, moving"
                );
                slot.player_id = None;
            }
        }
        next.slots[index].player_id = Some(player_id.to_string());
        Ok(next)
    }

    /// Empties `slot_id`. Already empty is fine.
    pub fn clear(&self, slot_id: &str) -> Result<BoardState> {
        let index = self.slot_index(slot_id)?;
        let mut next = self.clone();
        next.slots[index].player_id = None;
        Ok(next)
    }

    /// Empties every slot, positions stay where they are.
    pub fn clear_all(&self) -> BoardState {
        let mut next = self.clone();
        for slot in &mut next.slots {
            slot.player_id = None;
        }
        next
    }

    /// Roster players not yet on the board, in roster order.
    pub fn available_players<'a, R>(&self, roster: &'a R) -> Vec<&'a Player>
    where
        R: RosterProvider + ?Sized,
    {
        let used = self.assigned_players();
        roster.players().iter().filter(|p| !used.contains(&p.id.as_str())).collect()
    }
}
