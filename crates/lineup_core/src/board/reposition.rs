use super::state::{clamp_percent, BoardState};
use crate::error::Result;

impl BoardState {
    /// Moves `slot_id` to the committed end-of-drag position.
    ///
    /// Out-of-pitch coordinates are clamped to 0-100, never rejected.
    /// The assignment of the slot is untouched.
    pub fn reposition(&self, slot_id: &str, x: f64, y: f64) -> Result<BoardState> {
        let index = self.slot_index(slot_id)?;
        let mut next = self.clone();
        let slot = &mut next.slots[index];
        slot.x = clamp_percent(x);
        slot.y = clamp_percent(y);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactics::TemplateCatalog;
    use proptest::prelude::*;

    fn board() -> BoardState {
        BoardState::from_template(TemplateCatalog::global().get_template("4-2-3-1").unwrap())
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let state = board().reposition("TQ2", 150.0, -30.0).unwrap();
        let slot = state.slot("TQ2").unwrap();
        assert_eq!((slot.x, slot.y), (100.0, 0.0));
    }

    #[test]
    fn test_only_addressed_slot_moves() {
        let before = board().assign("PC", "nuti").unwrap();
        let after = before.reposition("PC", 55.0, 15.0).unwrap();
        for (a, b) in before.slots.iter().zip(&after.slots) {
            if a.id == "PC" {
                assert_eq!((b.x, b.y), (55.0, 15.0));
                assert_eq!(b.player_id.as_deref(), Some("nuti"));
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_slot_is_not_found() {
        assert!(board().reposition("NOPE", 1.0, 1.0).unwrap_err().is_not_found());
    }

    proptest! {
        /// Property: committed coordinates always land on the pitch
        #[test]
        fn prop_reposition_clamps(x in -500.0f64..500.0f64, y in -500.0f64..500.0f64) {
            let state = board().reposition("MDM1", x, y).unwrap();
            let slot = state.slot("MDM1").unwrap();
            prop_assert!((0.0..=100.0).contains(&slot.x));
            prop_assert!((0.0..=100.0).contains(&slot.y));
        }

        /// Property: moving a slot to where it already is changes nothing
        #[test]
        fn prop_reposition_idempotent(x in 0.0f64..=100.0f64, y in 0.0f64..=100.0f64) {
            let state = board().reposition("DR", x, y).unwrap();
            let slot = state.slot("DR").unwrap().clone();
            let again = state.reposition("DR", slot.x, slot.y).unwrap();
            prop_assert_eq!(again, state);
        }
    }
}
