//! Nearest-slot snapping
//!
//! Carries the players of an old layout over to a new template. Assigned
//! source slots are taken in their original order; each player goes to the
//! nearest destination slot still free in this pass (squared Euclidean
//! distance, ties to the earliest destination slot). Players left over once
//! every destination slot is taken are dropped.
//!
//! Greedy in source order rather than a globally optimal matching: the
//! result is reproducible for a fixed input order.

use super::state::Slot;
use crate::tactics::SlotDefinition;

/// Result of a snapping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    /// Destination layout with player ids filled in
    pub slots: Vec<Slot>,
    /// Players that found no free slot, in source order
    pub dropped: Vec<String>,
}

pub fn snap_assignments(source: &[Slot], destination: &[SlotDefinition]) -> SnapOutcome {
    let mut slots: Vec<Slot> = destination.iter().map(Slot::from).collect();
    let mut dropped = Vec::new();

    for from in source {
        let Some(player_id) = &from.player_id else {
            continue;
        };

        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in slots.iter().enumerate() {
            if !candidate.is_empty() {
                continue;
            }
            let dx = from.x - candidate.x;
            let dy = from.y - candidate.y;
            let dist = dx * dx + dy * dy;
            // strict: an equal distance keeps the earlier slot
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((index, dist));
            }
        }

        match best {
            Some((index, _)) => slots[index].player_id = Some(player_id.clone()),
            None => dropped.push(player_id.clone()),
        }
    }

    SnapOutcome { slots, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardState;
    use crate::models::PlayerRole;
    use crate::tactics::TemplateCatalog;

    fn assigned(id: &str, x: f64, y: f64, player: &str) -> Slot {
        let mut slot = Slot::new(id, PlayerRole::Midfielder, x, y);
        slot.player_id = Some(player.to_string());
        slot
    }

    const TWO_SLOTS: &[SlotDefinition] = &[
        SlotDefinition::new("GK", PlayerRole::Goalkeeper, 50.0, 92.0),
        SlotDefinition::new("ST", PlayerRole::Forward, 50.0, 18.0),
    ];

    #[test]
    fn test_exact_position_wins() {
        let source = vec![assigned("GK", 50.0, 92.0, "P1")];
        let outcome = snap_assignments(&source, TWO_SLOTS);
        assert_eq!(outcome.slots[0].player_id.as_deref(), Some("P1"));
        assert!(outcome.slots[1].is_empty());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_over_capacity_drops_silently() {
        let source = vec![
            assigned("A", 50.0, 90.0, "P1"),
            assigned("B", 50.0, 20.0, "P2"),
            assigned("C", 50.0, 50.0, "P3"),
        ];
        let outcome = snap_assignments(&source, TWO_SLOTS);
        let kept: Vec<&str> = outcome.slots.iter().filter_map(|s| s.player_id.as_deref()).collect();
        assert_eq!(kept, vec!["P1", "P2"]);
        assert_eq!(outcome.dropped, vec!["P3".to_string()]);
    }

    #[test]
    fn test_tie_goes_to_earliest_destination() {
        let destination = &[
            SlotDefinition::new("L", PlayerRole::Forward, 40.0, 20.0),
            SlotDefinition::new("R", PlayerRole::Forward, 60.0, 20.0),
        ];
        let source = vec![assigned("C", 50.0, 20.0, "P1")];
        let outcome = snap_assignments(&source, destination);
        assert_eq!(outcome.slots[0].player_id.as_deref(), Some("P1"));
    }

    #[test]
    fn test_source_order_not_distance_order() {
        // P1 comes first and takes the only close slot even though P2 is closer to it
        let destination = &[
            SlotDefinition::new("NEAR", PlayerRole::Forward, 50.0, 50.0),
            SlotDefinition::new("FAR", PlayerRole::Forward, 50.0, 0.0),
        ];
        let source = vec![assigned("A", 50.0, 60.0, "P1"), assigned("B", 50.0, 51.0, "P2")];
        let outcome = snap_assignments(&source, destination);
        assert_eq!(outcome.slots[0].player_id.as_deref(), Some("P1"));
        assert_eq!(outcome.slots[1].player_id.as_deref(), Some("P2"));
    }

    #[test]
    fn test_empty_source_slots_are_ignored() {
        let source = vec![Slot::new("X", PlayerRole::Defender, 50.0, 92.0)];
        let outcome = snap_assignments(&source, TWO_SLOTS);
        assert!(outcome.slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn test_destination_layout_is_preserved() {
        let source = vec![assigned("A", 10.0, 10.0, "P1")];
        let outcome = snap_assignments(&source, TWO_SLOTS);
        let positions: Vec<(&str, f64, f64)> =
            outcome.slots.iter().map(|s| (s.id.as_str(), s.x, s.y)).collect();
        assert_eq!(positions, vec![("GK", 50.0, 92.0), ("ST", 50.0, 18.0)]);
    }

    #[test]
    fn test_full_442_onto_352() {
        let catalog = TemplateCatalog::global();
        let mut source = BoardState::from_template(catalog.get_template("4-4-2").unwrap());
        for (i, slot) in source.slots.iter_mut().enumerate() {
            slot.player_id = Some(format!("p{i}"));
        }
        let t352 = catalog.get_template("3-5-2").unwrap();

        let outcome = snap_assignments(&source.slots, t352.slots);
        let board = BoardState { template_name: "3-5-2".into(), slots: outcome.slots.clone() };

        assert_eq!(board.assigned_count(), 11);
        assert!(board.has_unique_assignments());
        assert!(outcome.dropped.is_empty());

        // replay in source order: each player sits on the nearest slot that was free
        let mut taken = vec![false; t352.slots.len()];
        for from in &source.slots {
            let player = from.player_id.as_deref().unwrap();
            let placed = board.slots.iter().position(|s| s.player_id.as_deref() == Some(player)).unwrap();
            let dist = |d: &SlotDefinition| (from.x - d.x).powi(2) + (from.y - d.y).powi(2);
            let placed_dist = dist(&t352.slots[placed]);
            for (i, def) in t352.slots.iter().enumerate() {
                if !taken[i] {
                    assert!(placed_dist <= dist(def), "{player} skipped a nearer free slot");
                }
            }
            taken[placed] = true;
        }

        // keeper goes in goal
        assert_eq!(board.slot("GK").unwrap().player_id.as_deref(), Some("p0"));
    }

    #[test]
    fn test_deterministic() {
        let catalog = TemplateCatalog::global();
        let mut source = BoardState::from_template(catalog.get_template("4-3-3").unwrap());
        for (i, slot) in source.slots.iter_mut().enumerate().step_by(2) {
            slot.player_id = Some(format!("p{i}"));
        }
        let dest = catalog.get_template("5-3-2").unwrap().slots;
        let first = snap_assignments(&source.slots, dest);
        for _ in 0..10 {
            assert_eq!(snap_assignments(&source.slots, dest), first);
        }
    }
}
