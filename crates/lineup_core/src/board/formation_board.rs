//! Formation board controller
//!
//! Owns the live board of the selected template. Every mutation updates the
//! in-memory board first and then hands the new slot list to the write lane
//! of `formation/<template>`; the caller never waits for the write.
//!
//! Persistence failures never block editing. They surface as a
//! [`PersistenceNotice`] until a later write of the same key succeeds. Any
//! mutation or [`FormationBoard::retry_persist`] re-sends the newest state of
//! every failed key, including boards of templates no longer shown.

use tracing::{debug, info, warn};

use super::state::BoardState;
use super::switcher::reset_to_template;
use crate::error::Result;
use crate::models::{Player, RosterProvider};
use crate::save::{decode_slots, encode_slots, formation_key, SaveError, WriteQueue};
use crate::tactics::{Template, TemplateCatalog};

/// Non-blocking "changes not saved" notice for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceNotice {
    pub key: String,
    pub message: String,
}

impl PersistenceNotice {
    fn new(key: &str, err: &SaveError) -> Self {
        Self { key: key.to_string(), message: err.to_string() }
    }
}

pub struct FormationBoard {
    catalog: &'static TemplateCatalog,
    writes: WriteQueue,
    state: BoardState,
    load_notice: Option<PersistenceNotice>,
}

impl FormationBoard {
    /// Opens the board of `template_name`: its stored state if there is one,
    /// the template's default layout otherwise.
    pub fn open(
        catalog: &'static TemplateCatalog,
        writes: WriteQueue,
        template_name: &str,
    ) -> Result<Self> {
        let template = catalog.get_template(template_name)?;
        let (state, load_notice) = load_state(&writes, template);
        info!(template = template_name, assigned = state.assigned_count(), "Opened formation board");
        Ok(Self { catalog, writes, state, load_notice })
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn template_name(&self) -> &str {
        &self.state.template_name
    }

    pub fn catalog(&self) -> &'static TemplateCatalog {
        self.catalog
    }

    pub fn writes(&self) -> &WriteQueue {
        &self.writes
    }

    pub fn assign(&mut self, slot_id: &str, player_id: &str) -> Result<()> {
        let next = self.state.assign(slot_id, player_id).inspect_err(|e| warn!(error = %e, "Assign rejected"))?;
        debug!(slot = slot_id, player = player_id, "Assigned player");
        self.commit(next);
        Ok(())
    }

    pub fn clear(&mut self, slot_id: &str) -> Result<()> {
        let next = self.state.clear(slot_id).inspect_err(|e| warn!(error = %e, "Clear rejected"))?;
        debug!(slot = slot_id, "Cleared slot");
        self.commit(next);
        Ok(())
    }

    /// Takes everybody off the board, positions stay.
    pub fn clear_all(&mut self) {
        let next = self.state.clear_all();
        debug!(template = %self.state.template_name, "Cleared all slots");
        self.commit(next);
    }

    /// Commits the end-of-drag position of a slot. Always persisted, even
    /// when the slot did not move.
    pub fn reposition(&mut self, slot_id: &str, x: f64, y: f64) -> Result<()> {
        let next =
            self.state.reposition(slot_id, x, y).inspect_err(|e| warn!(error = %e, "Move rejected"))?;
        debug!(slot = slot_id, x, y, "Repositioned slot");
        self.commit(next);
        Ok(())
    }

    /// Replaces the board with the default layout of `template_name` and
    /// persists it under that template.
    pub fn reset_to_template(&mut self, template_name: &str) -> Result<()> {
        let next = reset_to_template(self.catalog, template_name)?;
        info!(template = template_name, "Reset formation to template defaults");
        self.load_notice = None;
        self.commit(next);
        Ok(())
    }

    /// Resets the current template.
    pub fn reset(&mut self) -> Result<()> {
        let name = self.state.template_name.clone();
        self.reset_to_template(&name)
    }

    /// Switches the active template.
    ///
    /// With `preserve_assignments` the current players are snapped onto the
    /// new template's default layout and that board is persisted; the ids of
    /// players that did not fit are returned. Without it the new template's
    /// own stored board is loaded and the current one is left as it is.
    pub fn switch_template(
        &mut self,
        template_name: &str,
        preserve_assignments: bool,
    ) -> Result<Vec<String>> {
        let template = self.catalog.get_template(template_name)?;

        if !preserve_assignments {
            let (state, load_notice) = load_state(&self.writes, template);
            info!(from = %self.state.template_name, to = template_name, "Switched template");
            self.state = state;
            self.load_notice = load_notice;
            return Ok(Vec::new());
        }

        let (next, dropped) = self.state.snapped_onto(template);
        if !dropped.is_empty() {
            warn!(
                to = template_name,
                dropped = ?dropped,
                "Not enough slots in the new template, players left off"
            );
        }
        info!(
            from = %self.state.template_name,
            to = template_name,
            carried = next.assigned_count(),
            "Switched template keeping players"
        );
        self.load_notice = None;
        self.commit(next);
        Ok(dropped)
    }

    /// Roster players the picker may offer.
    pub fn available_players<'a, R>(&self, roster: &'a R) -> Vec<&'a Player>
    where
        R: RosterProvider + ?Sized,
    {
        self.state.available_players(roster)
    }

    /// Most pressing persistence problem, the current template's first.
    pub fn persistence_notice(&self) -> Option<PersistenceNotice> {
        self.persistence_notices().into_iter().next()
    }

    /// Every unresolved persistence problem, including boards of templates
    /// switched away from whose last write failed.
    pub fn persistence_notices(&self) -> Vec<PersistenceNotice> {
        let current = formation_key(&self.state.template_name);
        let mut notices: Vec<PersistenceNotice> = self.current_notice(&current).into_iter().collect();
        for key in self.writes.failed_keys() {
            if key == current {
                continue;
            }
            if let Some(message) = self.writes.status(&key).and_then(|s| s.last_error) {
                notices.push(PersistenceNotice { key, message });
            }
        }
        notices
    }

    /// Writes the current board again, along with the newest state of every
    /// other board whose last write failed.
    pub fn retry_persist(&mut self) {
        info!(template = %self.state.template_name, "Retrying board write");
        self.persist();
    }

    /// Waits for every issued write to finish.
    pub async fn flush(&self) {
        self.writes.flush().await;
    }

    fn commit(&mut self, next: BoardState) {
        self.state = next;
        self.persist();
    }

    fn current_notice(&self, key: &str) -> Option<PersistenceNotice> {
        if let Some(status) = self.writes.status(key) {
            if let Some(message) = status.last_error {
                return Some(PersistenceNotice { key: key.to_string(), message });
            }
            if status.completed > 0 {
                return None;
            }
        }
        self.load_notice.clone().filter(|n| n.key == key)
    }

    /// Enqueues the current board, and re-sends the pending state of other
    /// keys still in a failed state.
    fn persist(&mut self) {
        let key = formation_key(&self.state.template_name);
        for failed in self.writes.failed_keys() {
            if failed != key {
                info!(key = %failed, "Re-sending board after failed write");
                self.writes.retry(&failed);
            }
        }
        match encode_slots(&self.state.slots) {
            Ok(blob) => self.writes.enqueue(&key, blob),
            Err(e) => {
                warn!(key = %key, error = %e, "Could not encode board");
                self.load_notice = Some(PersistenceNotice::new(&key, &e));
            }
        }
    }
}

/// Stored board of `template`, or its defaults. A failed or corrupt read
/// falls back to the defaults and reports a notice.
fn load_state(writes: &WriteQueue, template: &Template) -> (BoardState, Option<PersistenceNotice>) {
    let key = formation_key(template.name);
    let stored = writes.read(&key).and_then(|blob| match blob {
        Some(blob) => decode_slots(&key, &blob).map(Some),
        None => Ok(None),
    });

    match stored {
        Ok(Some(slots)) => (BoardState::from_stored(template, slots), None),
        Ok(None) => (BoardState::from_template(template), None),
        Err(e) => {
            warn!(key = %key, error = %e, "Could not load stored board, using template defaults");
            (BoardState::from_template(template), Some(PersistenceNotice::new(&key, &e)))
        }
    }
}
