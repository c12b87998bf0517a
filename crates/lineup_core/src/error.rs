use thiserror::Error;

use crate::save::SaveError;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Unknown template: {name}")]
    TemplateNotFound { name: String },

    #[error("Unknown slot '{slot_id}' in template {template}")]
    SlotNotFound { template: String, slot_id: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] SaveError),
}

impl BoardError {
    /// Unknown template or slot id. These only come from programmer errors,
    /// normal UI paths never produce them.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::TemplateNotFound { .. } | BoardError::SlotNotFound { .. })
    }

    pub(crate) fn template(name: &str) -> Self {
        BoardError::TemplateNotFound { name: name.to_string() }
    }

    pub(crate) fn slot(template: &str, slot_id: &str) -> Self {
        BoardError::SlotNotFound { template: template.to_string(), slot_id: slot_id.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
