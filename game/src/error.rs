//! Error types for the `chronocards` crate.
//!
//! Player-facing outcomes (a rejected placement, running out of lives) are ordinary
//! transitions and never show up here.

use std::path::PathBuf;

use crate::catalog::EventId;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Every card has been dealt. Ends the session; not a fault.
    #[error("the deck is empty")]
    EmptyDeck,

    /// The host shell is missing one of its mount points and cannot render the game.
    #[error("host element `{0}` is missing")]
    MissingHostElement(&'static str),

    /// A command that the current phase does not accept, e.g. a drop while idle.
    #[error("`{command}` is not valid while {phase}")]
    InvalidTransition {
        phase: &'static str,
        command: &'static str,
    },

    /// A drop slot past the end of the timeline. The host resolved the index wrongly; the
    /// player keeps the card and every life.
    #[error("slot {index} is outside a timeline of {len} cards")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("catalog has no events")]
    EmptyCatalog,

    #[error("catalog lists `{0}` more than once")]
    DuplicateEvent(EventId),

    #[error("malformed catalog JSON: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GameError {
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, GameError::InvalidTransition { .. })
    }

    /// Caller mistakes that leave the game untouched and are never shown to the player.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GameError::InvalidTransition { .. } | GameError::SlotOutOfRange { .. }
        )
    }
}
