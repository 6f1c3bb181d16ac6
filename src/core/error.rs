//! Recoverable action rejections.
//!
//! Every variant is local and user-visible: the action was refused and
//! Game State is exactly as it was before the request. Broken internal
//! invariants are not represented here; they panic.

use serde::Serialize;

use crate::cards::Card;

use super::Seat;

/// Why a requested action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RuleError {
    /// The card does not match the active color, the top of the discard
    /// pile, the open sequence, or the open chain.
    #[error("{card} cannot be played: {reason}")]
    IllegalMove { card: Card, reason: &'static str },

    /// The action does not fit the current turn owner, interaction mode
    /// or game status.
    #[error("{seat} cannot act now: {reason}")]
    WrongPhase { seat: Seat, reason: &'static str },

    /// Ending the turn while an action is still owed.
    #[error("{seat} still owes an action: {reason}")]
    PendingObligation { seat: Seat, reason: &'static str },

    /// Draw requested with both the draw and discard piles empty.
    #[error("no cards left to draw")]
    ResourceExhausted,
}

impl RuleError {
    pub(crate) fn illegal(card: Card, reason: &'static str) -> Self {
        RuleError::IllegalMove { card, reason }
    }

    pub(crate) fn phase(seat: Seat, reason: &'static str) -> Self {
        RuleError::WrongPhase { seat, reason }
    }

    pub(crate) fn pending(seat: Seat, reason: &'static str) -> Self {
        RuleError::PendingObligation { seat, reason }
    }
}
