//! Effect outcomes.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Color};
use crate::core::{Seat, Sequence};

/// Two-flag activation decision for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// The card carries an effect (Plus, Stop, ReverseDirection,
    /// ChangeColor, PlusTwo). Numbers and sequence openers do not.
    pub would_fire: bool,
    /// The effect executes now: outside any sequence, or as the closing card.
    pub fires_now: bool,
}

impl Activation {
    /// Decide activation for `kind` given the sequence situation.
    ///
    /// ```
    /// use taki_engine::cards::CardKind;
    /// use taki_engine::effects::Activation;
    ///
    /// let deferred = Activation::evaluate(CardKind::Plus, true, false);
    /// assert!(deferred.would_fire && !deferred.fires_now);
    ///
    /// let closing = Activation::evaluate(CardKind::Plus, true, true);
    /// assert!(closing.fires_now);
    /// ```
    #[must_use]
    pub fn evaluate(kind: CardKind, in_sequence: bool, closing: bool) -> Self {
        let would_fire = kind.is_special() && !kind.is_sequence();
        Self {
            would_fire,
            fires_now: would_fire && (!in_sequence || closing),
        }
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.would_fire && !self.fires_now
    }
}

/// What resolving a card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Nothing beyond the play itself.
    None,
    /// Plus: the seat owes one more action.
    AdditionalAction,
    /// Stop: the opponent's next turn start is skipped.
    Skip { beneficiary: Seat },
    /// ReverseDirection flipped the direction.
    Reverse,
    /// ChangeColor: the seat may now choose a color.
    SelectColor,
    /// The first PlusTwo of a chain.
    ChainStarted { total: u32 },
    /// A PlusTwo stacked on an open chain.
    ChainContinued { total: u32 },
    /// A Sequence or WildSequence opened a sequence.
    SequenceOpened { color: Color },
    /// A card without an effect joined the open sequence.
    SequenceJoined,
    /// A card joined the open sequence; its effect waits for the close.
    Deferred(CardKind),
}

/// Full outcome of resolving one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub card: Card,
    pub activation: Activation,
    pub effect: Effect,
    /// The sequence this card closed, if it was the closing card.
    pub closed_sequence: Option<Sequence>,
}

impl Resolution {
    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed_sequence.is_some()
    }
}
