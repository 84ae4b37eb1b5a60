//! Error taxonomy for the run engine.
//!
//! Every error is local and recoverable from the host's point of view: the
//! rejected operation leaves state untouched and the host re-shows the same
//! phase. `InvalidRoundAdvance` and `InvalidPhase` signal a host that has
//! fallen out of sync with the core and are never silently corrected.

use crate::cards::CardId;
use crate::combat::RoundStage;
use crate::core::entity::EntityId;
use crate::run::Phase;

/// Errors surfaced by run, deck, and combat operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("card template {0} not found in catalog")]
    NotFound(CardId),

    #[error("card template {0} is not in the starter pool")]
    NotOffered(CardId),

    #[error("deck must contain exactly {expected} distinct cards, got {actual}")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("deck management is incomplete: reward, replacement, and positions must all be set")]
    IncompleteDeckManagement,

    #[error("cannot {action} while the round is {stage:?}")]
    InvalidRoundAdvance {
        stage: RoundStage,
        action: &'static str,
    },

    #[error("cannot {action} during the {phase:?} phase")]
    InvalidPhase { phase: Phase, action: &'static str },

    #[error("{0} is not part of the current deck")]
    UnknownCard(EntityId),

    #[error("the deck has room for the reward; no replacement is needed")]
    ReplacementNotAllowed,

    #[error("position {0} is outside the deck")]
    InvalidPosition(u8),

    #[error("deck selection already holds the maximum number of cards")]
    SelectionFull,
}

/// Result alias for engine operations.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::InvalidDeckSize { expected: 5, actual: 4 };
        assert_eq!(err.to_string(), "deck must contain exactly 5 distinct cards, got 4");

        let err = GameError::InvalidRoundAdvance {
            stage: RoundStage::Rolling,
            action: "resolve",
        };
        assert_eq!(err.to_string(), "cannot resolve while the round is Rolling");

        let err = GameError::NotFound(CardId::new(99));
        assert_eq!(err.to_string(), "card template Card(99) not found in catalog");

        let err = GameError::NotOffered(CardId::new(8));
        assert_eq!(err.to_string(), "card template Card(8) is not in the starter pool");
    }
}
