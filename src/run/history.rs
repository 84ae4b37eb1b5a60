//! Run history log.
//!
//! An append-only record of what happened during the current run, kept in
//! an `im::Vector` so snapshots share structure instead of copying.

use serde::{Deserialize, Serialize};

use super::phase::RunOutcome;
use crate::cards::CardId;
use crate::combat::CombatCalculation;
use crate::core::entity::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    RunStarted,
    DeckConfirmed {
        cards: Vec<CardId>,
    },
    EncounterStarted {
        combat_index: u32,
        fighter: EntityId,
        enemy: CardId,
        is_boss: bool,
    },
    RoundResolved {
        combat_index: u32,
        round: u32,
        calculation: CombatCalculation,
    },
    CardFell {
        card: EntityId,
    },
    EncounterEnded {
        combat_index: u32,
        victory: bool,
    },
    RewardTaken {
        reward: CardId,
        replaced: Option<EntityId>,
    },
    RunEnded {
        outcome: RunOutcome,
        encounters_cleared: u32,
    },
}
