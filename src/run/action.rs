//! Inputs to the run and signals back to the host.
//!
//! The input layer translates clicks, keys, or gamepad presses into a
//! `PlayerAction` and hands it to `Run::activate`. How the action was
//! triggered is none of the core's business.
//!
//! After every call the run reports a `HostSignal` telling the host what it
//! is waiting for. Timed signals carry the configured delay; the host sleeps
//! (or animates) for that long and then sends the matching advance action.
//! Dropping a pending advance is always safe: nothing runs in the background.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::entity::EntityId;

/// An intent from the input layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Menu: begin a fresh run.
    StartRun,
    /// Deck selection: pick or unpick a starter template.
    ToggleCard(CardId),
    /// Deck selection: confirm the current pick.
    ConfirmDeck,
    /// Combat (host timer): show the rolled dice.
    Reveal,
    /// Combat (host timer): commit the round's damage.
    Resolve,
    /// Combat: roll the next round.
    NextRound,
    /// Combat (host timer): report the finished encounter.
    FinishCombat,
    /// Reward: pick a reward card.
    SelectReward(EntityId),
    /// Reward: designate the deck card to replace.
    SelectReplacement(EntityId),
    /// Reward: move a card to a slot.
    AssignPosition { card: EntityId, position: u8 },
    /// Reward: confirm the rearranged deck.
    ConfirmDeckManagement,
    /// Any phase: abandon the run and return to the menu.
    BackToMenu,
}

/// What the run is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostSignal {
    /// Waiting on player input (menu, deck selection, reward, game over).
    AwaitingInput,
    /// Dice are rolling; send `Reveal` after the delay.
    AwaitingReveal(Duration),
    /// Dice are shown; send `Resolve` after the delay.
    AwaitingResolve(Duration),
    /// Round resolved; the player sends `NextRound`.
    AwaitingNextRound,
    /// A card fell; send `FinishCombat` after the delay.
    AwaitingCombatEnd(Duration),
}

impl HostSignal {
    /// The delay to schedule, for timed signals.
    #[must_use]
    pub fn delay(self) -> Option<Duration> {
        match self {
            HostSignal::AwaitingReveal(d)
            | HostSignal::AwaitingResolve(d)
            | HostSignal::AwaitingCombatEnd(d) => Some(d),
            HostSignal::AwaitingInput | HostSignal::AwaitingNextRound => None,
        }
    }

    /// The action the host sends when a timed signal's delay elapses.
    #[must_use]
    pub fn timer_action(self) -> Option<PlayerAction> {
        match self {
            HostSignal::AwaitingReveal(_) => Some(PlayerAction::Reveal),
            HostSignal::AwaitingResolve(_) => Some(PlayerAction::Resolve),
            HostSignal::AwaitingCombatEnd(_) => Some(PlayerAction::FinishCombat),
            HostSignal::AwaitingInput | HostSignal::AwaitingNextRound => None,
        }
    }
}
