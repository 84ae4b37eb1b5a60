//! Read-only views for renderers.
//!
//! A `RunSnapshot` is a detached, serializable copy of the run. Renderers
//! and remote hosts read it; nothing they do to it affects the run.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::HostSignal;
use super::history::RunEvent;
use super::state::RunState;
use crate::cards::{CardInstance, EnemyInstance};
use crate::combat::{CombatCalculation, CombatRound, DiceRoll, RoundStage};
use crate::core::entity::EntityId;
use crate::deck::{DeckManagement, DeckSelection};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub state: RunState,
    pub total_encounters: u32,
    pub signal: HostSignal,
    pub selection: Option<DeckSelection>,
    pub combat: Option<CombatView>,
    pub reward: Option<RewardView>,
    pub history: Vector<RunEvent>,
}

/// The current encounter as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatView {
    pub round: u32,
    pub stage: RoundStage,
    /// Hidden while the dice are still rolling.
    pub dice: Option<DiceRoll>,
    pub combat_result: Option<CombatCalculation>,
    pub round_resolved: bool,
    pub combat_finished: bool,
    pub player: CardInstance,
    pub enemy: EnemyInstance,
}

impl From<&CombatRound> for CombatView {
    fn from(combat: &CombatRound) -> Self {
        let dice = match combat.stage() {
            RoundStage::Rolling => None,
            _ => Some(combat.dice()),
        };
        Self {
            round: combat.round(),
            stage: combat.stage(),
            dice,
            combat_result: combat.combat_result(),
            round_resolved: combat.round_resolved(),
            combat_finished: combat.combat_finished(),
            player: combat.player().clone(),
            enemy: combat.enemy().clone(),
        }
    }
}

/// The reward screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardView {
    pub rewards: Vec<CardInstance>,
    pub selected_reward: Option<EntityId>,
    pub replacement: Option<EntityId>,
    pub needs_replacement: bool,
    pub final_count: usize,
    /// Occupied slots in ascending order.
    pub positions: Vec<(u8, EntityId)>,
    pub ready_to_confirm: bool,
}

impl From<&DeckManagement> for RewardView {
    fn from(session: &DeckManagement) -> Self {
        let positions = session.positions();
        Self {
            rewards: session.rewards().to_vec(),
            selected_reward: session.selected_reward().map(|c| c.entity_id),
            replacement: session.replacement().map(|c| c.entity_id),
            needs_replacement: session.needs_replacement(),
            final_count: session.final_count(),
            positions: (1..=positions.capacity())
                .filter_map(|slot| positions.card_at(slot).map(|id| (slot, id)))
                .collect(),
            ready_to_confirm: session.is_ready_to_confirm(),
        }
    }
}
