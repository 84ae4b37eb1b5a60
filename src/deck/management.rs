//! Post-victory reward and deck management.
//!
//! After a won encounter the player is offered reward cards, picks one, and
//! arranges the resulting deck:
//!
//! - **Add**: fewer living cards than the deck holds. The reward joins the
//!   deck at the lowest free position.
//! - **Replace**: the deck is full of living cards. The player designates one
//!   card to remove; the reward takes over its position.
//!
//! Positions can then be rearranged with single swaps (see `PositionMap`).
//! Confirmation requires the reward, the replacement when one is needed, and
//! positions covering exactly `1..=final_count` over the surviving cards.
//!
//! Dead cards take no part: they hold no position and are retired from the
//! roster when the new deck is confirmed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::positions::PositionMap;
use super::roster::{Deck, Roster};
use crate::cards::{CardCatalog, CardInstance, Position};
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::{GameError, GameResult};
use crate::core::rng::RandomSource;

/// Draw `count` distinct catalog templates as full-HP reward instances.
pub fn draw_rewards<R: RandomSource>(
    catalog: &CardCatalog,
    count: usize,
    alloc: &mut EntityAllocator,
    rng: &mut R,
) -> Vec<CardInstance> {
    let mut templates: Vec<_> = catalog.iter().collect();
    rng.shuffle(&mut templates);
    templates
        .into_iter()
        .take(count)
        .map(|t| CardInstance::from_template(alloc.next_id(), t))
        .collect()
}

/// One deck-management session, from reward offer to confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManagement {
    deck: Deck,
    rewards: Vec<CardInstance>,
    selected_reward: Option<EntityId>,
    replacement: Option<EntityId>,
    positions: PositionMap,
    capacity: usize,
}

impl DeckManagement {
    /// Start a session over `deck` with the given reward offers.
    #[must_use]
    pub fn new(deck: Deck, rewards: Vec<CardInstance>, capacity: usize) -> Self {
        let mut session = Self {
            deck,
            rewards,
            selected_reward: None,
            replacement: None,
            positions: PositionMap::new(capacity as u8),
            capacity,
        };
        session.autofill_positions();
        session
    }

    /// The deck as it came out of combat.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn rewards(&self) -> &[CardInstance] {
        &self.rewards
    }

    #[must_use]
    pub fn selected_reward(&self) -> Option<&CardInstance> {
        self.selected_reward
            .and_then(|id| self.rewards.iter().find(|c| c.entity_id == id))
    }

    #[must_use]
    pub fn replacement(&self) -> Option<&CardInstance> {
        self.replacement.and_then(|id| self.deck.get(id))
    }

    #[must_use]
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Every deck slot is held by a living card.
    #[must_use]
    pub fn needs_replacement(&self) -> bool {
        self.deck.alive_count() >= self.capacity
    }

    /// Pick the reward card. Re-picking replaces the earlier choice.
    pub fn select_reward(&mut self, card: EntityId) -> GameResult<()> {
        if !self.rewards.iter().any(|c| c.entity_id == card) {
            return Err(GameError::UnknownCard(card));
        }
        debug!(%card, "selected reward");
        self.selected_reward = Some(card);
        self.autofill_positions();
        Ok(())
    }

    /// Designate the living deck card the reward will replace.
    pub fn select_replacement(&mut self, card: EntityId) -> GameResult<()> {
        if !self.needs_replacement() {
            return Err(GameError::ReplacementNotAllowed);
        }
        if !self.deck.get(card).is_some_and(CardInstance::is_alive) {
            return Err(GameError::UnknownCard(card));
        }
        debug!(%card, "selected card to replace");
        self.replacement = Some(card);
        self.autofill_positions();
        Ok(())
    }

    /// Move a participating card to `position`, swapping with any occupant.
    pub fn assign_position(&mut self, card: EntityId, position: u8) -> GameResult<()> {
        if !self.participants().contains(&card) {
            return Err(GameError::UnknownCard(card));
        }
        self.positions.assign(card, position)
    }

    /// The card currently placed at `position`.
    #[must_use]
    pub fn card_at_position(&self, position: u8) -> Option<&CardInstance> {
        let id = self.positions.card_at(position)?;
        self.deck
            .get(id)
            .or_else(|| self.rewards.iter().find(|c| c.entity_id == id))
    }

    #[must_use]
    pub fn is_position_taken(&self, position: u8) -> bool {
        self.positions.is_taken(position)
    }

    /// Size of the deck after confirmation.
    #[must_use]
    pub fn final_count(&self) -> usize {
        let alive = self.deck.alive_count();
        if self.needs_replacement() {
            alive
        } else {
            alive + 1
        }
    }

    /// All steps are satisfied.
    #[must_use]
    pub fn is_ready_to_confirm(&self) -> bool {
        if self.selected_reward.is_none() {
            return false;
        }
        if self.needs_replacement() && self.replacement.is_none() {
            return false;
        }
        let participants = self.participants();
        participants.len() == self.final_count() && self.positions.covers_exactly(&participants)
    }

    /// Build the updated deck.
    pub fn confirm(&self) -> GameResult<Deck> {
        if !self.is_ready_to_confirm() {
            return Err(GameError::IncompleteDeckManagement);
        }
        let reward = self.selected_reward().ok_or(GameError::IncompleteDeckManagement)?;

        let mut roster = Roster::new();
        let mut fallen = self.deck.fallen().to_vec();

        for card in self.deck.cards() {
            if Some(card.entity_id) == self.replacement {
                continue;
            }
            if card.is_dead {
                let mut retired = card.clone();
                retired.position = Position::Unassigned;
                fallen.push(retired);
                continue;
            }
            let mut kept = card.clone();
            kept.position = self.slot_of(card.entity_id)?;
            roster.push(kept);
        }

        let mut incoming = reward.clone();
        incoming.restore_full_hp();
        incoming.is_dead = false;
        incoming.position = self.slot_of(incoming.entity_id)?;
        roster.push(incoming);

        debug!(
            reward = %reward.name,
            replaced = ?self.replacement,
            size = roster.len(),
            "confirmed deck management"
        );

        Ok(Deck::from_parts(roster, fallen))
    }

    /// Living cards that stay, plus the chosen reward.
    fn participants(&self) -> Vec<EntityId> {
        self.deck
            .alive_cards()
            .map(|c| c.entity_id)
            .filter(|&id| Some(id) != self.replacement)
            .chain(self.selected_reward)
            .collect()
    }

    fn slot_of(&self, card: EntityId) -> GameResult<Position> {
        self.positions
            .position_of(card)
            .map(Position::Assigned)
            .ok_or(GameError::IncompleteDeckManagement)
    }

    /// Reset positions from the deck, then place the reward: at the
    /// replaced card's slot, or at the lowest free slot.
    fn autofill_positions(&mut self) {
        self.positions.clear();

        let mut replaced_slot = None;
        for card in self.deck.alive_cards() {
            let Some(slot) = card.position.slot() else {
                continue;
            };
            if Some(card.entity_id) == self.replacement {
                replaced_slot = Some(slot);
            } else {
                // Deck positions are already unique and in range.
                let _ = self.positions.assign(card.entity_id, slot);
            }
        }

        let Some(reward) = self.selected_reward else {
            return;
        };
        match replaced_slot {
            Some(slot) => {
                let _ = self.positions.assign(reward, slot);
            }
            None => {
                self.positions.assign_lowest_free(reward);
            }
        }
    }
}
