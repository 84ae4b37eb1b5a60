//! The player's deck.
//!
//! A `Deck` holds up to `deck_size` card instances (the roster) ordered by
//! position, plus the `fallen` cards retired from earlier fights.
//!
//! ## Invariants
//!
//! - Entity ids in the roster are unique.
//! - Assigned positions in the roster are unique and within `1..=deck_size`.
//! - The next fighter is always the lowest-position card that is alive.
//! - Death is latched: committing a card never clears `is_dead`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardInstance, Position};
use crate::core::entity::EntityId;
use crate::core::error::{GameError, GameResult};

/// Roster storage; decks hold five cards in a standard run.
pub type Roster = SmallVec<[CardInstance; 5]>;

/// Latch the death flag when HP has reached zero.
///
/// Idempotent, and never unsets an existing latch.
#[must_use]
pub fn mark_dead_if_needed(card: &CardInstance) -> CardInstance {
    if card.should_die() && !card.is_dead {
        card.marked_dead()
    } else {
        card.clone()
    }
}

/// Build a deck from exactly `deck_size` cards with distinct templates.
///
/// Positions are assigned `1..=deck_size` in the given order and every card
/// starts alive at full HP.
pub fn select_deck(chosen: Vec<CardInstance>, deck_size: usize) -> GameResult<Deck> {
    let mut templates: Vec<_> = chosen.iter().map(|c| c.card_id).collect();
    templates.sort_unstable();
    templates.dedup();

    let mut entities: Vec<_> = chosen.iter().map(|c| c.entity_id).collect();
    entities.sort_unstable();
    entities.dedup();

    if chosen.len() != deck_size || templates.len() != deck_size || entities.len() != deck_size {
        return Err(GameError::InvalidDeckSize {
            expected: deck_size,
            actual: templates.len().min(entities.len()),
        });
    }

    let cards = chosen
        .into_iter()
        .enumerate()
        .map(|(i, mut card)| {
            card.restore_full_hp();
            card.is_dead = false;
            card.at_position((i + 1) as u8)
        })
        .collect();

    Ok(Deck {
        cards,
        fallen: Vec::new(),
    })
}

/// The player's deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Roster,
    fallen: Vec<CardInstance>,
}

impl Deck {
    /// An empty deck (before deck selection).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a deck from an already-positioned roster.
    pub(crate) fn from_parts(mut cards: Roster, fallen: Vec<CardInstance>) -> Self {
        cards.sort_by_key(|c| slot_order(c.position));
        Self { cards, fallen }
    }

    /// Roster cards in position order, dead ones included.
    #[must_use]
    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    /// Cards retired from the roster after falling.
    #[must_use]
    pub fn fallen(&self) -> &[CardInstance] {
        &self.fallen
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.entity_id == entity)
    }

    /// Living roster cards in position order.
    pub fn alive_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter().filter(|c| c.is_alive())
    }

    /// Dead roster cards not yet retired.
    pub fn dead_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter().filter(|c| c.is_dead)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive_cards().count()
    }

    /// Every card lost this run: dead roster cards plus retired ones.
    #[must_use]
    pub fn dead_count(&self) -> usize {
        self.dead_cards().count() + self.fallen.len()
    }

    #[must_use]
    pub fn has_alive_cards(&self) -> bool {
        self.alive_cards().next().is_some()
    }

    #[must_use]
    pub fn has_dead_cards(&self) -> bool {
        self.dead_count() > 0
    }

    /// The alive card with the lowest position, if any.
    #[must_use]
    pub fn next_fighter(&self) -> Option<&CardInstance> {
        self.alive_cards().min_by_key(|c| slot_order(c.position))
    }

    /// Write a card's post-combat state back into the roster.
    ///
    /// HP is taken from `card`; the death latch is the union of both sides,
    /// so a dead roster entry stays dead. Position is kept from the roster.
    pub fn commit(&mut self, card: &CardInstance) -> GameResult<()> {
        let slot = self
            .cards
            .iter_mut()
            .find(|c| c.entity_id == card.entity_id)
            .ok_or(GameError::UnknownCard(card.entity_id))?;

        let card = mark_dead_if_needed(card);
        slot.current_hp = card.current_hp.min(slot.max_hp);
        slot.is_dead = slot.is_dead || card.is_dead;
        Ok(())
    }

    /// Positions are unique and contiguous from 1 for every roster card.
    #[must_use]
    pub fn positions_are_contiguous(&self) -> bool {
        let mut slots: Vec<_> = self.cards.iter().filter_map(|c| c.position.slot()).collect();
        if slots.len() != self.cards.len() {
            return false;
        }
        slots.sort_unstable();
        slots.iter().enumerate().all(|(i, &s)| usize::from(s) == i + 1)
    }
}

/// Sort key placing unassigned cards after every assigned slot.
fn slot_order(position: Position) -> u16 {
    position.slot().map_or(u16::MAX, u16::from)
}
