//! Card ↔ position bookkeeping for deck management.
//!
//! `PositionMap` is a partial bijection between entity ids and slots
//! `1..=capacity`: each card holds at most one slot and each slot holds at
//! most one card.
//!
//! ## Conflict rule
//!
//! Assigning a card to an occupied slot performs a single swap: the
//! occupant moves to the assigned card's previous slot. If the assigned
//! card had no slot yet, the occupant is left unassigned. Swaps never
//! cascade.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::error::{GameError, GameResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMap {
    capacity: u8,
    by_card: FxHashMap<EntityId, u8>,
}

impl PositionMap {
    /// Empty map over slots `1..=capacity`.
    #[must_use]
    pub fn new(capacity: u8) -> Self {
        Self {
            capacity,
            by_card: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Number of cards holding a slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_card.clear();
    }

    #[must_use]
    pub fn position_of(&self, card: EntityId) -> Option<u8> {
        self.by_card.get(&card).copied()
    }

    #[must_use]
    pub fn card_at(&self, position: u8) -> Option<EntityId> {
        self.by_card
            .iter()
            .find_map(|(&card, &pos)| (pos == position).then_some(card))
    }

    #[must_use]
    pub fn is_taken(&self, position: u8) -> bool {
        self.card_at(position).is_some()
    }

    /// Place `card` at `position`, swapping out any occupant.
    pub fn assign(&mut self, card: EntityId, position: u8) -> GameResult<()> {
        if position == 0 || position > self.capacity {
            return Err(GameError::InvalidPosition(position));
        }

        let previous = self.position_of(card);
        if let Some(occupant) = self.card_at(position).filter(|&o| o != card) {
            match previous {
                Some(old) => {
                    self.by_card.insert(occupant, old);
                }
                None => {
                    self.by_card.remove(&occupant);
                }
            }
        }

        self.by_card.insert(card, position);
        Ok(())
    }

    /// Place `card` at the lowest free slot. Returns the slot, or `None`
    /// when every slot is taken.
    pub fn assign_lowest_free(&mut self, card: EntityId) -> Option<u8> {
        let slot = (1..=self.capacity).find(|&p| !self.is_taken(p))?;
        self.by_card.insert(card, slot);
        Some(slot)
    }

    /// Every card in `cards` holds a slot, nobody else does, and the slots
    /// are exactly `1..=cards.len()`.
    #[must_use]
    pub fn covers_exactly(&self, cards: &[EntityId]) -> bool {
        if self.by_card.len() != cards.len() {
            return false;
        }
        let mut slots = Vec::with_capacity(cards.len());
        for card in cards {
            match self.position_of(*card) {
                Some(slot) => slots.push(slot),
                None => return false,
            }
        }
        slots.sort_unstable();
        slots.iter().enumerate().all(|(i, &s)| usize::from(s) == i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_lookup() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 3).unwrap();

        assert_eq!(map.position_of(EntityId(1)), Some(3));
        assert_eq!(map.card_at(3), Some(EntityId(1)));
        assert!(map.is_taken(3));
        assert!(!map.is_taken(1));
    }

    #[test]
    fn test_out_of_range() {
        let mut map = PositionMap::new(5);
        assert_eq!(map.assign(EntityId(1), 0), Err(GameError::InvalidPosition(0)));
        assert_eq!(map.assign(EntityId(1), 6), Err(GameError::InvalidPosition(6)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_collision_swaps() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 1).unwrap();
        map.assign(EntityId(2), 2).unwrap();

        map.assign(EntityId(1), 2).unwrap();

        assert_eq!(map.position_of(EntityId(1)), Some(2));
        assert_eq!(map.position_of(EntityId(2)), Some(1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_collision_without_prior_slot_unassigns() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 1).unwrap();

        map.assign(EntityId(2), 1).unwrap();

        assert_eq!(map.position_of(EntityId(2)), Some(1));
        assert_eq!(map.position_of(EntityId(1)), None);
    }

    #[test]
    fn test_swap_does_not_cascade() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 1).unwrap();
        map.assign(EntityId(2), 2).unwrap();
        map.assign(EntityId(3), 3).unwrap();

        map.assign(EntityId(3), 1).unwrap();

        assert_eq!(map.position_of(EntityId(3)), Some(1));
        assert_eq!(map.position_of(EntityId(1)), Some(3));
        assert_eq!(map.position_of(EntityId(2)), Some(2));
    }

    #[test]
    fn test_reassign_same_slot_is_noop() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 4).unwrap();
        map.assign(EntityId(1), 4).unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.position_of(EntityId(1)), Some(4));
    }

    #[test]
    fn test_lowest_free() {
        let mut map = PositionMap::new(3);
        map.assign(EntityId(1), 1).unwrap();
        map.assign(EntityId(2), 3).unwrap();

        assert_eq!(map.assign_lowest_free(EntityId(3)), Some(2));
        assert_eq!(map.assign_lowest_free(EntityId(4)), None);
    }

    #[test]
    fn test_covers_exactly() {
        let mut map = PositionMap::new(5);
        map.assign(EntityId(1), 1).unwrap();
        map.assign(EntityId(2), 3).unwrap();

        let cards = [EntityId(1), EntityId(2)];
        assert!(!map.covers_exactly(&cards)); // gap at 2

        map.assign(EntityId(2), 2).unwrap();
        assert!(map.covers_exactly(&cards));
        assert!(!map.covers_exactly(&[EntityId(1)]));
        assert!(!map.covers_exactly(&[EntityId(1), EntityId(9)]));
    }
}
