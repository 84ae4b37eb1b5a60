//! Card instances - runtime card state.
//!
//! `CardInstance` copies a template's stats by value and adds the state a
//! card accumulates during a run: current HP, the death latch, and its
//! combat-order position in the deck.
//!
//! ## Death latch
//!
//! `is_dead` only ever goes from `false` to `true`. Nothing in the crate
//! clears it; a fallen card leaves the roster instead of being revived.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate, Rarity};
use crate::core::entity::EntityId;

/// Combat-order rank of a card within a deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Not placed in a deck yet (reward offers, enemies).
    #[default]
    Unassigned,
    /// 1-based slot; lower slots fight first.
    Assigned(u8),
}

impl Position {
    /// The slot number, if assigned.
    #[must_use]
    pub const fn slot(self) -> Option<u8> {
        match self {
            Position::Unassigned => None,
            Position::Assigned(slot) => Some(slot),
        }
    }

    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Position::Assigned(_))
    }
}

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this instance within the run.
    pub entity_id: EntityId,

    /// Template this instance was created from.
    pub card_id: CardId,

    pub name: String,
    pub rarity: Rarity,
    pub max_hp: u32,
    pub attack_mod: i32,
    pub defense_mod: i32,
    pub description: String,

    /// Always within `0..=max_hp`.
    pub current_hp: u32,

    /// One-way death latch.
    #[serde(default)]
    pub is_dead: bool,

    #[serde(default)]
    pub position: Position,
}

impl CardInstance {
    /// Instantiate a template at full HP, alive, unpositioned.
    #[must_use]
    pub fn from_template(entity_id: EntityId, template: &CardTemplate) -> Self {
        Self {
            entity_id,
            card_id: template.id,
            name: template.name.clone(),
            rarity: template.rarity,
            max_hp: template.max_hp,
            attack_mod: template.attack_mod,
            defense_mod: template.defense_mod,
            description: template.description.clone(),
            current_hp: template.max_hp,
            is_dead: false,
            position: Position::Unassigned,
        }
    }

    /// Set the deck position (builder pattern).
    #[must_use]
    pub fn at_position(mut self, slot: u8) -> Self {
        self.position = Position::Assigned(slot);
        self
    }

    /// The card has not fallen.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// HP has reached zero and the latch should be committed.
    #[must_use]
    pub fn should_die(&self) -> bool {
        self.current_hp == 0
    }

    /// Copy of this card with `damage` subtracted, clamped at 0.
    #[must_use]
    pub fn damaged(&self, damage: u32) -> Self {
        Self {
            current_hp: self.current_hp.saturating_sub(damage),
            ..self.clone()
        }
    }

    /// Copy of this card with the death latch set.
    #[must_use]
    pub fn marked_dead(&self) -> Self {
        Self {
            is_dead: true,
            ..self.clone()
        }
    }

    /// Restore HP to `max_hp`. The death latch is untouched.
    pub fn restore_full_hp(&mut self) {
        self.current_hp = self.max_hp;
    }
}

/// An enemy: a card instance plus a boss flag.
///
/// Generated fresh for every encounter and dropped when it ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub card: CardInstance,
    pub is_boss: bool,
}

impl EnemyInstance {
    #[must_use]
    pub fn new(card: CardInstance, is_boss: bool) -> Self {
        Self { card, is_boss }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CardTemplate {
        CardTemplate::new(CardId::new(3), "Duelist", Rarity::Common, 8).with_mods(1, 0)
    }

    #[test]
    fn test_from_template() {
        let card = CardInstance::from_template(EntityId(7), &template());

        assert_eq!(card.entity_id, EntityId(7));
        assert_eq!(card.card_id, CardId::new(3));
        assert_eq!(card.current_hp, 8);
        assert_eq!(card.attack_mod, 1);
        assert!(card.is_alive());
        assert_eq!(card.position, Position::Unassigned);
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let card = CardInstance::from_template(EntityId(1), &template());

        let hurt = card.damaged(3);
        assert_eq!(hurt.current_hp, 5);
        assert_eq!(card.current_hp, 8); // Source untouched

        let dead = hurt.damaged(100);
        assert_eq!(dead.current_hp, 0);
        assert!(dead.should_die());
        assert!(!dead.is_dead); // Latch is committed separately
    }

    #[test]
    fn test_restore_keeps_latch() {
        let mut card = CardInstance::from_template(EntityId(1), &template())
            .damaged(8)
            .marked_dead();

        card.restore_full_hp();
        assert_eq!(card.current_hp, 8);
        assert!(card.is_dead);
    }

    #[test]
    fn test_position() {
        assert_eq!(Position::default().slot(), None);
        assert_eq!(Position::Assigned(3).slot(), Some(3));
        assert!(Position::Assigned(1).is_assigned());

        let card = CardInstance::from_template(EntityId(1), &template()).at_position(2);
        assert_eq!(card.position, Position::Assigned(2));
    }

    #[test]
    fn test_card_instance_serialization() {
        let card = CardInstance::from_template(EntityId(10), &template())
            .at_position(4)
            .damaged(2);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
