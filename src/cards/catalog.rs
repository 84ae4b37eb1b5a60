//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template a run can draw from:
//! starter picks, reward offers, and enemies. It keeps insertion order,
//! which matters for the starter pool ("the first N templates").

use rustc_hash::FxHashMap;

use super::definition::{CardId, CardTemplate, Rarity};
use crate::core::error::{GameError, GameResult};

/// Ordered table of card templates.
///
/// ## Example
///
/// ```
/// use dice_duel::cards::{CardCatalog, CardId, CardTemplate, Rarity};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardTemplate::new(CardId::new(1), "Recruit", Rarity::Common, 6));
///
/// let found = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Recruit");
/// assert!(catalog.get(CardId::new(99)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardTemplate>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten-card table used by a standard run.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let cards = [
            (1, "Novice Warrior", Rarity::Common, 10, 0, 0, "A plain fighter"),
            (2, "Squire", Rarity::Common, 12, 0, 1, "Defense +1"),
            (3, "Duelist", Rarity::Common, 8, 1, 0, "Attack +1"),
            (4, "Paladin", Rarity::Rare, 15, 0, 2, "Tank - Defense +2"),
            (5, "Berserker", Rarity::Rare, 8, 2, -1, "Attack +2, Defense -1"),
            (6, "Assassin", Rarity::Rare, 7, 3, 0, "Killing blow - Attack +3"),
            (7, "Royal Guard", Rarity::Uncommon, 14, 1, 1, "Balanced - +1/+1"),
            (8, "Black Knight", Rarity::Epic, 12, 2, 2, "Mighty - +2/+2"),
            (9, "Recruit", Rarity::Common, 6, 0, 0, "Frail but quick"),
            (10, "Champion", Rarity::Epic, 20, 1, 1, "The hero - +1/+1, 20 HP"),
        ];

        for (id, name, rarity, hp, atk, def, desc) in cards {
            catalog.register(
                CardTemplate::new(CardId::new(id), name, rarity, hp)
                    .with_mods(atk, def)
                    .with_description(desc),
            );
        }

        catalog
    }

    /// Register a card template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register(&mut self, card: CardTemplate) {
        if self.index.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
    }

    /// Look up a template by ID.
    pub fn get(&self, id: CardId) -> GameResult<&CardTemplate> {
        self.index
            .get(&id)
            .map(|&i| &self.cards[i])
            .ok_or(GameError::NotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All templates in registration order.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.cards
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter()
    }

    /// Templates whose rarity is in `rarities`, in catalog order.
    #[must_use]
    pub fn with_rarities(&self, rarities: &[Rarity]) -> Vec<&CardTemplate> {
        self.cards
            .iter()
            .filter(|c| rarities.contains(&c.rarity))
            .collect()
    }
}
