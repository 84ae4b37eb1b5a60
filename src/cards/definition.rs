//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: its name,
//! rarity, base HP and dice modifiers. For example, "Paladin" always has
//! 15 HP and +2 defense - these are part of the template.
//!
//! Run-specific data (current HP, death, deck position) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card template.
///
/// This identifies the "kind" of card (e.g., "Paladin"), not a specific
/// instance in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card rarity. Only affects which encounters a template can appear in
/// as an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    /// All rarities, lowest first.
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare, Rarity::Epic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use dice_duel::cards::{CardId, CardTemplate, Rarity};
///
/// let squire = CardTemplate::new(CardId::new(2), "Squire", Rarity::Common, 12)
///     .with_mods(0, 1)
///     .with_description("Defense +1");
///
/// assert_eq!(squire.defense_mod, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier, positive.
    pub id: CardId,

    /// Display name.
    pub name: String,

    pub rarity: Rarity,

    /// Base hit points, positive.
    pub max_hp: u32,

    /// Added to the attack die.
    pub attack_mod: i32,

    /// Added to the defense die.
    pub defense_mod: i32,

    /// Flavor text.
    pub description: String,
}

impl CardTemplate {
    /// Create a template with zero modifiers and no description.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, rarity: Rarity, max_hp: u32) -> Self {
        assert!(id.raw() > 0, "Card ids must be positive");
        assert!(max_hp > 0, "Cards must have positive max HP");

        Self {
            id,
            name: name.into(),
            rarity,
            max_hp,
            attack_mod: 0,
            defense_mod: 0,
            description: String::new(),
        }
    }

    /// Set attack and defense modifiers.
    #[must_use]
    pub fn with_mods(mut self, attack_mod: i32, defense_mod: i32) -> Self {
        self.attack_mod = attack_mod;
        self.defense_mod = defense_mod;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
