//! Dice-modified damage resolution.
//!
//! Pure functions: nothing here mutates its inputs.
//!
//! ## Formula
//!
//! For each side, `attack = die + attack_mod` and `defense = die + defense_mod`.
//! The defender's reduction is `min(defense * 0.1, 0.6)` and the damage dealt
//! is `max(1, round(attack * (1 - reduction)))`.
//!
//! - Damage is never below 1: there are no full blocks.
//! - Reduction caps at 60%.
//! - Negative totals are legal and flow through unchanged. A negative
//!   defense amplifies incoming damage.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::rng::RandomSource;

/// Maximum share of damage a defense total can absorb.
pub const MAX_REDUCTION: f64 = 0.6;

/// Reduction granted per point of defense.
pub const REDUCTION_PER_DEFENSE: f64 = 0.1;

/// The four dice of one round, each in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub player_attack: u8,
    pub player_defense: u8,
    pub enemy_attack: u8,
    pub enemy_defense: u8,
}

impl DiceRoll {
    #[must_use]
    pub const fn new(player_attack: u8, player_defense: u8, enemy_attack: u8, enemy_defense: u8) -> Self {
        Self {
            player_attack,
            player_defense,
            enemy_attack,
            enemy_defense,
        }
    }

    /// Roll four independent dice in player-attack, player-defense,
    /// enemy-attack, enemy-defense order.
    pub fn roll<R: RandomSource>(rng: &mut R) -> Self {
        Self {
            player_attack: rng.roll_die(),
            player_defense: rng.roll_die(),
            enemy_attack: rng.roll_die(),
            enemy_defense: rng.roll_die(),
        }
    }
}

/// Totals and damage for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatCalculation {
    pub player_attack: i32,
    pub player_defense: i32,
    pub enemy_attack: i32,
    pub enemy_defense: i32,
    pub damage_to_enemy: u32,
    pub damage_to_player: u32,
}

/// Cards after damage has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub updated_player: CardInstance,
    pub updated_enemy: CardInstance,
}

/// Which side won an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Enemy,
}

/// Damage an attack total deals through a defense total.
#[must_use]
pub fn damage_through(attack_total: i32, defense_total: i32) -> u32 {
    let reduction = (f64::from(defense_total) * REDUCTION_PER_DEFENSE).min(MAX_REDUCTION);
    let raw = f64::from(attack_total) * (1.0 - reduction);
    // Half-up rounding.
    let rounded = (raw + 0.5).floor();
    if rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}

/// Compute totals and damage for one round.
#[must_use]
pub fn resolve_round(dice: &DiceRoll, player: &CardInstance, enemy: &CardInstance) -> CombatCalculation {
    // Totals saturate so extreme modifiers cannot overflow.
    let player_attack = i32::from(dice.player_attack).saturating_add(player.attack_mod);
    let player_defense = i32::from(dice.player_defense).saturating_add(player.defense_mod);
    let enemy_attack = i32::from(dice.enemy_attack).saturating_add(enemy.attack_mod);
    let enemy_defense = i32::from(dice.enemy_defense).saturating_add(enemy.defense_mod);

    CombatCalculation {
        player_attack,
        player_defense,
        enemy_attack,
        enemy_defense,
        damage_to_enemy: damage_through(player_attack, enemy_defense),
        damage_to_player: damage_through(enemy_attack, player_defense),
    }
}

/// Apply a calculation to copies of both cards. HP clamps at 0.
#[must_use]
pub fn apply_damage(
    player: &CardInstance,
    enemy: &CardInstance,
    calculation: &CombatCalculation,
) -> DamageOutcome {
    DamageOutcome {
        updated_player: player.damaged(calculation.damage_to_player),
        updated_enemy: enemy.damaged(calculation.damage_to_enemy),
    }
}

/// Either side is out of HP.
#[must_use]
pub fn is_combat_finished(player: &CardInstance, enemy: &CardInstance) -> bool {
    player.current_hp == 0 || enemy.current_hp == 0
}

/// The winner, if combat is over. A double knockout goes to the player.
#[must_use]
pub fn winner(player: &CardInstance, enemy: &CardInstance) -> Option<Winner> {
    if enemy.current_hp == 0 {
        Some(Winner::Player)
    } else if player.current_hp == 0 {
        Some(Winner::Enemy)
    } else {
        None
    }
}
