//! Combat: the pure damage resolver and the per-encounter round controller.
//!
//! ## Key Types
//!
//! - `DiceRoll`: four d6 results for one round
//! - `CombatCalculation`: totals and damage derived from dice and modifiers
//! - `CombatRound`: stage machine for one encounter
//! - `CombatOutcome`: what the run learns when an encounter ends

pub mod resolver;
pub mod round;

pub use resolver::{
    apply_damage, damage_through, is_combat_finished, resolve_round, winner, CombatCalculation,
    DamageOutcome, DiceRoll, Winner,
};
pub use round::{CombatOutcome, CombatRound, RoundResolution, RoundStage};
