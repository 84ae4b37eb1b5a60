//! # dice-duel
//!
//! Core of a single-player roguelike card battler. The player picks a deck
//! of five cards and fights a run of escalating encounters, one card at a
//! time. Each round both sides roll attack and defense dice; defense reduces
//! incoming damage by a capped percentage. Won encounters grant a reward
//! card and a chance to reorder the deck. The last encounter is a boss.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven Pacing**: The core owns no clock and spawns nothing.
//!    It reports what it is waiting for (`HostSignal`) and the host calls
//!    back when it is ready.
//!
//! 2. **Injected Randomness**: Every random draw goes through a
//!    `RandomSource`. Seeded runs replay exactly; scripted sources make
//!    dice deterministic in tests.
//!
//! 3. **Identity Over Names**: Cards are tracked by `EntityId`. Two copies
//!    of the same template never collide.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, errors
//! - `cards`: Card templates, instances, and the catalog
//! - `enemy`: Encounter scaling and enemy generation
//! - `combat`: Damage resolution and the round controller
//! - `deck`: Deck selection, death, fighter order, reward management
//! - `run`: The run state machine, host signals, and snapshots

pub mod core;
pub mod cards;
pub mod enemy;
pub mod combat;
pub mod deck;
pub mod run;

// Re-export commonly used types
pub use crate::core::{
    EntityId, EntityAllocator,
    GameRng, RandomSource, ScriptedRng,
    Pacing, RunConfig,
    GameError, GameResult,
};

pub use crate::cards::{
    CardId, CardTemplate, Rarity, CardInstance, EnemyInstance, Position, CardCatalog,
};

pub use crate::enemy::{generate_enemy, EncounterScaling};

pub use crate::combat::{
    resolve_round, apply_damage, is_combat_finished,
    DiceRoll, CombatCalculation, CombatRound, CombatOutcome, RoundResolution, RoundStage,
};

pub use crate::deck::{
    select_deck, mark_dead_if_needed, draw_rewards,
    Deck, DeckSelection, DeckManagement, PositionMap,
};

pub use crate::run::{
    Run, RunState, RunSnapshot, RunEvent, RunOutcome, Phase,
    PlayerAction, HostSignal, CombatRoute, route_after_combat,
};
