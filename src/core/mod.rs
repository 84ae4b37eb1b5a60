//! Core engine types: entity ids, RNG, configuration, errors.
//!
//! These are the building blocks shared by every other module. Nothing here
//! knows about phases or combat rules.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use rng::{GameRng, RandomSource, ScriptedRng, DIE_FACES};
pub use config::{Pacing, RunConfig};
pub use error::{GameError, GameResult};
