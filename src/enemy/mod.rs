//! Enemy generation, scaled by encounter index.

pub mod generator;

pub use generator::{generate_enemy, EncounterScaling};
