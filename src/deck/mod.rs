//! Deck lifecycle: selection, death, fighter order, and rewards.
//!
//! ## Key Types
//!
//! - `DeckSelection`: toggle-based pick of the starting cards
//! - `Deck`: position-ordered roster plus retired cards
//! - `PositionMap`: card ↔ slot bijection with single-swap conflicts
//! - `DeckManagement`: reward pick, replacement, and reordering session

pub mod roster;
pub mod selection;
pub mod positions;
pub mod management;

pub use roster::{mark_dead_if_needed, select_deck, Deck, Roster};
pub use selection::DeckSelection;
pub use positions::PositionMap;
pub use management::{draw_rewards, DeckManagement};
