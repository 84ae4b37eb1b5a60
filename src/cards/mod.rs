//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardTemplate`: Static card data (rarity, HP, dice modifiers)
//! - `CardInstance`: Runtime card state (current HP, death latch, position)
//! - `EnemyInstance`: A card instance flagged as boss or not
//! - `CardCatalog`: Ordered template lookup

pub mod definition;
pub mod instance;
pub mod catalog;

pub use definition::{CardId, CardTemplate, Rarity};
pub use instance::{CardInstance, EnemyInstance, Position};
pub use catalog::CardCatalog;
