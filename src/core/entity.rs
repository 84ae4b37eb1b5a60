//! Card instance identification.
//!
//! Every card that enters play during a run (deck cards, reward offers,
//! enemies) gets a unique `EntityId`. Template ids (`CardId`) can repeat
//! across instances; entity ids never do within a run.
//!
//! ## Usage
//!
//! ```
//! use dice_duel::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::new();
//! let first = alloc.next_id();
//! let second = alloc.next_id();
//!
//! assert_eq!(first, EntityId(1));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for entity ids.
///
/// Ids start at 1. A run owns one allocator and never reuses ids, even
/// after the owning card leaves the deck.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator whose first id is `EntityId(1)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused id.
    pub fn next_id(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let ids: Vec<_> = (0..5).map(|_| alloc.next_id()).collect();

        assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3), EntityId(4), EntityId(5)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
