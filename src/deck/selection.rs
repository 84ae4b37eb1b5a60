//! Starting deck selection.
//!
//! The player is offered a pool of templates and toggles cards in and out
//! of their pick. Selection order becomes combat order once confirmed.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardTemplate};
use crate::core::error::{GameError, GameResult};

/// In-progress pick of starting cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSelection {
    available: Vec<CardTemplate>,
    selected: Vec<CardId>,
    deck_size: usize,
}

impl DeckSelection {
    /// Offer the first `pool_size` catalog templates.
    #[must_use]
    pub fn from_catalog(catalog: &CardCatalog, pool_size: usize, deck_size: usize) -> Self {
        Self {
            available: catalog.iter().take(pool_size).cloned().collect(),
            selected: Vec::new(),
            deck_size,
        }
    }

    /// Templates on offer.
    #[must_use]
    pub fn available(&self) -> &[CardTemplate] {
        &self.available
    }

    /// Picked templates, in pick order.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, card: CardId) -> bool {
        self.selected.contains(&card)
    }

    /// Select the card, or deselect it if already picked.
    ///
    /// Returns whether the card is selected afterwards.
    pub fn toggle(&mut self, card: CardId) -> GameResult<bool> {
        if let Some(i) = self.selected.iter().position(|&c| c == card) {
            self.selected.remove(i);
            return Ok(false);
        }

        if !self.available.iter().any(|t| t.id == card) {
            return Err(GameError::NotFound(card));
        }
        if self.selected.len() >= self.deck_size {
            return Err(GameError::SelectionFull);
        }

        self.selected.push(card);
        Ok(true)
    }

    /// Exactly a full deck is picked.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.selected.len() == self.deck_size
    }
}
