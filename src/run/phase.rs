//! Run phases and the final result.

use serde::{Deserialize, Serialize};

/// Top-level phase of a run.
///
/// ```text
/// Menu -> DeckSelection -> Combat <-> Reward
///                            \-> GameOver -> Menu
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Menu,
    DeckSelection,
    Combat,
    Reward,
    GameOver,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::DeckSelection => "deck_selection",
            Phase::Combat => "combat",
            Phase::Reward => "reward",
            Phase::GameOver => "gameover",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finished run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every encounter was cleared.
    Victory,
    Defeat,
}

impl RunOutcome {
    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, RunOutcome::Victory)
    }
}
