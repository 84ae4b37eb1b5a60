//! Run configuration.
//!
//! `RunConfig` fixes the shape of a run: how many encounters it takes to
//! win, how many cards a deck holds, how many rewards are offered, and the
//! pacing hints handed to the host between combat stages.
//!
//! The core never sleeps on `Pacing` values. They are surfaced through
//! `HostSignal` so the host can schedule its own timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays the host should wait before advancing each combat stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Dice roll animation, before `reveal()`.
    pub reveal_delay: Duration,

    /// Pause on revealed dice, before `resolve()`.
    pub resolve_delay: Duration,

    /// Pause on the final blow, before reporting the combat end.
    pub combat_end_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(2000),
            resolve_delay: Duration::from_millis(1000),
            combat_end_delay: Duration::from_millis(2000),
        }
    }
}

impl Pacing {
    /// Zero delays everywhere (headless hosts, simulations).
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reveal_delay: Duration::ZERO,
            resolve_delay: Duration::ZERO,
            combat_end_delay: Duration::ZERO,
        }
    }
}

/// Complete run configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Encounters to clear for an overall win.
    pub total_encounters: u32,

    /// Cards in a confirmed deck, and the highest position.
    pub deck_size: usize,

    /// Reward cards offered after each won encounter.
    pub reward_choices: usize,

    /// Number of catalog templates (in catalog order) offered at deck selection.
    pub starter_pool: usize,

    /// Host pacing hints.
    pub pacing: Pacing,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_encounters: 5,
            deck_size: 5,
            reward_choices: 3,
            starter_pool: 5,
            pacing: Pacing::default(),
        }
    }
}

impl RunConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of encounters in a run.
    #[must_use]
    pub fn with_total_encounters(mut self, total: u32) -> Self {
        assert!(total > 0, "A run needs at least 1 encounter");
        self.total_encounters = total;
        self
    }

    /// Set the number of reward cards offered.
    #[must_use]
    pub fn with_reward_choices(mut self, count: usize) -> Self {
        self.reward_choices = count;
        self
    }

    /// Set how many catalog templates are offered at deck selection.
    #[must_use]
    pub fn with_starter_pool(mut self, count: usize) -> Self {
        self.starter_pool = count;
        self
    }

    /// Set host pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();

        assert_eq!(config.total_encounters, 5);
        assert_eq!(config.deck_size, 5);
        assert_eq!(config.reward_choices, 3);
        assert_eq!(config.starter_pool, 5);
        assert_eq!(config.pacing.reveal_delay, Duration::from_millis(2000));
        assert_eq!(config.pacing.resolve_delay, Duration::from_millis(1000));
        assert_eq!(config.pacing.combat_end_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_builder() {
        let config = RunConfig::new()
            .with_total_encounters(3)
            .with_reward_choices(2)
            .with_starter_pool(10)
            .with_pacing(Pacing::instant());

        assert_eq!(config.total_encounters, 3);
        assert_eq!(config.reward_choices, 2);
        assert_eq!(config.starter_pool, 10);
        assert_eq!(config.pacing.reveal_delay, Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "at least 1 encounter")]
    fn test_zero_encounters() {
        let _ = RunConfig::new().with_total_encounters(0);
    }

    #[test]
    fn test_serde() {
        let config = RunConfig::new().with_pacing(Pacing::instant());
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }
}
