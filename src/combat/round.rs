//! Per-encounter round controller.
//!
//! ```text
//! Rolling --reveal()--> Revealed --resolve()--> Resolved --next_round()--> Rolling
//!                                          \--> Finished
//! ```
//!
//! The controller owns no clock. The host waits whatever it likes between
//! stages and then calls the matching advance method; calling one out of
//! order is an `InvalidRoundAdvance` error. Because rounds only restart
//! from `Resolved`, two rounds can never overlap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::resolver::{apply_damage, is_combat_finished, resolve_round, CombatCalculation, DiceRoll};
use crate::cards::{CardInstance, EnemyInstance};
use crate::core::error::{GameError, GameResult};
use crate::core::rng::RandomSource;

/// Stage of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStage {
    /// Dice are rolled but hidden.
    Rolling,
    /// Dice are visible; damage is computable but not committed.
    Revealed,
    /// Damage committed, both cards standing.
    Resolved,
    /// A card fell. Terminal for this encounter.
    Finished,
}

/// Result reported to the run when an encounter ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    /// The enemy fell. Checked first, so a double knockout is a victory.
    pub victory: bool,
    /// The player's card as it left the fight.
    pub player_card: CardInstance,
}

/// What `resolve()` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundResolution {
    /// Both cards still stand; call `next_round()` to continue.
    Continue(CombatCalculation),
    /// The encounter is over.
    Finished(CombatCalculation, CombatOutcome),
}

/// Sequences dice, reveal, and damage for one encounter.
#[derive(Clone, Debug)]
pub struct CombatRound {
    round: u32,
    stage: RoundStage,
    dice: DiceRoll,
    player: CardInstance,
    enemy: EnemyInstance,
    outcome: Option<CombatOutcome>,
}

impl CombatRound {
    /// Start an encounter: roll round 1's dice.
    pub fn new<R: RandomSource>(player: CardInstance, enemy: EnemyInstance, rng: &mut R) -> Self {
        let dice = DiceRoll::roll(rng);
        debug!(round = 1, ?dice, "rolled dice");

        Self {
            round: 1,
            stage: RoundStage::Rolling,
            dice,
            player,
            enemy,
            outcome: None,
        }
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn stage(&self) -> RoundStage {
        self.stage
    }

    #[must_use]
    pub fn dice(&self) -> DiceRoll {
        self.dice
    }

    /// Player card with all committed damage.
    #[must_use]
    pub fn player(&self) -> &CardInstance {
        &self.player
    }

    /// Enemy with all committed damage.
    #[must_use]
    pub fn enemy(&self) -> &EnemyInstance {
        &self.enemy
    }

    /// Damage has been committed for the current round.
    #[must_use]
    pub fn round_resolved(&self) -> bool {
        matches!(self.stage, RoundStage::Resolved | RoundStage::Finished)
    }

    #[must_use]
    pub fn combat_finished(&self) -> bool {
        self.stage == RoundStage::Finished
    }

    /// The current round's calculation, once the dice are revealed.
    ///
    /// Modifiers never change mid-encounter, so the value is the same before
    /// and after damage is committed.
    #[must_use]
    pub fn combat_result(&self) -> Option<CombatCalculation> {
        match self.stage {
            RoundStage::Rolling => None,
            _ => Some(resolve_round(&self.dice, &self.player, &self.enemy.card)),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&CombatOutcome> {
        self.outcome.as_ref()
    }

    /// Show the rolled dice.
    pub fn reveal(&mut self) -> GameResult<()> {
        self.expect_stage(RoundStage::Rolling, "reveal")?;
        self.stage = RoundStage::Revealed;
        Ok(())
    }

    /// Commit the revealed round's damage.
    pub fn resolve(&mut self) -> GameResult<RoundResolution> {
        self.expect_stage(RoundStage::Revealed, "resolve")?;

        let calculation = resolve_round(&self.dice, &self.player, &self.enemy.card);
        let damage = apply_damage(&self.player, &self.enemy.card, &calculation);
        self.player = damage.updated_player;
        self.enemy.card = damage.updated_enemy;

        debug!(
            round = self.round,
            to_enemy = calculation.damage_to_enemy,
            to_player = calculation.damage_to_player,
            player_hp = self.player.current_hp,
            enemy_hp = self.enemy.card.current_hp,
            "resolved round"
        );

        if is_combat_finished(&self.player, &self.enemy.card) {
            let outcome = CombatOutcome {
                victory: self.enemy.card.current_hp == 0,
                player_card: self.player.clone(),
            };
            self.stage = RoundStage::Finished;
            self.outcome = Some(outcome.clone());
            Ok(RoundResolution::Finished(calculation, outcome))
        } else {
            self.stage = RoundStage::Resolved;
            Ok(RoundResolution::Continue(calculation))
        }
    }

    /// Roll fresh dice for the next round.
    pub fn next_round<R: RandomSource>(&mut self, rng: &mut R) -> GameResult<()> {
        self.expect_stage(RoundStage::Resolved, "start the next round")?;

        self.round += 1;
        self.dice = DiceRoll::roll(rng);
        self.stage = RoundStage::Rolling;
        debug!(round = self.round, dice = ?self.dice, "rolled dice");
        Ok(())
    }

    /// Consume a finished encounter and hand back its outcome.
    pub fn finish(self) -> GameResult<CombatOutcome> {
        let stage = self.stage;
        match self.outcome {
            Some(outcome) if stage == RoundStage::Finished => Ok(outcome),
            _ => Err(GameError::InvalidRoundAdvance {
                stage,
                action: "finish the combat",
            }),
        }
    }

    fn expect_stage(&self, expected: RoundStage, action: &'static str) -> GameResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GameError::InvalidRoundAdvance {
                stage: self.stage,
                action,
            })
        }
    }
}
