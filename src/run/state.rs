//! Run state machine.
//!
//! `Run` owns everything a single playthrough needs: configuration, catalog,
//! randomness, the deck, and whichever per-phase session is active
//! (`DeckSelection`, `CombatRound`, or `DeckManagement`). Every transition is
//! a method returning `GameResult`; a call in the wrong phase fails with
//! `InvalidPhase` and leaves the run untouched.
//!
//! ## Flow
//!
//! - `start_new_run`: Menu -> DeckSelection
//! - `confirm_deck`: DeckSelection -> Combat (encounter 1)
//! - `reveal` / `resolve` / `next_round` / `finish_combat`: inside Combat
//! - `finish_combat` then routes Combat -> Reward, or -> GameOver
//! - `confirm_deck_management`: Reward -> Combat (next encounter)
//! - `back_to_menu`: any phase -> Menu

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{HostSignal, PlayerAction};
use super::history::RunEvent;
use super::phase::{Phase, RunOutcome};
use super::snapshot::{CombatView, RewardView, RunSnapshot};
use crate::cards::{CardCatalog, CardId, CardInstance, EnemyInstance};
use crate::combat::{CombatOutcome, CombatRound, RoundResolution, RoundStage};
use crate::core::config::RunConfig;
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::{GameError, GameResult};
use crate::core::rng::{GameRng, RandomSource};
use crate::deck::{draw_rewards, mark_dead_if_needed, select_deck, Deck, DeckManagement, DeckSelection};
use crate::enemy::generate_enemy;

/// Where a finished encounter leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatRoute {
    Reward,
    GameOver(RunOutcome),
}

/// Decide what follows an encounter.
///
/// `deck` must already hold the fighter's post-combat state. A defeat always
/// ends the run. A victory in the last encounter wins it. Any other victory
/// goes to the reward screen, unless no living card is left to fight on.
#[must_use]
pub fn route_after_combat(
    victory: bool,
    combat_index: u32,
    total_encounters: u32,
    deck: &Deck,
) -> CombatRoute {
    if !victory {
        CombatRoute::GameOver(RunOutcome::Defeat)
    } else if combat_index >= total_encounters {
        CombatRoute::GameOver(RunOutcome::Victory)
    } else if !deck.has_alive_cards() {
        CombatRoute::GameOver(RunOutcome::Defeat)
    } else {
        CombatRoute::Reward
    }
}

/// Progress of the current run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    phase: Phase,
    combat_index: u32,
    active_player: Option<CardInstance>,
    active_enemy: Option<EnemyInstance>,
    deck: Deck,
    outcome: Option<RunOutcome>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            combat_index: 1,
            active_player: None,
            active_enemy: None,
            deck: Deck::empty(),
            outcome: None,
        }
    }
}

impl RunState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 1-based index of the current encounter. One past the total after an
    /// overall victory.
    #[must_use]
    pub fn combat_index(&self) -> u32 {
        self.combat_index
    }

    /// The card currently (or most recently) fighting.
    #[must_use]
    pub fn active_player(&self) -> Option<&CardInstance> {
        self.active_player.as_ref()
    }

    /// The enemy of the current encounter. Cleared when the encounter ends.
    #[must_use]
    pub fn active_enemy(&self) -> Option<&EnemyInstance> {
        self.active_enemy.as_ref()
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }
}

/// One playthrough, from menu to game over.
#[derive(Clone, Debug)]
pub struct Run<R: RandomSource = GameRng> {
    config: RunConfig,
    catalog: CardCatalog,
    rng: R,
    entities: EntityAllocator,
    state: RunState,
    selection: Option<DeckSelection>,
    combat: Option<CombatRound>,
    management: Option<DeckManagement>,
    history: Vector<RunEvent>,
}

impl Run<GameRng> {
    /// Default configuration over the standard catalog.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(RunConfig::default(), CardCatalog::standard(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Run<R> {
    /// Create a run sitting at the menu.
    ///
    /// Panics if the catalog is empty or the deck size does not fit a slot
    /// number.
    pub fn new(config: RunConfig, catalog: CardCatalog, rng: R) -> Self {
        assert!(!catalog.is_empty(), "A run needs a non-empty card catalog");
        assert!(
            config.deck_size > 0 && config.deck_size <= usize::from(u8::MAX),
            "Deck size must be between 1 and 255"
        );

        Self {
            config,
            catalog,
            rng,
            entities: EntityAllocator::new(),
            state: RunState::default(),
            selection: None,
            combat: None,
            management: None,
            history: Vector::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn combat_index(&self) -> u32 {
        self.state.combat_index
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.state.deck
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&CardInstance> {
        self.state.active_player()
    }

    #[must_use]
    pub fn active_enemy(&self) -> Option<&EnemyInstance> {
        self.state.active_enemy()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.state.outcome
    }

    /// The run is over and every encounter was cleared.
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.state.phase == Phase::GameOver && self.state.outcome == Some(RunOutcome::Victory)
    }

    #[must_use]
    pub fn selection(&self) -> Option<&DeckSelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn combat(&self) -> Option<&CombatRound> {
        self.combat.as_ref()
    }

    #[must_use]
    pub fn deck_management(&self) -> Option<&DeckManagement> {
        self.management.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<RunEvent> {
        &self.history
    }

    /// What the host should do next.
    #[must_use]
    pub fn pending_signal(&self) -> HostSignal {
        let pacing = &self.config.pacing;
        match (self.state.phase, &self.combat) {
            (Phase::Combat, Some(combat)) => match combat.stage() {
                RoundStage::Rolling => HostSignal::AwaitingReveal(pacing.reveal_delay),
                RoundStage::Revealed => HostSignal::AwaitingResolve(pacing.resolve_delay),
                RoundStage::Resolved => HostSignal::AwaitingNextRound,
                RoundStage::Finished => HostSignal::AwaitingCombatEnd(pacing.combat_end_delay),
            },
            _ => HostSignal::AwaitingInput,
        }
    }

    /// Read-only copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            state: self.state.clone(),
            total_encounters: self.config.total_encounters,
            signal: self.pending_signal(),
            selection: self.selection.clone(),
            combat: self.combat.as_ref().map(CombatView::from),
            reward: self.management.as_ref().map(RewardView::from),
            history: self.history.clone(),
        }
    }

    // === Input ===

    /// Apply an action from the input layer.
    pub fn activate(&mut self, action: PlayerAction) -> GameResult<HostSignal> {
        match action {
            PlayerAction::StartRun => self.start_new_run()?,
            PlayerAction::ToggleCard(card) => {
                self.toggle_card(card)?;
            }
            PlayerAction::ConfirmDeck => self.confirm_selection()?,
            PlayerAction::Reveal => self.reveal()?,
            PlayerAction::Resolve => {
                self.resolve()?;
            }
            PlayerAction::NextRound => self.next_round()?,
            PlayerAction::FinishCombat => {
                self.finish_combat()?;
            }
            PlayerAction::SelectReward(card) => self.select_reward(card)?,
            PlayerAction::SelectReplacement(card) => self.select_replacement(card)?,
            PlayerAction::AssignPosition { card, position } => {
                self.assign_position(card, position)?;
            }
            PlayerAction::ConfirmDeckManagement => self.confirm_deck_management()?,
            PlayerAction::BackToMenu => self.back_to_menu(),
        }
        Ok(self.pending_signal())
    }

    // === Menu / selection ===

    /// Leave the menu and offer the starter pool.
    pub fn start_new_run(&mut self) -> GameResult<()> {
        self.expect_phase(Phase::Menu, "start a run")?;

        self.reset();
        self.selection = Some(DeckSelection::from_catalog(
            &self.catalog,
            self.config.starter_pool,
            self.config.deck_size,
        ));
        self.history.push_back(RunEvent::RunStarted);
        self.enter(Phase::DeckSelection);
        Ok(())
    }

    /// Toggle a starter template. Returns whether it is now selected.
    pub fn toggle_card(&mut self, card: CardId) -> GameResult<bool> {
        self.expect_phase(Phase::DeckSelection, "toggle a card")?;
        let phase = self.state.phase;
        self.selection
            .as_mut()
            .ok_or(GameError::InvalidPhase { phase, action: "toggle a card" })?
            .toggle(card)
    }

    /// Confirm the toggled pick.
    pub fn confirm_selection(&mut self) -> GameResult<()> {
        let picked = self
            .selection
            .as_ref()
            .map(|s| s.selected().to_vec())
            .unwrap_or_default();
        self.confirm_deck(&picked)
    }

    /// Build the deck from `cards` (in fighting order) and start encounter 1.
    ///
    /// Every card must come from the offered starter pool. On error the run
    /// stays in deck selection, unchanged.
    pub fn confirm_deck(&mut self, cards: &[CardId]) -> GameResult<()> {
        self.expect_phase(Phase::DeckSelection, "confirm the deck")?;
        if let Some(selection) = &self.selection {
            if let Some(&stray) = cards
                .iter()
                .find(|&&id| !selection.available().iter().any(|t| t.id == id))
            {
                return Err(GameError::NotOffered(stray));
            }
        }

        let mut entities = self.entities.clone();
        let chosen = cards
            .iter()
            .map(|&id| {
                self.catalog
                    .get(id)
                    .map(|template| CardInstance::from_template(entities.next_id(), template))
            })
            .collect::<GameResult<Vec<_>>>()?;
        let deck = select_deck(chosen, self.config.deck_size)?;

        self.entities = entities;
        self.state.deck = deck;
        self.state.combat_index = 1;
        self.selection = None;
        self.history.push_back(RunEvent::DeckConfirmed {
            cards: cards.to_vec(),
        });
        debug!(?cards, "confirmed starting deck");

        self.start_encounter();
        Ok(())
    }

    // === Combat ===

    /// Show the current round's dice.
    pub fn reveal(&mut self) -> GameResult<()> {
        self.combat_mut("reveal")?.reveal()
    }

    /// Commit the current round's damage.
    pub fn resolve(&mut self) -> GameResult<RoundResolution> {
        let combat_index = self.state.combat_index;
        let combat = self.combat_mut("resolve")?;
        let resolution = combat.resolve()?;

        let round = combat.round();
        let player = combat.player().clone();
        let enemy = combat.enemy().clone();
        self.state.active_player = Some(player);
        self.state.active_enemy = Some(enemy);

        let calculation = match &resolution {
            RoundResolution::Continue(c) | RoundResolution::Finished(c, _) => *c,
        };
        self.history.push_back(RunEvent::RoundResolved {
            combat_index,
            round,
            calculation,
        });
        Ok(resolution)
    }

    /// Roll the next round.
    pub fn next_round(&mut self) -> GameResult<()> {
        let action = "start the next round";
        self.expect_phase(Phase::Combat, action)?;
        let phase = self.state.phase;
        let combat = self
            .combat
            .as_mut()
            .ok_or(GameError::InvalidPhase { phase, action })?;
        combat.next_round(&mut self.rng)
    }

    /// Close the finished encounter and report its outcome.
    pub fn finish_combat(&mut self) -> GameResult<CombatRoute> {
        let action = "finish the combat";
        self.expect_phase(Phase::Combat, action)?;

        match self.combat.as_ref() {
            Some(combat) if combat.combat_finished() => {}
            Some(combat) => {
                return Err(GameError::InvalidRoundAdvance {
                    stage: combat.stage(),
                    action,
                })
            }
            None => {
                return Err(GameError::InvalidPhase {
                    phase: self.state.phase,
                    action,
                })
            }
        }

        let outcome = self
            .combat
            .take()
            .ok_or(GameError::InvalidPhase { phase: Phase::Combat, action })?
            .finish()?;
        self.on_combat_finished(outcome)
    }

    /// Apply an encounter's outcome: write the fighter back into the deck
    /// and move on to the reward screen or the end of the run.
    ///
    /// Only `finish_combat` calls this, once the live round has finished.
    fn on_combat_finished(&mut self, outcome: CombatOutcome) -> GameResult<CombatRoute> {
        self.expect_phase(Phase::Combat, "report a combat outcome")?;

        let fighter = mark_dead_if_needed(&outcome.player_card);
        self.state.deck.commit(&fighter)?;

        let combat_index = self.state.combat_index;
        self.combat = None;
        self.state.active_enemy = None;
        self.state.active_player = self.state.deck.get(fighter.entity_id).cloned();

        if fighter.is_dead {
            info!(card = %fighter.name, combat_index, "card fell");
            self.history.push_back(RunEvent::CardFell {
                card: fighter.entity_id,
            });
        }
        self.history.push_back(RunEvent::EncounterEnded {
            combat_index,
            victory: outcome.victory,
        });

        let route = route_after_combat(
            outcome.victory,
            combat_index,
            self.config.total_encounters,
            &self.state.deck,
        );

        match route {
            CombatRoute::Reward => {
                let rewards = draw_rewards(
                    &self.catalog,
                    self.config.reward_choices,
                    &mut self.entities,
                    &mut self.rng,
                );
                let offers: Vec<_> = rewards.iter().map(|c| c.name.as_str()).collect();
                debug!(?offers, "drew rewards");
                self.management = Some(DeckManagement::new(
                    self.state.deck.clone(),
                    rewards,
                    self.config.deck_size,
                ));
                self.enter(Phase::Reward);
            }
            CombatRoute::GameOver(RunOutcome::Victory) => {
                self.state.combat_index += 1;
                self.end_run(RunOutcome::Victory, combat_index);
            }
            CombatRoute::GameOver(RunOutcome::Defeat) => {
                let cleared = if outcome.victory {
                    combat_index
                } else {
                    combat_index - 1
                };
                self.end_run(RunOutcome::Defeat, cleared);
            }
        }

        Ok(route)
    }

    // === Reward ===

    pub fn select_reward(&mut self, card: EntityId) -> GameResult<()> {
        self.management_mut("select a reward")?.select_reward(card)
    }

    pub fn select_replacement(&mut self, card: EntityId) -> GameResult<()> {
        self.management_mut("select a card to replace")?
            .select_replacement(card)
    }

    pub fn assign_position(&mut self, card: EntityId, position: u8) -> GameResult<()> {
        self.management_mut("assign a position")?
            .assign_position(card, position)
    }

    /// Adopt the rearranged deck and start the next encounter.
    ///
    /// Fails with `IncompleteDeckManagement` until a reward is chosen, a
    /// replacement is designated when one is needed, and positions are
    /// contiguous from 1.
    pub fn confirm_deck_management(&mut self) -> GameResult<()> {
        let session = self.management_mut("confirm the deck")?;
        let deck = session.confirm()?;
        let reward = session.selected_reward().map(|c| c.card_id);
        let replaced = session.replacement().map(|c| c.entity_id);

        self.management = None;
        self.state.deck = deck;
        self.state.combat_index += 1;
        if let Some(reward) = reward {
            self.history.push_back(RunEvent::RewardTaken { reward, replaced });
        }

        self.start_encounter();
        Ok(())
    }

    // === Menu ===

    /// Abandon whatever is in progress and return to the menu.
    pub fn back_to_menu(&mut self) {
        let from = self.state.phase;
        self.reset();
        let to = self.state.phase;
        info!(%from, %to, "phase transition");
    }

    // === Internals ===

    fn expect_phase(&self, expected: Phase, action: &'static str) -> GameResult<()> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                phase: self.state.phase,
                action,
            })
        }
    }

    fn combat_mut(&mut self, action: &'static str) -> GameResult<&mut CombatRound> {
        self.expect_phase(Phase::Combat, action)?;
        let phase = self.state.phase;
        self.combat
            .as_mut()
            .ok_or(GameError::InvalidPhase { phase, action })
    }

    fn management_mut(&mut self, action: &'static str) -> GameResult<&mut DeckManagement> {
        self.expect_phase(Phase::Reward, action)?;
        let phase = self.state.phase;
        self.management
            .as_mut()
            .ok_or(GameError::InvalidPhase { phase, action })
    }

    fn enter(&mut self, phase: Phase) {
        let from = self.state.phase;
        self.state.phase = phase;
        info!(
            %from,
            to = %phase,
            combat_index = self.state.combat_index,
            "phase transition"
        );
    }

    fn reset(&mut self) {
        self.state = RunState::default();
        self.entities = EntityAllocator::new();
        self.selection = None;
        self.combat = None;
        self.management = None;
        self.history = Vector::new();
    }

    /// Send the next living card against a fresh enemy.
    fn start_encounter(&mut self) {
        let Some(fighter) = self.state.deck.next_fighter().cloned() else {
            let cleared = self.state.combat_index.saturating_sub(1);
            self.end_run(RunOutcome::Defeat, cleared);
            return;
        };

        let combat_index = self.state.combat_index;
        let enemy = generate_enemy(
            &self.catalog,
            combat_index,
            self.config.total_encounters,
            self.entities.next_id(),
            &mut self.rng,
        );
        self.history.push_back(RunEvent::EncounterStarted {
            combat_index,
            fighter: fighter.entity_id,
            enemy: enemy.card.card_id,
            is_boss: enemy.is_boss,
        });

        let combat = CombatRound::new(fighter.clone(), enemy.clone(), &mut self.rng);
        self.state.active_player = Some(fighter);
        self.state.active_enemy = Some(enemy);
        self.combat = Some(combat);
        self.enter(Phase::Combat);
    }

    fn end_run(&mut self, outcome: RunOutcome, encounters_cleared: u32) {
        self.state.outcome = Some(outcome);
        self.state.active_enemy = None;
        self.combat = None;
        self.management = None;
        self.history.push_back(RunEvent::RunEnded {
            outcome,
            encounters_cleared,
        });
        info!(?outcome, encounters_cleared, "run ended");
        self.enter(Phase::GameOver);
    }
}
