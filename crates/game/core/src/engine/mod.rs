//! Turn loop.
//!
//! The [`GameEngine`] owns the [`World`] and drives it one creature at a
//! time. Each turn is a small state machine (see [`TurnPhase`]); every action
//! goes through the same `pre_validate → apply → post_validate` pipeline and
//! is reported to the audit sink. After each turn the engine removes defeated
//! creatures and re-evaluates the [`GameStatus`].

mod errors;
mod transition;
mod turns;

pub use errors::{EngineError, TransitionPhase, TransitionPhaseError};
pub use turns::{TurnOutcome, TurnPhase};

use crate::audit::{AuditEvent, AuditKind, AuditSink};
use crate::combat::{DamageStrategy, DifficultyScaling, DifficultyTier};
use crate::config::Scenario;
use crate::creature::{Behavior, BehaviorTable, CreatureId};
use crate::world::{RenderSink, World};

/// Where the run stands after the latest turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum GameStatus {
    Ongoing,
    /// No creature other than the player is left.
    Victory,
    /// The player was defeated.
    Defeat,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

pub struct GameEngine<A> {
    world: World,
    strategy: Box<dyn DamageStrategy>,
    behaviors: BehaviorTable,
    audit: A,
    player: CreatureId,
    tier: DifficultyTier,
    round: u64,
    nonce: u64,
    status: GameStatus,
}

impl<A: AuditSink> GameEngine<A> {
    /// Engine with the canonical [`DifficultyScaling`] strategy.
    pub fn new(scenario: Scenario, behaviors: BehaviorTable, audit: A) -> Self {
        let mut engine = Self {
            world: scenario.world,
            strategy: Box::new(DifficultyScaling),
            behaviors,
            audit,
            player: scenario.player,
            tier: scenario.tier,
            round: 0,
            nonce: 0,
            status: GameStatus::Ongoing,
        };
        engine.status = engine.evaluate_status();
        engine
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn DamageStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    pub fn into_audit(self) -> A {
        self.audit
    }

    pub fn player(&self) -> CreatureId {
        self.player
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn strategy(&self) -> &dyn DamageStrategy {
        self.strategy.as_ref()
    }

    /// Completed rounds.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Executed turns; seeds per-turn random choices.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Plays one round: every living creature acts once, in ascending id
    /// order. Interactive creatures get a rendered frame before deciding.
    pub fn play_round(&mut self, render: &mut dyn RenderSink) -> Result<GameStatus, EngineError> {
        if self.status.is_over() {
            return Err(EngineError::GameOver(self.status));
        }

        for id in self.world.creature_ids() {
            let Some(creature) = self.world.creature(id) else {
                continue;
            };
            if !creature.is_alive() {
                continue;
            }

            if creature.kind().behavior() == Behavior::Interactive {
                render
                    .render(&self.world.snapshot(Some(id)))
                    .map_err(EngineError::Render)?;
            }

            let outcome = self.play_turn(id)?;
            if outcome.status.is_over() {
                break;
            }
        }

        self.round += 1;
        tracing::debug!(round = self.round, status = %self.status, "round complete");
        Ok(self.status)
    }

    /// Plays rounds until the game ends or `max_rounds` rounds have run.
    pub fn run(
        &mut self,
        render: &mut dyn RenderSink,
        max_rounds: Option<u64>,
    ) -> Result<GameStatus, EngineError> {
        self.run_until(render, max_rounds, || false)
    }

    /// Like [`GameEngine::run`], but also stops at the first round boundary
    /// where `stop` returns true. The final frame is drawn either way.
    pub fn run_until(
        &mut self,
        render: &mut dyn RenderSink,
        max_rounds: Option<u64>,
        mut stop: impl FnMut() -> bool,
    ) -> Result<GameStatus, EngineError> {
        while !self.status.is_over() {
            if stop() {
                tracing::info!(round = self.round, "run stopped early");
                break;
            }
            if max_rounds.is_some_and(|limit| self.round >= limit) {
                tracing::info!(rounds = self.round, "round limit reached");
                break;
            }
            self.play_round(render)?;
        }

        render
            .render(&self.world.snapshot(Some(self.player)))
            .map_err(EngineError::Render)?;
        tracing::info!(status = %self.status, rounds = self.round, "run finished");
        Ok(self.status)
    }

    /// Removes creatures at or below zero HP and refreshes the status.
    fn check_consequences(&mut self) -> Vec<CreatureId> {
        let defeated: Vec<CreatureId> = self
            .world
            .creatures()
            .filter(|(_, creature)| !creature.is_alive())
            .map(|(id, _)| id)
            .collect();

        for id in &defeated {
            if let Some(creature) = self.world.remove_creature(*id) {
                tracing::info!(creature = %id, name = creature.name(), hp = creature.hp(), "creature defeated");
                self.audit.record(AuditEvent::new(
                    creature.name(),
                    AuditKind::Defeat,
                    format!("defeated with {} HP", creature.hp()),
                ));
            }
        }

        self.status = self.evaluate_status();
        defeated
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.world.creature(self.player).is_none() {
            GameStatus::Defeat
        } else if self.world.creature_count() <= 1 {
            GameStatus::Victory
        } else {
            GameStatus::Ongoing
        }
    }
}

impl<A> std::fmt::Debug for GameEngine<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("strategy", &self.strategy.name())
            .field("player", &self.player)
            .field("round", &self.round)
            .field("nonce", &self.nonce)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
