use crate::action::{
    ActionContext, ActionKind, ActionReport, AttackAction, AttackReport, DirectionPurpose,
    LootAction, LootReport, MoveAction, MoveReport, SkipReason,
};
use crate::audit::{AuditEvent, AuditKind, AuditSink};
use crate::creature::{CreatureId, Perception};
use crate::world::CardinalDirection;

use super::transition::drive_transition;
use super::{EngineError, GameEngine, GameStatus};

/// States of a single creature turn. `Skipping` and every completed action
/// are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingDecision,
    Moving(CardinalDirection),
    Looting,
    Attacking(CardinalDirection),
    Skipping(SkipReason),
}

/// Everything that happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub actor: CreatureId,
    pub report: ActionReport,
    /// Creatures removed by the consequence check after the action.
    pub defeated: Vec<CreatureId>,
    pub status: GameStatus,
}

impl<A: AuditSink> GameEngine<A> {
    /// Plays one turn for `actor`: decide, validate, execute, check consequences.
    ///
    /// Recoverable failures (blocked move, empty direction, nothing to loot,
    /// unreadable input) end the turn as a skip. Anything else aborts.
    pub fn play_turn(&mut self, actor: CreatureId) -> Result<TurnOutcome, EngineError> {
        if self.status.is_over() {
            return Err(EngineError::GameOver(self.status));
        }

        let perception = Perception::observe(&self.world, actor, self.nonce)
            .ok_or(EngineError::UnknownActor(actor))?;
        let controller = self.behaviors.controller_for(perception.kind.behavior());
        let ctx = ActionContext::new(self.strategy.as_ref());

        let mut phase = TurnPhase::AwaitingDecision;
        let mut failure: Option<String> = None;

        let report = loop {
            tracing::trace!(%actor, ?phase, "turn phase");
            phase = match phase {
                TurnPhase::AwaitingDecision => match controller.decide(&perception) {
                    Some(ActionKind::Move) => controller
                        .direction(&perception, DirectionPurpose::Move)
                        .map_or(TurnPhase::Skipping(SkipReason::InvalidInput), TurnPhase::Moving),
                    Some(ActionKind::Attack) => controller
                        .direction(&perception, DirectionPurpose::Attack)
                        .map_or(
                            TurnPhase::Skipping(SkipReason::InvalidInput),
                            TurnPhase::Attacking,
                        ),
                    Some(ActionKind::Loot) => TurnPhase::Looting,
                    Some(ActionKind::Skip) => TurnPhase::Skipping(SkipReason::Chosen),
                    None => TurnPhase::Skipping(SkipReason::InvalidInput),
                },
                TurnPhase::Moving(direction) => {
                    let action = MoveAction::new(actor, direction);
                    match drive_transition(&action, &mut self.world, &ctx) {
                        Ok(report) => break ActionReport::Moved(report),
                        Err(error) if error.is_recoverable() => {
                            failure = Some(error.error.to_string());
                            TurnPhase::Skipping(SkipReason::MoveFailed)
                        }
                        Err(error) => return Err(EngineError::Move(error)),
                    }
                }
                TurnPhase::Looting => {
                    let action = LootAction::new(actor);
                    match drive_transition(&action, &mut self.world, &ctx) {
                        Ok(report) => break ActionReport::Looted(report),
                        Err(error) if error.is_recoverable() => {
                            failure = Some(error.error.to_string());
                            TurnPhase::Skipping(SkipReason::NothingToLoot)
                        }
                        Err(error) => return Err(EngineError::Loot(error)),
                    }
                }
                TurnPhase::Attacking(direction) => {
                    let action = AttackAction::new(actor, direction);
                    match drive_transition(&action, &mut self.world, &ctx) {
                        Ok(report) => break ActionReport::Attacked(report),
                        Err(error) if error.is_recoverable() => {
                            failure = Some(error.error.to_string());
                            TurnPhase::Skipping(SkipReason::NoTarget)
                        }
                        Err(error) => return Err(EngineError::Attack(error)),
                    }
                }
                TurnPhase::Skipping(reason) => break ActionReport::Skipped(reason),
            };
        };

        self.nonce += 1;
        self.record_report(&perception.name, &report, failure);

        let defeated = self.check_consequences();
        Ok(TurnOutcome {
            actor,
            report,
            defeated,
            status: self.status,
        })
    }

    fn record_report(&mut self, actor: &str, report: &ActionReport, failure: Option<String>) {
        match report {
            ActionReport::Moved(moved) => self.record_move(actor, moved),
            ActionReport::Looted(loot) => self.record_loot(actor, loot),
            ActionReport::Attacked(attack) => self.record_attack(actor, attack),
            ActionReport::Skipped(reason) => {
                let detail = match failure {
                    Some(message) => format!("skipped turn ({reason}): {message}"),
                    None => format!("skipped turn ({reason})"),
                };
                if matches!(reason, SkipReason::Chosen) {
                    tracing::debug!(actor, %reason, "turn skipped");
                } else {
                    tracing::warn!(actor, %reason, %detail, "turn degraded to skip");
                }
                self.audit
                    .record(AuditEvent::new(actor, AuditKind::Skip, detail));
            }
        }
    }

    fn record_move(&mut self, actor: &str, moved: &MoveReport) {
        self.audit.record(AuditEvent::new(
            actor,
            AuditKind::Movement,
            format!("moved from {} to {}", moved.from, moved.to),
        ));
        if let Some(loot) = &moved.loot {
            self.record_loot(actor, loot);
        }
        if let Some(error) = &moved.loot_failure {
            self.audit.record(AuditEvent::new(
                actor,
                AuditKind::Loot,
                format!("auto-loot at {} failed: {error}", moved.to),
            ));
        }
    }

    fn record_loot(&mut self, actor: &str, loot: &LootReport) {
        let mut detail = match &loot.item {
            Some((item, category)) => {
                format!("looted {category} item '{item}' from '{}'", loot.object_name)
            }
            None => format!("'{}' held nothing", loot.object_name),
        };
        if loot.object_removed {
            detail.push_str("; object removed");
        }
        self.audit
            .record(AuditEvent::new(actor, AuditKind::Loot, detail));
    }

    fn record_attack(&mut self, actor: &str, attack: &AttackReport) {
        self.audit.record(AuditEvent::new(
            actor,
            AuditKind::Attack,
            format!(
                "attacked {} for {} damage",
                attack.target_name, attack.outgoing.modified
            ),
        ));
        self.audit.record(AuditEvent::new(
            attack.target_name.as_str(),
            AuditKind::DamageReceived,
            format!(
                "took {} damage ({} blocked), {} HP left",
                attack.receipt.mitigated,
                attack.receipt.defense,
                attack.receipt.remaining_hp
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionPrompt, LootError, SkipReason};
    use crate::audit::AuditLog;
    use crate::combat::DifficultyTier;
    use crate::config::{CreaturePlacement, ScenarioBuilder, WorldDescriptor};
    use crate::creature::{
        AggressiveController, BehaviorTable, CreatureKind, InputSource, InteractiveController,
    };
    use crate::rng::PcgRng;
    use crate::world::Position;

    #[derive(Default)]
    struct Script {
        actions: Vec<Option<ActionKind>>,
        directions: Vec<Option<CardinalDirection>>,
    }

    impl InputSource for Script {
        fn choose_action(&mut self, _prompt: &ActionPrompt) -> Option<ActionKind> {
            if self.actions.is_empty() {
                return Some(ActionKind::Skip);
            }
            self.actions.remove(0)
        }

        fn choose_direction(&mut self, _purpose: DirectionPurpose) -> Option<CardinalDirection> {
            if self.directions.is_empty() {
                return None;
            }
            self.directions.remove(0)
        }
    }

    fn engine(script: Script) -> GameEngine<AuditLog> {
        let descriptor = WorldDescriptor::new(3, 3, DifficultyTier::Hard)
            .with_creature(CreaturePlacement::player("Hero"))
            .with_creature(CreaturePlacement::creature(CreatureKind::Enemy).at(1, 0));
        let scenario = ScenarioBuilder::new(&descriptor)
            .build(&mut AuditLog::new())
            .unwrap();
        let behaviors = BehaviorTable::new(
            Box::new(InteractiveController::new(script)),
            Box::new(AggressiveController::new(PcgRng, 0)),
        );
        GameEngine::new(scenario, behaviors, AuditLog::new())
    }

    #[test]
    fn failed_auto_loot_is_audited() {
        let mut engine = engine(Script::default());
        let moved = MoveReport {
            from: Position::new(1, 1),
            to: Position::new(1, 2),
            loot: None,
            loot_failure: Some(LootError::NothingToLoot {
                position: Position::new(1, 2),
            }),
        };

        engine.record_move("Hero", &moved);

        let loot: Vec<_> = engine.audit().of_kind(AuditKind::Loot).collect();
        assert_eq!(loot.len(), 1);
        assert_eq!(loot[0].actor, "Hero");
        assert_eq!(
            loot[0].detail,
            "auto-loot at (1, 2) failed: nothing to loot at (1, 2)"
        );
    }

    #[test]
    fn invalid_input_degrades_to_skip() {
        let mut engine = engine(Script {
            actions: vec![None],
            ..Script::default()
        });

        let outcome = engine.play_turn(CreatureId::PLAYER).unwrap();

        assert_eq!(outcome.report, ActionReport::Skipped(SkipReason::InvalidInput));
        assert_eq!(engine.nonce(), 1);
        assert_eq!(engine.audit().of_kind(AuditKind::Skip).count(), 1);
    }

    #[test]
    fn blocked_move_is_a_move_failed_skip() {
        let mut engine = engine(Script {
            actions: vec![Some(ActionKind::Move)],
            directions: vec![Some(CardinalDirection::North)],
        });

        let outcome = engine.play_turn(CreatureId::PLAYER).unwrap();

        assert_eq!(outcome.report, ActionReport::Skipped(SkipReason::MoveFailed));
        assert_eq!(
            engine.world().position_of(CreatureId::PLAYER),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn attack_in_empty_direction_reports_no_target() {
        let mut engine = engine(Script {
            actions: vec![Some(ActionKind::Attack)],
            directions: vec![Some(CardinalDirection::South)],
        });

        let outcome = engine.play_turn(CreatureId::PLAYER).unwrap();

        assert_eq!(outcome.report, ActionReport::Skipped(SkipReason::NoTarget));
        let skip = engine.audit().of_kind(AuditKind::Skip).next().unwrap();
        assert!(skip.detail.contains("no valid target"));
    }

    #[test]
    fn loot_with_nothing_here_skips() {
        let mut engine = engine(Script {
            actions: vec![Some(ActionKind::Loot)],
            ..Script::default()
        });

        let outcome = engine.play_turn(CreatureId::PLAYER).unwrap();

        assert_eq!(outcome.report, ActionReport::Skipped(SkipReason::NothingToLoot));
    }

    #[test]
    fn unknown_actor_is_fatal() {
        let mut engine = engine(Script::default());
        let err = engine.play_turn(CreatureId(42)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownActor(CreatureId(42))));
    }
}
