//! Error types for the turn pipeline.

use crate::action::{AttackError, LootError};
use crate::creature::CreatureId;
use crate::error::{ErrorSeverity, GameError};
use crate::world::MoveError;

use super::GameStatus;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: GameError> TransitionPhaseError<E> {
    pub fn is_recoverable(&self) -> bool {
        self.error.severity().is_recoverable()
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors that stop the engine. Recoverable action failures never get here;
/// they degrade the turn to a skip instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<AttackError>),

    #[error("loot action failed: {0}")]
    Loot(TransitionPhaseError<LootError>),

    #[error("{0} cannot act: not in the world")]
    UnknownActor(CreatureId),

    #[error("game is already over ({0})")]
    GameOver(GameStatus),

    #[error("rendering failed")]
    Render(#[source] std::io::Error),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::Move(inner) => inner.error.severity(),
            EngineError::Attack(inner) => inner.error.severity(),
            EngineError::Loot(inner) => inner.error.severity(),
            EngineError::UnknownActor(_) | EngineError::Render(_) => ErrorSeverity::Fatal,
            EngineError::GameOver(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::Move(inner) => inner.error.error_code(),
            EngineError::Attack(inner) => inner.error.error_code(),
            EngineError::Loot(inner) => inner.error.error_code(),
            EngineError::UnknownActor(_) => "ENGINE_UNKNOWN_ACTOR",
            EngineError::GameOver(_) => "ENGINE_GAME_OVER",
            EngineError::Render(_) => "ENGINE_RENDER",
        }
    }
}
