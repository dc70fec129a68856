//! Turn actions.
//!
//! Every action a creature can take is a small value implementing
//! [`ActionTransition`]. The engine drives each one through
//! `pre_validate → apply → post_validate` against the [`World`].
//!
//! - `movement`: single-step moves with automatic looting
//! - `loot`: picking up the item of a lootable object
//! - `attack`: melee attack on a neighbouring creature

mod attack;
mod loot;
mod movement;

pub use attack::{AttackAction, AttackError, AttackReport};
pub use loot::{LootAction, LootError, LootReport};
pub use movement::{MoveAction, MoveReport};

use crate::combat::DamageStrategy;
use crate::creature::CreatureId;
use crate::world::{Position, World};

/// What a controller decided to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move,
    Loot,
    Attack,
    Skip,
}

/// Why a direction is being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum DirectionPurpose {
    Move,
    Attack,
}

/// Facts shown to an input source before it picks an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPrompt {
    pub actor: CreatureId,
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub can_loot: bool,
    pub can_attack: bool,
}

/// Why a turn ended without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum SkipReason {
    Chosen,
    InvalidInput,
    MoveFailed,
    NoTarget,
    NothingToLoot,
}

/// Terminal result of one creature's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionReport {
    Moved(MoveReport),
    Looted(LootReport),
    Attacked(AttackReport),
    Skipped(SkipReason),
}

impl ActionReport {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionReport::Moved(_) => ActionKind::Move,
            ActionReport::Looted(_) => ActionKind::Loot,
            ActionReport::Attacked(_) => ActionKind::Attack,
            ActionReport::Skipped(_) => ActionKind::Skip,
        }
    }
}

/// Read-only collaborators available to actions.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    pub strategy: &'a dyn DamageStrategy,
}

impl<'a> ActionContext<'a> {
    pub fn new(strategy: &'a dyn DamageStrategy) -> Self {
        Self { strategy }
    }
}

impl std::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// Defines how a concrete action mutates the world.
pub trait ActionTransition {
    type Error;
    type Output;

    /// The creature performing this action.
    fn actor(&self) -> CreatureId;

    /// Validates pre-conditions using the world **before** mutation.
    fn pre_validate(&self, _world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Mutates the world. Assumes `pre_validate` succeeded.
    fn apply(&self, world: &mut World, ctx: &ActionContext<'_>) -> Result<Self::Output, Self::Error>;

    /// Validates post-conditions using the world **after** mutation.
    fn post_validate(&self, _world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
