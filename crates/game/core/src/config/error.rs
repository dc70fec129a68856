use crate::combat::DifficultyTier;
use crate::creature::CreatureKind;
use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemCategory;
use crate::world::WorldError;

use super::EnchantTarget;

/// Problems in a world descriptor, roster or item reference.
///
/// All of them stop the run before the first turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown difficulty '{0}' (expected Easy, Normal or Hard)")]
    UnknownDifficulty(String),

    #[error("descriptor places more than one player")]
    DuplicatePlayer,

    #[error("descriptor places no player")]
    MissingPlayer,

    #[error("'{name}' has no position and is not randomly placed")]
    MissingPosition { name: String },

    #[error("no free cell left to place '{name}'")]
    NoFreeCell { name: String },

    #[error("roster has no entry for {kind} at {tier}")]
    MissingRosterEntry {
        kind: CreatureKind,
        tier: DifficultyTier,
    },

    #[error("duplicate roster entry for {kind} at {tier}")]
    DuplicateRosterEntry {
        kind: CreatureKind,
        tier: DifficultyTier,
    },

    #[error("item '{0}' not found in the catalog")]
    UnknownItem(String),

    #[error("{target} enchantment on {category} item '{item}' would never count")]
    MismatchedEnchantment {
        item: String,
        category: ItemCategory,
        target: EnchantTarget,
    },

    #[error("world {width}x{height} exceeds the {max}x{max} limit")]
    WorldTooLarge { width: u32, height: u32, max: u32 },

    #[error("invalid world: {0}")]
    World(#[from] WorldError),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnknownDifficulty(_) => "CONFIG_UNKNOWN_DIFFICULTY",
            ConfigError::DuplicatePlayer => "CONFIG_DUPLICATE_PLAYER",
            ConfigError::MissingPlayer => "CONFIG_MISSING_PLAYER",
            ConfigError::MissingPosition { .. } => "CONFIG_MISSING_POSITION",
            ConfigError::NoFreeCell { .. } => "CONFIG_NO_FREE_CELL",
            ConfigError::MissingRosterEntry { .. } => "CONFIG_MISSING_ROSTER_ENTRY",
            ConfigError::DuplicateRosterEntry { .. } => "CONFIG_DUPLICATE_ROSTER_ENTRY",
            ConfigError::UnknownItem(_) => "CONFIG_UNKNOWN_ITEM",
            ConfigError::MismatchedEnchantment { .. } => "CONFIG_MISMATCHED_ENCHANTMENT",
            ConfigError::WorldTooLarge { .. } => "CONFIG_WORLD_TOO_LARGE",
            ConfigError::World(inner) => inner.error_code(),
        }
    }
}
