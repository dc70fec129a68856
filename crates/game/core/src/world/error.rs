//! Spatial index errors.

use crate::creature::CreatureId;
use crate::error::{ErrorSeverity, GameError};

use super::{ObjectId, Position};

/// Structural violations of the world model.
///
/// Everything here except [`WorldError::UnknownObject`] aborts the run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("world dimensions must be within 1..={max}, got {width}x{height}", max = super::World::MAX_SIDE)]
    InvalidDimensions { width: u32, height: u32 },

    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("cell {position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: CreatureId,
    },

    #[error("cell {position} is not walkable")]
    Blocked { position: Position },

    #[error("creature {0} is not in the world")]
    UnknownCreature(CreatureId),

    #[error("{0} is not in the world")]
    UnknownObject(ObjectId),

    #[error("cell {position} holds more than one creature")]
    OccupancyViolation { position: Position },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WorldError::UnknownObject(_) => ErrorSeverity::Validation,
            WorldError::OccupancyViolation { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::InvalidDimensions { .. } => "WORLD_INVALID_DIMENSIONS",
            WorldError::OutOfBounds { .. } => "WORLD_OUT_OF_BOUNDS",
            WorldError::Occupied { .. } => "WORLD_OCCUPIED",
            WorldError::Blocked { .. } => "WORLD_BLOCKED",
            WorldError::UnknownCreature(_) => "WORLD_UNKNOWN_CREATURE",
            WorldError::UnknownObject(_) => "WORLD_UNKNOWN_OBJECT",
            WorldError::OccupancyViolation { .. } => "WORLD_OCCUPANCY_VIOLATION",
        }
    }
}

/// Rejections of [`super::World::set_position`].
///
/// Destination problems are recoverable: the mover simply skips its turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is not walkable")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied by {occupant}")]
    Occupied {
        destination: Position,
        occupant: CreatureId,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::World(inner) => inner.severity(),
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveError::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            MoveError::Blocked { .. } => "MOVE_BLOCKED",
            MoveError::Occupied { .. } => "MOVE_OCCUPIED",
            MoveError::World(inner) => inner.error_code(),
        }
    }
}
