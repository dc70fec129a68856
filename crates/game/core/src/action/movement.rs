use crate::creature::CreatureId;
use crate::world::{CardinalDirection, MoveError, Position, World, WorldError};

use super::{ActionContext, ActionTransition, LootAction, LootError, LootReport};

/// Outcome of a committed step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub from: Position,
    pub to: Position,
    /// Present when the destination held a lootable object.
    pub loot: Option<LootReport>,
    /// Auto-loot rejection. The step itself still stands.
    pub loot_failure: Option<LootError>,
}

/// Single-step move; loots the destination cell on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: CreatureId,
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(actor: CreatureId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    fn origin(&self, world: &World) -> Result<Position, MoveError> {
        world
            .position_of(self.actor)
            .ok_or_else(|| WorldError::UnknownCreature(self.actor).into())
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Output = MoveReport;

    fn actor(&self) -> CreatureId {
        self.actor
    }

    fn pre_validate(&self, world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        self.origin(world).map(|_| ())
    }

    fn apply(&self, world: &mut World, ctx: &ActionContext<'_>) -> Result<MoveReport, MoveError> {
        let from = self.origin(world)?;
        let to = from.step(self.direction);
        world.set_position(self.actor, to)?;

        let (loot, loot_failure) = if world.lootable_object_at(to).is_some() {
            match LootAction::new(self.actor).apply(world, ctx) {
                Ok(report) => (Some(report), None),
                Err(error) => {
                    tracing::warn!(actor = %self.actor, %error, "auto-loot after move failed");
                    (None, Some(error))
                }
            }
        } else {
            (None, None)
        };

        Ok(MoveReport {
            from,
            to,
            loot,
            loot_failure,
        })
    }

    fn post_validate(&self, world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        let position = self.origin(world)?;
        if world.creatures_at(position).len() == 1 {
            Ok(())
        } else {
            Err(WorldError::OccupancyViolation { position }.into())
        }
    }
}
