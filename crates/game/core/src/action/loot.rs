use crate::creature::CreatureId;
use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemCategory;
use crate::world::{ObjectId, Position, World, WorldError};

use super::{ActionContext, ActionTransition};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LootError {
    #[error("nothing to loot at {position}")]
    NothingToLoot { position: Position },

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for LootError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LootError::NothingToLoot { .. } => ErrorSeverity::Recoverable,
            LootError::World(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LootError::NothingToLoot { .. } => "LOOT_NOTHING_TO_LOOT",
            LootError::World(inner) => inner.error_code(),
        }
    }
}

/// Outcome of looting one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootReport {
    pub object: ObjectId,
    pub object_name: String,
    /// Name and inventory of the item taken, if the object carried one.
    pub item: Option<(String, ItemCategory)>,
    pub object_removed: bool,
}

/// Takes the item of the first lootable object under the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LootAction {
    pub actor: CreatureId,
}

impl LootAction {
    pub fn new(actor: CreatureId) -> Self {
        Self { actor }
    }

    fn target(&self, world: &World) -> Result<ObjectId, LootError> {
        let position = world
            .position_of(self.actor)
            .ok_or(WorldError::UnknownCreature(self.actor))?;
        world
            .lootable_object_at(position)
            .ok_or(LootError::NothingToLoot { position })
    }
}

impl ActionTransition for LootAction {
    type Error = LootError;
    type Output = LootReport;

    fn actor(&self) -> CreatureId {
        self.actor
    }

    fn pre_validate(&self, world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        self.target(world).map(|_| ())
    }

    /// Every lookup happens before the first mutation, so a failure leaves
    /// both the object and the inventory untouched.
    fn apply(&self, world: &mut World, _ctx: &ActionContext<'_>) -> Result<LootReport, LootError> {
        let object = self.target(world)?;
        let (object_name, removable) = world
            .object(object)
            .map(|o| (o.name().to_owned(), o.is_removable()))
            .ok_or(WorldError::UnknownObject(object))?;
        if world.creature(self.actor).is_none() {
            return Err(WorldError::UnknownCreature(self.actor).into());
        }

        let item = world.remove_item_from_world_object(object).and_then(|item| {
            let name = item.name().to_owned();
            let creature = world.creature_mut(self.actor)?;
            let category = creature.loot(item);
            Some((name, category))
        });

        match &item {
            Some((name, category)) => {
                tracing::debug!(actor = %self.actor, object = %object_name, item = %name, %category, "item looted")
            }
            None => tracing::debug!(actor = %self.actor, object = %object_name, "object was empty"),
        }

        let object_removed = removable && world.remove_world_object(object).is_some();

        Ok(LootReport {
            object,
            object_name,
            item,
            object_removed,
        })
    }

    fn post_validate(&self, world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        world
            .creature(self.actor)
            .map(|_| ())
            .ok_or_else(|| WorldError::UnknownCreature(self.actor).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DamageKind, DamageProfile, DifficultyScaling, DifficultyTier};
    use crate::creature::{Creature, CreatureConfig, CreatureKind};
    use crate::item::Item;
    use crate::world::{ObjectFlags, WorldObject};

    fn setup() -> (World, CreatureId) {
        let mut world = World::new(3, 3).unwrap();
        let player = Creature::new(
            "Hero",
            CreatureConfig::defaults(CreatureKind::Player),
            DifficultyTier::Normal,
        );
        let id = world.add_creature(player, Position::new(1, 1)).unwrap();
        (world, id)
    }

    #[test]
    fn loot_moves_item_and_removes_object() {
        let (mut world, hero) = setup();
        let shield = Item::armor("Shield", "", DamageProfile::single(DamageKind::Physical, 5));
        let chest = world
            .add_world_object_with_item(WorldObject::chest("Chest"), Some(shield), Position::new(1, 1))
            .unwrap();

        let ctx = ActionContext::new(&DifficultyScaling);
        let report = LootAction::new(hero).apply(&mut world, &ctx).unwrap();

        assert_eq!(report.item, Some(("Shield".into(), ItemCategory::Defense)));
        assert!(report.object_removed);
        assert!(world.object(chest).is_none());
        assert_eq!(world.creature(hero).unwrap().total_defense(), 5);
    }

    #[test]
    fn fixed_object_keeps_standing_after_loot() {
        let (mut world, hero) = setup();
        let flags = ObjectFlags::LOOTABLE | ObjectFlags::WALKABLE;
        let altar = world
            .add_world_object_with_item(
                WorldObject::new("Altar", flags),
                Some(Item::weapon("Bow", "", 10, DamageProfile::single(DamageKind::Physical, 4))),
                Position::new(1, 1),
            )
            .unwrap();

        let ctx = ActionContext::new(&DifficultyScaling);
        let report = LootAction::new(hero).apply(&mut world, &ctx).unwrap();

        assert!(!report.object_removed);
        assert!(world.object(altar).is_some());
        assert!(world.item_of(altar).is_none());
        assert_eq!(world.creature(hero).unwrap().equipment_damage(), 4);
    }

    #[test]
    fn empty_removable_object_is_still_cleared() {
        let (mut world, hero) = setup();
        world
            .add_world_object(WorldObject::chest("Empty crate"), Position::new(1, 1))
            .unwrap();

        let ctx = ActionContext::new(&DifficultyScaling);
        let report = LootAction::new(hero).apply(&mut world, &ctx).unwrap();

        assert_eq!(report.item, None);
        assert!(report.object_removed);
    }

    #[test]
    fn nothing_to_loot_is_recoverable() {
        let (world, hero) = setup();
        let ctx = ActionContext::new(&DifficultyScaling);
        let err = LootAction::new(hero).pre_validate(&world, &ctx).unwrap_err();

        assert!(err.severity().is_recoverable());
        assert_eq!(
            err,
            LootError::NothingToLoot {
                position: Position::new(1, 1)
            }
        );
    }
}
