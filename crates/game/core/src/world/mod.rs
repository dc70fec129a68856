//! Spatial index: creatures, world objects and their grid positions.
//!
//! [`World`] owns every placed creature and object. Positions are only ever
//! written here, which keeps the two structural invariants local:
//!
//! - every stored position lies inside the grid
//! - no two creatures share a cell
//!
//! Queries are linear scans over the creature map. Worlds are small and the
//! scan keeps a single source of truth for positions.

mod error;
mod grid;
mod object;
mod snapshot;

pub use error::{MoveError, WorldError};
pub use grid::{CardinalDirection, GridDimensions, Position};
pub use object::{ObjectFlags, ObjectId, WorldObject};
pub use snapshot::{CreatureMarker, NullRenderer, ObjectMarker, RenderSink, WorldSnapshot};

use std::collections::{BTreeMap, BTreeSet};

use crate::creature::{Creature, CreatureId};
use crate::item::Item;

#[derive(Debug)]
pub struct World {
    dimensions: GridDimensions,
    obstacles: BTreeSet<Position>,
    creatures: BTreeMap<CreatureId, Creature>,
    next_creature: u32,
    objects: BTreeMap<ObjectId, WorldObject>,
    object_positions: BTreeMap<ObjectId, Position>,
    object_items: BTreeMap<ObjectId, Item>,
    next_object: u32,
}

impl World {
    /// Largest accepted width or height. Views allocate one entry per cell.
    pub const MAX_SIDE: u32 = 1024;

    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if !(1..=Self::MAX_SIDE).contains(&width) || !(1..=Self::MAX_SIDE).contains(&height) {
            return Err(WorldError::InvalidDimensions { width, height });
        }

        Ok(Self {
            dimensions: GridDimensions::new(width, height),
            obstacles: BTreeSet::new(),
            creatures: BTreeMap::new(),
            next_creature: 0,
            objects: BTreeMap::new(),
            object_positions: BTreeMap::new(),
            object_items: BTreeMap::new(),
            next_object: 0,
        })
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn is_within_bounds(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn check_bounds(&self, position: Position) -> Result<(), WorldError> {
        if self.is_within_bounds(position) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds {
                position,
                width: self.dimensions.width,
                height: self.dimensions.height,
            })
        }
    }

    // ------------------------------------------------------------------
    // Terrain
    // ------------------------------------------------------------------

    /// Marks a cell as an obstacle (or clears it). A creature's cell cannot
    /// become an obstacle.
    pub fn set_walkable(&mut self, position: Position, walkable: bool) -> Result<(), WorldError> {
        self.check_bounds(position)?;
        if !walkable && let Some(occupant) = self.creature_at(position) {
            return Err(WorldError::Occupied { position, occupant });
        }
        if walkable {
            self.obstacles.remove(&position);
        } else {
            self.obstacles.insert(position);
        }
        Ok(())
    }

    /// In bounds, not an obstacle and not covered by a non-walkable object.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.is_within_bounds(position)
            && !self.obstacles.contains(&position)
            && self
                .objects_at(position)
                .into_iter()
                .all(|id| self.objects.get(&id).is_some_and(WorldObject::is_walkable))
    }

    /// Walkable cells holding neither a creature nor an object, row-major.
    pub fn free_cells(&self) -> Vec<Position> {
        self.dimensions
            .cells()
            .filter(|&cell| {
                self.is_walkable(cell)
                    && self.creature_at(cell).is_none()
                    && self.objects_at(cell).is_empty()
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Creatures
    // ------------------------------------------------------------------

    /// Places a new creature and assigns its id.
    ///
    /// Out-of-bounds, blocked and occupied cells are all fatal here: placement
    /// comes from configuration, so a bad cell means a broken descriptor.
    pub fn add_creature(
        &mut self,
        mut creature: Creature,
        position: Position,
    ) -> Result<CreatureId, WorldError> {
        self.check_bounds(position)?;
        if !self.is_walkable(position) {
            return Err(WorldError::Blocked { position });
        }
        if let Some(occupant) = self.creature_at(position) {
            return Err(WorldError::Occupied { position, occupant });
        }

        let id = CreatureId(self.next_creature);
        self.next_creature += 1;
        creature.relocate(position);
        tracing::debug!(creature = %id, name = creature.name(), %position, "creature added");
        self.creatures.insert(id, creature);
        Ok(id)
    }

    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let removed = self.creatures.remove(&id);
        if removed.is_some() {
            tracing::debug!(creature = %id, "creature removed");
        }
        removed
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = (CreatureId, &Creature)> {
        self.creatures.iter().map(|(id, creature)| (*id, creature))
    }

    /// Ids in ascending order.
    pub fn creature_ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    pub fn position_of(&self, id: CreatureId) -> Option<Position> {
        self.creatures.get(&id).map(Creature::position)
    }

    /// The only way a placed creature changes cell.
    ///
    /// Rejections leave the world untouched.
    pub fn set_position(&mut self, id: CreatureId, destination: Position) -> Result<(), MoveError> {
        if !self.creatures.contains_key(&id) {
            return Err(WorldError::UnknownCreature(id).into());
        }
        if !self.is_within_bounds(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if !self.is_walkable(destination) {
            return Err(MoveError::Blocked { destination });
        }
        if let Some(occupant) = self.creature_at(destination).filter(|other| *other != id) {
            return Err(MoveError::Occupied {
                destination,
                occupant,
            });
        }

        let creature = self
            .creatures
            .get_mut(&id)
            .ok_or(WorldError::UnknownCreature(id))?;
        let origin = creature.position();
        creature.relocate(destination);
        tracing::debug!(creature = %id, from = %origin, to = %destination, "creature moved");
        Ok(())
    }

    /// Every creature on `position`. At most one while invariants hold.
    pub fn creatures_at(&self, position: Position) -> Vec<CreatureId> {
        self.creatures
            .iter()
            .filter(|(_, creature)| creature.position() == position)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn creature_at(&self, position: Position) -> Option<CreatureId> {
        self.creatures
            .iter()
            .find(|(_, creature)| creature.position() == position)
            .map(|(id, _)| *id)
    }

    /// Creature on the adjacent cell in `direction`, if any.
    pub fn creature_in_direction(
        &self,
        origin: Position,
        direction: CardinalDirection,
    ) -> Option<CreatureId> {
        let target = origin.step(direction);
        if !self.is_within_bounds(target) {
            return None;
        }
        self.creature_at(target)
    }

    /// True when the Euclidean distance between `a` and `b` is at most `range`.
    pub fn is_position_in_range(&self, a: Position, b: Position, range: u32) -> bool {
        let range = i64::from(range);
        a.distance_squared(b) <= range * range
    }

    // ------------------------------------------------------------------
    // Objects and items
    // ------------------------------------------------------------------

    pub fn add_world_object(
        &mut self,
        object: WorldObject,
        position: Position,
    ) -> Result<ObjectId, WorldError> {
        self.add_world_object_with_item(object, None, position)
    }

    /// Places an object, optionally carrying one item.
    ///
    /// A non-walkable object cannot cover a creature.
    pub fn add_world_object_with_item(
        &mut self,
        object: WorldObject,
        item: Option<Item>,
        position: Position,
    ) -> Result<ObjectId, WorldError> {
        self.check_bounds(position)?;
        if !object.is_walkable()
            && let Some(occupant) = self.creature_at(position)
        {
            return Err(WorldError::Occupied { position, occupant });
        }

        let id = ObjectId(self.next_object);
        self.next_object += 1;
        tracing::debug!(
            object = %id,
            name = object.name(),
            %position,
            item = item.as_ref().map(Item::name),
            "world object added"
        );
        self.objects.insert(id, object);
        self.object_positions.insert(id, position);
        if let Some(item) = item {
            self.object_items.insert(id, item);
        }
        Ok(id)
    }

    /// Removes an object and drops any item it still carries. No-op when absent.
    pub fn remove_world_object(&mut self, id: ObjectId) -> Option<WorldObject> {
        let object = self.objects.remove(&id)?;
        self.object_positions.remove(&id);
        self.object_items.remove(&id);
        tracing::debug!(object = %id, name = object.name(), "world object removed");
        Some(object)
    }

    /// Detaches and returns the object's item. No-op when absent.
    pub fn remove_item_from_world_object(&mut self, id: ObjectId) -> Option<Item> {
        self.object_items.remove(&id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    pub fn object_position(&self, id: ObjectId) -> Option<Position> {
        self.object_positions.get(&id).copied()
    }

    pub fn item_of(&self, id: ObjectId) -> Option<&Item> {
        self.object_items.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &WorldObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn objects_at(&self, position: Position) -> Vec<ObjectId> {
        self.object_positions
            .iter()
            .filter(|(_, at)| **at == position)
            .map(|(id, _)| *id)
            .collect()
    }

    /// First lootable object on `position`, by id.
    pub fn lootable_object_at(&self, position: Position) -> Option<ObjectId> {
        self.objects_at(position).into_iter().find(|id| {
            self.objects
                .get(id)
                .is_some_and(WorldObject::is_lootable)
        })
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Captures a frame for a render sink, marking `focus` as the acting creature.
    pub fn snapshot(&self, focus: Option<CreatureId>) -> WorldSnapshot {
        let walkable = self
            .dimensions
            .cells()
            .map(|cell| !self.obstacles.contains(&cell))
            .collect();

        let creatures = self
            .creatures
            .iter()
            .map(|(id, creature)| CreatureMarker {
                id: *id,
                name: creature.name().to_owned(),
                kind: creature.kind(),
                hp: creature.hp(),
                max_hp: creature.max_hp(),
                position: creature.position(),
                focused: Some(*id) == focus,
            })
            .collect();

        let objects = self
            .objects
            .iter()
            .filter_map(|(id, object)| {
                let position = self.object_positions.get(id).copied()?;
                Some(ObjectMarker {
                    id: *id,
                    name: object.name().to_owned(),
                    position,
                    has_item: self.object_items.contains_key(id),
                })
            })
            .collect();

        WorldSnapshot {
            dimensions: self.dimensions,
            walkable,
            creatures,
            objects,
        }
    }
}
