use bitflags::bitflags;

/// Handle of a world object, assigned by [`super::World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

bitflags! {
    /// Interaction properties of a world object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectFlags: u8 {
        const LOOTABLE      = 1 << 0;
        const REMOVABLE     = 1 << 1;
        const WALKABLE      = 1 << 2;
        const BLOCKS_VISION = 1 << 3;
    }
}

impl Default for ObjectFlags {
    /// Loot containers: lootable, removable and walkable.
    fn default() -> Self {
        ObjectFlags::LOOTABLE | ObjectFlags::REMOVABLE | ObjectFlags::WALKABLE
    }
}

/// Non-creature entity placed on the grid (chests, rubble, ...).
///
/// Any item it carries lives in the world's association table, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldObject {
    name: String,
    flags: ObjectFlags,
}

impl WorldObject {
    pub fn new(name: impl Into<String>, flags: ObjectFlags) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }

    /// A lootable, removable, walkable container.
    pub fn chest(name: impl Into<String>) -> Self {
        Self::new(name, ObjectFlags::default())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> ObjectFlags {
        self.flags
    }

    pub fn is_lootable(&self) -> bool {
        self.flags.contains(ObjectFlags::LOOTABLE)
    }

    pub fn is_removable(&self) -> bool {
        self.flags.contains(ObjectFlags::REMOVABLE)
    }

    pub fn is_walkable(&self) -> bool {
        self.flags.contains(ObjectFlags::WALKABLE)
    }

    pub fn blocks_vision(&self) -> bool {
        self.flags.contains(ObjectFlags::BLOCKS_VISION)
    }
}
