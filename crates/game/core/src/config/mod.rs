//! World descriptors and the scenario builder.
//!
//! A [`WorldDescriptor`] is the data-file view of a starting world: grid size,
//! difficulty, obstacles, creatures and objects. [`ScenarioBuilder`] validates
//! it and produces a populated [`crate::world::World`]. Loading descriptors
//! from disk lives in the content crate; this module only defines the shapes
//! (deserializable with the `serde` feature) and the rules.

mod builder;
mod error;
mod roster;

pub use builder::{Scenario, ScenarioBuilder};
pub use error::ConfigError;
pub use roster::{CreatureRoster, RosterEntry};

use crate::combat::{DamageKind, DamageProfile, DifficultyTier};
use crate::creature::CreatureKind;
use crate::item::{Boost, Item, ItemCatalog, ItemCategory};
use crate::world::{ObjectFlags, Position};

#[cfg(feature = "serde")]
fn yes() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_difficulty() -> String {
    DifficultyTier::default().to_string()
}

#[cfg(feature = "serde")]
fn default_range() -> u32 {
    ItemSpec::DEFAULT_RANGE
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

/// Complete starting world.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldDescriptor {
    pub size: GridSize,
    /// Tier name, parsed case-insensitively.
    #[cfg_attr(feature = "serde", serde(default = "default_difficulty"))]
    pub difficulty: String,
    /// Seed for random placement and enemy wandering.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    /// Cells that are not walkable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub creatures: Vec<CreaturePlacement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: Vec<ObjectPlacement>,
}

impl WorldDescriptor {
    pub fn new(width: u32, height: u32, difficulty: DifficultyTier) -> Self {
        Self {
            size: GridSize { width, height },
            difficulty: difficulty.to_string(),
            seed: 0,
            obstacles: Vec::new(),
            creatures: Vec::new(),
            objects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_creature(mut self, placement: CreaturePlacement) -> Self {
        self.creatures.push(placement);
        self
    }

    #[must_use]
    pub fn with_object(mut self, placement: ObjectPlacement) -> Self {
        self.objects.push(placement);
        self
    }

    #[must_use]
    pub fn with_obstacle(mut self, position: Position) -> Self {
        self.obstacles.push(position);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn tier(&self) -> Result<DifficultyTier, ConfigError> {
        self.difficulty
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnknownDifficulty(self.difficulty.clone()))
    }
}

/// Explicit stats that win over roster entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatOverride {
    #[cfg_attr(feature = "serde", serde(default))]
    pub health: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<DamageProfile>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreaturePlacement {
    pub kind: CreatureKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Marks the interactive player. Exactly one placement must set it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    /// Place on a random free cell instead of `position`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub random: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: StatOverride,
}

impl CreaturePlacement {
    /// Player start when the descriptor gives none.
    pub const DEFAULT_PLAYER_POSITION: Position = Position::new(1, 1);

    pub fn player(name: impl Into<String>) -> Self {
        Self {
            kind: CreatureKind::Player,
            name: Some(name.into()),
            player: true,
            position: None,
            random: false,
            stats: StatOverride::default(),
        }
    }

    pub fn creature(kind: CreatureKind) -> Self {
        Self {
            kind,
            name: None,
            player: false,
            position: None,
            random: false,
            stats: StatOverride::default(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    #[must_use]
    pub fn randomly(mut self) -> Self {
        self.random = true;
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.stats.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: DamageProfile) -> Self {
        self.stats.damage = Some(damage);
        self
    }

    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.kind.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectPlacement {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub random: bool,
    #[cfg_attr(feature = "serde", serde(default = "yes"))]
    pub lootable: bool,
    #[cfg_attr(feature = "serde", serde(default = "yes"))]
    pub removable: bool,
    #[cfg_attr(feature = "serde", serde(default = "yes"))]
    pub walkable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocks_vision: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<ItemSpec>,
}

impl ObjectPlacement {
    /// A lootable, removable, walkable object.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            random: false,
            lootable: true,
            removable: true,
            walkable: true,
            blocks_vision: false,
            item: None,
        }
    }

    #[must_use]
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    #[must_use]
    pub fn randomly(mut self) -> Self {
        self.random = true;
        self
    }

    #[must_use]
    pub fn holding(mut self, item: ItemSpec) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Creatures can neither enter nor stand under it.
    #[must_use]
    pub fn solid(mut self) -> Self {
        self.walkable = false;
        self
    }

    pub fn flags(&self) -> ObjectFlags {
        let mut flags = ObjectFlags::empty();
        flags.set(ObjectFlags::LOOTABLE, self.lootable);
        flags.set(ObjectFlags::REMOVABLE, self.removable);
        flags.set(ObjectFlags::WALKABLE, self.walkable);
        flags.set(ObjectFlags::BLOCKS_VISION, self.blocks_vision);
        flags
    }
}

/// Which profile an enchantment layer adds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnchantTarget {
    Damage,
    Defense,
}

/// One decorator layer in an item spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enchant {
    pub target: EnchantTarget,
    pub kind: DamageKind,
    pub amount: u32,
}

impl Enchant {
    /// Attack items only count damage and defense items only count defense.
    fn applies_to(self, category: ItemCategory) -> bool {
        matches!(
            (self.target, category),
            (EnchantTarget::Damage, ItemCategory::Attack)
                | (EnchantTarget::Defense, ItemCategory::Defense)
        )
    }

    fn boost(self) -> Boost {
        match self.target {
            EnchantTarget::Damage => Boost::Damage {
                kind: self.kind,
                amount: self.amount,
            },
            EnchantTarget::Defense => Boost::Defense {
                kind: self.kind,
                amount: self.amount,
            },
        }
    }
}

/// Item as written in a descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSpec {
    Attack {
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        description: String,
        #[cfg_attr(feature = "serde", serde(default = "default_range"))]
        range: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage: DamageProfile,
        #[cfg_attr(feature = "serde", serde(default))]
        enchantments: Vec<Enchant>,
    },
    Defense {
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        description: String,
        #[cfg_attr(feature = "serde", serde(default))]
        defense: DamageProfile,
        #[cfg_attr(feature = "serde", serde(default))]
        enchantments: Vec<Enchant>,
    },
    /// A catalog item by name.
    Preset {
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        enchantments: Vec<Enchant>,
    },
}

impl ItemSpec {
    pub const DEFAULT_RANGE: u32 = 5;

    pub fn attack(name: impl Into<String>, damage: DamageProfile) -> Self {
        ItemSpec::Attack {
            name: name.into(),
            description: String::new(),
            range: Self::DEFAULT_RANGE,
            damage,
            enchantments: Vec::new(),
        }
    }

    pub fn defense(name: impl Into<String>, defense: DamageProfile) -> Self {
        ItemSpec::Defense {
            name: name.into(),
            description: String::new(),
            defense,
            enchantments: Vec::new(),
        }
    }

    pub fn preset(name: impl Into<String>) -> Self {
        ItemSpec::Preset {
            name: name.into(),
            enchantments: Vec::new(),
        }
    }

    #[must_use]
    pub fn enchanted(mut self, enchant: Enchant) -> Self {
        match &mut self {
            ItemSpec::Attack { enchantments, .. }
            | ItemSpec::Defense { enchantments, .. }
            | ItemSpec::Preset { enchantments, .. } => enchantments.push(enchant),
        }
        self
    }

    /// Materializes the item, wrapping one decorator per enchantment in order.
    pub fn build(&self, catalog: &ItemCatalog) -> Result<Item, ConfigError> {
        let (base, enchantments) = match self {
            ItemSpec::Attack {
                name,
                description,
                range,
                damage,
                enchantments,
            } => (
                Item::weapon(name.as_str(), description.as_str(), *range, damage.clone()),
                enchantments,
            ),
            ItemSpec::Defense {
                name,
                description,
                defense,
                enchantments,
            } => (
                Item::armor(name.as_str(), description.as_str(), defense.clone()),
                enchantments,
            ),
            ItemSpec::Preset { name, enchantments } => (catalog.create(name)?, enchantments),
        };

        let category = base.category();
        if let Some(enchant) = enchantments.iter().find(|e| !e.applies_to(category)) {
            return Err(ConfigError::MismatchedEnchantment {
                item: base.name().to_owned(),
                category,
                target: enchant.target,
            });
        }

        Ok(enchantments
            .iter()
            .fold(base, |item, enchant| item.decorate(enchant.boost())))
    }
}
