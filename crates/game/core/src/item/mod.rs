//! Items and equipment composition.
//!
//! Every [`Item`] reports a damage profile and a defense profile. Concrete
//! items are weapons (attack-capable leaves) and armor (defense-capable);
//! decorators wrap another item and add to exactly one of the two profiles
//! while delegating everything else to the wrapped layer.
//!
//! Items are owned values: whoever holds one (a creature inventory or a world
//! object association in [`crate::world::World`]) holds it exclusively.

mod catalog;
mod component;

pub use catalog::ItemCatalog;
pub use component::{AttackComponent, AttackGroup, CompositionError};

use crate::combat::{DamageKind, DamageProfile};

/// Which inventory an item lands in when looted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Attack,
    Defense,
}

/// Weapon: a leaf attack item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub name: String,
    pub description: String,
    /// Reach in tiles. Melee resolution only uses adjacency today.
    pub range: u32,
    pub damage: DamageProfile,
}

/// Armor: a defense item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Armor {
    pub name: String,
    pub description: String,
    pub defense: DamageProfile,
}

/// One decorator layer's contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boost {
    Damage { kind: DamageKind, amount: u32 },
    Defense { kind: DamageKind, amount: u32 },
}

/// Wrapper layer owning the item beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDecorator {
    inner: Box<Item>,
    boost: Boost,
}

impl ItemDecorator {
    pub fn inner(&self) -> &Item {
        &self.inner
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
    Decorated(ItemDecorator),
}

impl Item {
    pub fn weapon(
        name: impl Into<String>,
        description: impl Into<String>,
        range: u32,
        damage: DamageProfile,
    ) -> Self {
        Item::Weapon(Weapon {
            name: name.into(),
            description: description.into(),
            range,
            damage,
        })
    }

    pub fn armor(
        name: impl Into<String>,
        description: impl Into<String>,
        defense: DamageProfile,
    ) -> Self {
        Item::Armor(Armor {
            name: name.into(),
            description: description.into(),
            defense,
        })
    }

    /// Wraps this item in a new decorator layer.
    #[must_use]
    pub fn decorate(self, boost: Boost) -> Self {
        Item::Decorated(ItemDecorator {
            inner: Box::new(self),
            boost,
        })
    }

    #[must_use]
    pub fn with_damage(self, kind: DamageKind, amount: u32) -> Self {
        self.decorate(Boost::Damage { kind, amount })
    }

    #[must_use]
    pub fn with_defense(self, kind: DamageKind, amount: u32) -> Self {
        self.decorate(Boost::Defense { kind, amount })
    }

    /// The innermost, undecorated item.
    pub fn base(&self) -> &Item {
        let mut current = self;
        while let Item::Decorated(decorator) = current {
            current = &decorator.inner;
        }
        current
    }

    /// Number of decorator layers around the base item.
    pub fn layers(&self) -> usize {
        let mut count = 0;
        let mut current = self;
        while let Item::Decorated(decorator) = current {
            count += 1;
            current = &decorator.inner;
        }
        count
    }

    pub fn name(&self) -> &str {
        self.identity().0
    }

    pub fn description(&self) -> &str {
        self.identity().1
    }

    fn identity(&self) -> (&str, &str) {
        match self {
            Item::Weapon(weapon) => (&weapon.name, &weapon.description),
            Item::Armor(armor) => (&armor.name, &armor.description),
            Item::Decorated(decorator) => decorator.inner.identity(),
        }
    }

    /// Classification by base variant; decorators never change it.
    pub fn category(&self) -> ItemCategory {
        match self {
            Item::Weapon(_) => ItemCategory::Attack,
            Item::Armor(_) => ItemCategory::Defense,
            Item::Decorated(decorator) => decorator.inner.category(),
        }
    }

    /// Weapon reach, `None` for armor.
    pub fn range(&self) -> Option<u32> {
        match self {
            Item::Weapon(weapon) => Some(weapon.range),
            Item::Armor(_) => None,
            Item::Decorated(decorator) => decorator.inner.range(),
        }
    }

    /// Damage contribution including every damage decorator layer.
    pub fn damage_profile(&self) -> DamageProfile {
        match self {
            Item::Weapon(weapon) => weapon.damage.clone(),
            Item::Armor(_) => DamageProfile::new(),
            Item::Decorated(decorator) => {
                let mut profile = decorator.inner.damage_profile();
                if let Boost::Damage { kind, amount } = decorator.boost {
                    profile.add(kind, amount);
                }
                profile
            }
        }
    }

    /// Defense contribution including every defense decorator layer.
    pub fn defense_profile(&self) -> DamageProfile {
        match self {
            Item::Weapon(_) => DamageProfile::new(),
            Item::Armor(armor) => armor.defense.clone(),
            Item::Decorated(decorator) => {
                let mut profile = decorator.inner.defense_profile();
                if let Boost::Defense { kind, amount } = decorator.boost {
                    profile.add(kind, amount);
                }
                profile
            }
        }
    }
}
