//! Outgoing damage modifiers.
//!
//! Every creature owns a [`ModifierChain`]. When it attacks, the raw damage is
//! threaded through its chain in insertion order and the result is what the
//! defender receives. Clamping is the job of each modifier, never the chain's.

use crate::creature::Creature;
use crate::item::ItemCategory;

/// Observer that may adjust a damage value on its way to the defender.
///
/// Implementations must not mutate world or creature state. When the
/// computation is undefined for the given inputs (overflow, division by zero)
/// the input must be returned unchanged so the chain never aborts.
pub trait Modifier: std::fmt::Debug + Send + Sync {
    /// Name used for detaching and diagnostics.
    fn name(&self) -> &str;

    fn apply(&self, attacker: &Creature, defender: &Creature, damage: i32) -> i32;
}

/// Ordered collection of modifiers attached to one creature.
#[derive(Debug, Default)]
pub struct ModifierChain {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a modifier; it runs after every modifier already attached.
    pub fn attach(&mut self, modifier: Box<dyn Modifier>) {
        tracing::debug!(modifier = modifier.name(), "modifier attached");
        self.modifiers.push(modifier);
    }

    /// Removes the first modifier with the given name.
    pub fn detach(&mut self, name: &str) -> Option<Box<dyn Modifier>> {
        let index = self.modifiers.iter().position(|m| m.name() == name)?;
        tracing::debug!(modifier = name, "modifier detached");
        Some(self.modifiers.remove(index))
    }

    /// Threads `damage` through every modifier, left to right.
    pub fn notify(&self, attacker: &Creature, defender: &Creature, damage: i32) -> i32 {
        self.modifiers.iter().fold(damage, |current, modifier| {
            let next = modifier.apply(attacker, defender, current);
            tracing::debug!(
                modifier = modifier.name(),
                before = current,
                after = next,
                "modifier applied"
            );
            next
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modifiers.iter().map(|m| m.name())
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

// ============================================================================
// Built-in modifiers
// ============================================================================

/// Observer attached for an equipped item.
///
/// The item's own profile is already part of the attacker's raw damage (attack
/// items) or of the holder's mitigation (defense items), so the observer passes
/// the value through. It does not own the item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipmentModifier {
    item_name: String,
    category: ItemCategory,
}

impl EquipmentModifier {
    pub fn new(item_name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            item_name: item_name.into(),
            category,
        }
    }

    pub fn category(&self) -> ItemCategory {
        self.category
    }
}

impl Modifier for EquipmentModifier {
    fn name(&self) -> &str {
        &self.item_name
    }

    fn apply(&self, attacker: &Creature, defender: &Creature, damage: i32) -> i32 {
        tracing::trace!(
            item = %self.item_name,
            category = ?self.category,
            attacker = attacker.name(),
            defender = defender.name(),
            damage,
            "equipment observed outgoing damage"
        );
        damage
    }
}

/// Temporary conditions that scale outgoing damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    /// Adds a flat amount.
    Empowered(u32),
    /// Subtracts a flat amount, never below zero.
    Weakened(u32),
    /// Adds `percent`% of the current value (rounded down).
    Enraged { percent: u32 },
}

impl Modifier for StatusEffect {
    fn name(&self) -> &str {
        match self {
            StatusEffect::Empowered(_) => "empowered",
            StatusEffect::Weakened(_) => "weakened",
            StatusEffect::Enraged { .. } => "enraged",
        }
    }

    fn apply(&self, _attacker: &Creature, _defender: &Creature, damage: i32) -> i32 {
        match *self {
            StatusEffect::Empowered(bonus) => i32::try_from(bonus)
                .ok()
                .and_then(|bonus| damage.checked_add(bonus))
                .unwrap_or(damage),
            StatusEffect::Weakened(penalty) => i32::try_from(penalty)
                .ok()
                .and_then(|penalty| damage.checked_sub(penalty))
                .map(|value| value.max(0))
                .unwrap_or(damage),
            StatusEffect::Enraged { percent } => i32::try_from(percent)
                .ok()
                .and_then(|percent| percent.checked_add(100))
                .and_then(|factor| damage.checked_mul(factor))
                .map(|scaled| scaled / 100)
                .unwrap_or(damage),
        }
    }
}
