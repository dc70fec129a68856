//! Creatures: health, inventories, modifiers and damage intake.

mod behavior;

pub use behavior::{
    AdjacentCreature, AggressiveController, Behavior, BehaviorTable, Controller, InputSource,
    InteractiveController, Perception,
};

use crate::combat::{
    DamageKind, DamageProfile, DamageReceipt, DifficultyTier, EquipmentModifier, Modifier,
    ModifierChain,
};
use crate::item::{AttackComponent, Item, ItemCategory};
use crate::world::Position;

/// World-assigned creature handle. The player placed first gets id 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureId(pub u32);

impl CreatureId {
    pub const PLAYER: Self = Self(0);
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "creature#{}", self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureKind {
    Player,
    Enemy,
    Goblin,
    Orc,
    Troll,
}

impl CreatureKind {
    /// Which controller family drives this kind.
    pub const fn behavior(self) -> Behavior {
        match self {
            CreatureKind::Player => Behavior::Interactive,
            CreatureKind::Enemy | CreatureKind::Goblin | CreatureKind::Orc | CreatureKind::Troll => {
                Behavior::Aggressive
            }
        }
    }
}

/// Starting stats for one creature at one difficulty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureConfig {
    pub kind: CreatureKind,
    pub base_health: i32,
    pub base_damage: DamageProfile,
}

impl CreatureConfig {
    pub const DEFAULT_HEALTH: i32 = 100;
    pub const DEFAULT_PHYSICAL_DAMAGE: u32 = 10;

    pub fn new(kind: CreatureKind, base_health: i32, base_damage: DamageProfile) -> Self {
        Self {
            kind,
            base_health,
            base_damage,
        }
    }

    /// 100 HP and `{Physical: 10}`.
    pub fn defaults(kind: CreatureKind) -> Self {
        Self::new(
            kind,
            Self::DEFAULT_HEALTH,
            DamageProfile::single(DamageKind::Physical, Self::DEFAULT_PHYSICAL_DAMAGE),
        )
    }
}

#[derive(Debug)]
pub struct Creature {
    name: String,
    kind: CreatureKind,
    hp: i32,
    max_hp: i32,
    base_damage: DamageProfile,
    tier: DifficultyTier,
    position: Position,
    attack_items: Vec<AttackComponent>,
    defense_items: Vec<Item>,
    modifiers: ModifierChain,
}

impl Creature {
    pub fn new(name: impl Into<String>, config: CreatureConfig, tier: DifficultyTier) -> Self {
        Self {
            name: name.into(),
            kind: config.kind,
            hp: config.base_health,
            max_hp: config.base_health,
            base_damage: config.base_damage,
            tier,
            position: Position::ORIGIN,
            attack_items: Vec::new(),
            defense_items: Vec::new(),
            modifiers: ModifierChain::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn base_damage(&self) -> &DamageProfile {
        &self.base_damage
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Only [`crate::world::World`] moves creatures.
    pub(crate) fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    pub fn attack_items(&self) -> &[AttackComponent] {
        &self.attack_items
    }

    pub fn defense_items(&self) -> &[Item] {
        &self.defense_items
    }

    pub fn modifiers(&self) -> &ModifierChain {
        &self.modifiers
    }

    /// Sum of every equipped attack component, saturated into `i32`.
    pub fn equipment_damage(&self) -> i32 {
        let total = self
            .attack_items
            .iter()
            .fold(0u32, |acc, component| acc.saturating_add(component.total_damage()));
        i32::try_from(total).unwrap_or(i32::MAX)
    }

    /// Type-agnostic defense across every defense item. Defense layers on
    /// attack items are not counted.
    pub fn total_defense(&self) -> u32 {
        self.defense_items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.defense_profile().total()))
    }

    pub fn equip_attack(&mut self, component: AttackComponent) {
        self.attack_items.push(component);
    }

    pub fn equip_defense(&mut self, item: Item) {
        self.defense_items.push(item);
    }

    pub fn attach_modifier(&mut self, modifier: Box<dyn Modifier>) {
        self.modifiers.attach(modifier);
    }

    pub fn detach_modifier(&mut self, name: &str) -> Option<Box<dyn Modifier>> {
        self.modifiers.detach(name)
    }

    /// Equips a looted item by its base variant and attaches its observer.
    pub fn loot(&mut self, item: Item) -> ItemCategory {
        let category = item.category();
        let observer = EquipmentModifier::new(item.name(), category);
        match category {
            ItemCategory::Attack => self.equip_attack(AttackComponent::leaf(item)),
            ItemCategory::Defense => self.equip_defense(item),
        }
        self.modifiers.attach(Box::new(observer));
        category
    }

    /// Applies an incoming hit after flat defense. HP has no floor.
    pub fn receive_damage(&mut self, amount: i32) -> DamageReceipt {
        let defense = self.total_defense();
        let defense_i32 = i32::try_from(defense).unwrap_or(i32::MAX);
        let mitigated = amount.saturating_sub(defense_i32).max(0);
        self.hp = self.hp.saturating_sub(mitigated);

        tracing::debug!(
            creature = %self.name,
            incoming = amount,
            defense,
            mitigated,
            hp = self.hp,
            "damage received"
        );

        DamageReceipt {
            incoming: amount,
            defense,
            mitigated,
            remaining_hp: self.hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy() -> Creature {
        Creature::new(
            "Enemy",
            CreatureConfig::defaults(CreatureKind::Enemy),
            DifficultyTier::Hard,
        )
    }

    fn shield(amount: u32) -> Item {
        Item::armor("Shield", "", DamageProfile::single(DamageKind::Physical, amount))
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = CreatureConfig::defaults(CreatureKind::Player);
        assert_eq!(config.base_health, 100);
        assert_eq!(config.base_damage.get(DamageKind::Physical), 10);
    }

    #[test]
    fn only_player_is_interactive() {
        assert_eq!(CreatureKind::Player.behavior(), Behavior::Interactive);
        assert_eq!(CreatureKind::Troll.behavior(), Behavior::Aggressive);
    }

    #[test]
    fn defense_is_type_agnostic() {
        let mut creature = enemy();
        creature.equip_defense(shield(5));
        creature.equip_defense(
            Item::armor("Cloak", "", DamageProfile::single(DamageKind::Fire, 3))
                .with_defense(DamageKind::Ice, 2),
        );

        let receipt = creature.receive_damage(30);

        assert_eq!(receipt.defense, 10);
        assert_eq!(receipt.mitigated, 20);
        assert_eq!(creature.hp(), 80);
    }

    #[test]
    fn mitigation_never_heals() {
        let mut creature = enemy();
        creature.equip_defense(shield(50));

        let receipt = creature.receive_damage(10);

        assert_eq!(receipt.mitigated, 0);
        assert_eq!(creature.hp(), 100);
    }

    #[test]
    fn only_the_matching_inventory_counts_decorator_layers() {
        let mut creature = enemy();
        let warded_sword = Item::weapon("Sword", "", 15, DamageProfile::single(DamageKind::Physical, 8))
            .with_defense(DamageKind::Physical, 4);
        let spiked_shield = shield(5).with_damage(DamageKind::Physical, 3);

        creature.loot(warded_sword);
        creature.loot(spiked_shield);

        assert_eq!(creature.equipment_damage(), 8);
        assert_eq!(creature.total_defense(), 5);
        assert_eq!(creature.receive_damage(20).mitigated, 15);
    }

    #[test]
    fn hp_can_go_negative() {
        let mut creature = enemy();
        creature.receive_damage(130);
        assert_eq!(creature.hp(), -30);
        assert!(!creature.is_alive());
    }

    #[test]
    fn loot_routes_by_base_variant_and_attaches_observer() {
        let mut creature = enemy();

        let sword = Item::weapon("Sword", "", 15, DamageProfile::single(DamageKind::Physical, 8))
            .with_defense(DamageKind::Physical, 1);
        assert_eq!(creature.loot(sword), ItemCategory::Attack);
        assert_eq!(creature.loot(shield(5)), ItemCategory::Defense);

        assert_eq!(creature.attack_items().len(), 1);
        assert_eq!(creature.defense_items().len(), 1);
        assert_eq!(creature.equipment_damage(), 8);
        assert_eq!(creature.modifiers().names().collect::<Vec<_>>(), vec!["Sword", "Shield"]);
    }
}
