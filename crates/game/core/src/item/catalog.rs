//! Named item presets.

use crate::combat::{DamageKind, DamageProfile};
use crate::config::ConfigError;

use super::Item;

/// Factory of named items. Every `create` returns a fresh, owned copy.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    presets: Vec<Item>,
}

impl ItemCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock armory: Sword, Axe, Bow, Shield and Armor.
    pub fn standard() -> Self {
        let physical = |amount| DamageProfile::single(DamageKind::Physical, amount);

        let mut catalog = Self::empty();
        catalog.register(Item::weapon("Sword", "A sharp blade.", 15, physical(8)));
        catalog.register(Item::weapon(
            "Axe",
            "A heavy axe with immense power.",
            20,
            physical(12),
        ));
        catalog.register(Item::weapon("Bow", "A long-range bow.", 10, physical(6)));
        catalog.register(Item::armor("Shield", "A sturdy shield.", physical(5)));
        catalog.register(Item::armor(
            "Armor",
            "Heavy armor for maximum protection.",
            physical(8),
        ));
        catalog
    }

    /// Adds or replaces a preset keyed by its name.
    pub fn register(&mut self, item: Item) {
        match self.position(item.name()) {
            Some(index) => self.presets[index] = item,
            None => self.presets.push(item),
        }
    }

    /// Case-insensitive lookup.
    pub fn create(&self, name: &str) -> Result<Item, ConfigError> {
        self.position(name)
            .and_then(|index| self.presets.get(index))
            .cloned()
            .ok_or_else(|| ConfigError::UnknownItem(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(Item::name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.presets
            .iter()
            .position(|item| item.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;

    #[test]
    fn standard_presets() {
        let catalog = ItemCatalog::standard();

        let sword = catalog.create("Sword").unwrap();
        assert_eq!(sword.range(), Some(15));
        assert_eq!(catalog.create("axe").unwrap().range(), Some(20));
        assert_eq!(catalog.create("Bow").unwrap().range(), Some(10));
        assert_eq!(
            catalog.create("Shield").unwrap().category(),
            ItemCategory::Defense
        );
        assert_eq!(catalog.names().count(), 5);
    }

    #[test]
    fn unknown_name_is_config_error() {
        let err = ItemCatalog::standard().create("Halberd").unwrap_err();
        assert_eq!(err, ConfigError::UnknownItem("Halberd".into()));
    }

    #[test]
    fn register_replaces_same_name() {
        let mut catalog = ItemCatalog::standard();
        catalog.register(Item::weapon(
            "sword",
            "",
            3,
            DamageProfile::single(DamageKind::Fire, 1),
        ));

        assert_eq!(catalog.names().count(), 5);
        assert_eq!(catalog.create("Sword").unwrap().range(), Some(3));
    }
}
