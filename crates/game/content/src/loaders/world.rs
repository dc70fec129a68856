//! World descriptor loader.

use std::path::Path;

use anyhow::Context;
use skirmish_core::WorldDescriptor;

use crate::loaders::{DataFormat, LoadResult, read_data};

/// Loader for starting worlds.
pub struct WorldLoader;

impl WorldLoader {
    /// Load a world descriptor from a `.ron` or `.toml` file.
    ///
    /// Only the syntax is checked here; the difficulty name and placements
    /// are validated when the descriptor is built into a scenario.
    pub fn load(path: &Path) -> LoadResult<WorldDescriptor> {
        let descriptor: WorldDescriptor = read_data(path)?;
        tracing::info!(
            path = %path.display(),
            width = descriptor.size.width,
            height = descriptor.size.height,
            creatures = descriptor.creatures.len(),
            objects = descriptor.objects.len(),
            "world descriptor loaded"
        );
        Ok(descriptor)
    }

    /// Parse a descriptor from text in the given format.
    pub fn parse(format: DataFormat, content: &str) -> LoadResult<WorldDescriptor> {
        format
            .parse(content)
            .context("Failed to parse world descriptor")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use skirmish_core::{CreatureKind, DamageKind, ItemSpec, Position};

    use super::*;

    const ARENA_RON: &str = r#"(
        size: (width: 5, height: 4),
        difficulty: "hard",
        seed: 11,
        obstacles: [(x: 2, y: 2)],
        creatures: [
            (kind: Player, name: Some("Hero"), player: true),
            (kind: Goblin, position: Some((x: 4, y: 0)), stats: (health: Some(40))),
            (kind: Orc, random: true),
        ],
        objects: [
            (name: "Chest", position: Some((x: 0, y: 3)), item: Some(Preset(name: "Sword"))),
        ],
    )"#;

    const ARENA_TOML: &str = r#"
        difficulty = "Easy"

        [size]
        width = 3
        height = 3

        [[creatures]]
        kind = "Player"
        player = true

        [[creatures]]
        kind = "Troll"
        position = { x = 2, y = 0 }
        stats = { damage = { Fire = 4 } }

        [[objects]]
        name = "Crate"
        random = true
        removable = false
        item = { Defense = { name = "Buckler", defense = { Physical = 3 } } }
    "#;

    #[test]
    fn parses_ron_descriptor() {
        let descriptor = WorldLoader::parse(DataFormat::Ron, ARENA_RON).unwrap();

        assert_eq!(descriptor.size.width, 5);
        assert_eq!(descriptor.seed, 11);
        assert_eq!(descriptor.obstacles, vec![Position::new(2, 2)]);
        assert_eq!(descriptor.creatures.len(), 3);
        assert!(descriptor.creatures[0].player);
        assert_eq!(descriptor.creatures[1].stats.health, Some(40));
        assert!(descriptor.creatures[2].random);
        assert_eq!(descriptor.objects[0].item, Some(ItemSpec::preset("Sword")));
        assert!(descriptor.objects[0].lootable);
        assert!(descriptor.objects[0].removable);
        assert_eq!(
            descriptor.tier().unwrap(),
            skirmish_core::DifficultyTier::Hard
        );
    }

    #[test]
    fn parses_toml_descriptor_with_defaults() {
        let descriptor = WorldLoader::parse(DataFormat::Toml, ARENA_TOML).unwrap();

        assert_eq!(descriptor.seed, 0);
        assert!(descriptor.obstacles.is_empty());
        assert_eq!(descriptor.creatures[1].kind, CreatureKind::Troll);
        let damage = descriptor.creatures[1].stats.damage.as_ref().unwrap();
        assert_eq!(damage.get(DamageKind::Fire), 4);
        assert!(!descriptor.objects[0].removable);
        assert!(descriptor.objects[0].walkable);
    }

    #[test]
    fn loads_from_disk_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(ARENA_TOML.as_bytes()).unwrap();

        let descriptor = WorldLoader::load(file.path()).unwrap();
        assert_eq!(descriptor.size.height, 3);
    }

    #[test]
    fn wrong_syntax_for_extension_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(ARENA_RON.as_bytes()).unwrap();

        let err = WorldLoader::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid data"));
    }
}
