//! Creature roster loader.

use std::path::Path;

use serde::Deserialize;
use skirmish_core::{CreatureRoster, RosterEntry};

use crate::loaders::{DataFormat, LoadResult, read_data};

/// Roster file layout: a list of `creature` rows.
///
/// RON: `(creature: [(kind: Goblin, tier: Easy, base_health: 60, base_damage: {Physical: 6}), ...])`
/// TOML: one `[[creature]]` table per row.
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default, rename = "creature")]
    creatures: Vec<RosterEntry>,
}

/// Loader for per-kind, per-tier creature stats.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a `.ron` or `.toml` file.
    ///
    /// Two rows for the same kind and tier are rejected.
    pub fn load(path: &Path) -> LoadResult<CreatureRoster> {
        let file: RosterFile = read_data(path)?;
        let roster = Self::build(file)?;
        tracing::info!(path = %path.display(), entries = roster.len(), "creature roster loaded");
        Ok(roster)
    }

    /// Parse a roster from text in the given format.
    pub fn parse(format: DataFormat, content: &str) -> LoadResult<CreatureRoster> {
        Self::build(format.parse(content)?)
    }

    fn build(file: RosterFile) -> LoadResult<CreatureRoster> {
        Ok(CreatureRoster::from_entries(file.creatures)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use skirmish_core::{ConfigError, CreatureKind, DamageKind, DifficultyTier};

    use super::*;

    const ROSTER_TOML: &str = r#"
        [[creature]]
        kind = "Goblin"
        tier = "Easy"
        base_health = 60
        base_damage = { Physical = 6 }

        [[creature]]
        kind = "Goblin"
        tier = "Hard"
        base_health = 90
        base_damage = { Physical = 9, Poison = 2 }
    "#;

    #[test]
    fn parses_toml_rows() {
        let roster = RosterLoader::parse(DataFormat::Toml, ROSTER_TOML).unwrap();

        assert_eq!(roster.len(), 2);
        let hard = roster.get(CreatureKind::Goblin, DifficultyTier::Hard).unwrap();
        assert_eq!(hard.base_health, 90);
        assert_eq!(hard.base_damage.get(DamageKind::Poison), 2);
        assert!(roster.get(CreatureKind::Goblin, DifficultyTier::Normal).is_err());
    }

    #[test]
    fn parses_ron_rows() {
        let content = r#"(creature: [
            (kind: Orc, tier: Normal, base_health: 120, base_damage: {Physical: 12}),
        ])"#;

        let roster = RosterLoader::parse(DataFormat::Ron, content).unwrap();

        let orc = roster.get(CreatureKind::Orc, DifficultyTier::Normal).unwrap();
        assert_eq!(orc.base_damage.total(), 12);
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let content = r#"(creature: [
            (kind: Orc, tier: Normal, base_health: 120, base_damage: {}),
            (kind: Orc, tier: Normal, base_health: 80, base_damage: {}),
        ])"#;

        let err = RosterLoader::parse(DataFormat::Ron, content).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::DuplicateRosterEntry {
                kind: CreatureKind::Orc,
                tier: DifficultyTier::Normal,
            })
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(ROSTER_TOML.as_bytes()).unwrap();

        let roster = RosterLoader::load(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
    }
}
