//! Per-kind, per-difficulty creature stats.

use std::collections::BTreeMap;

use crate::combat::{DamageProfile, DifficultyTier};
use crate::creature::{CreatureConfig, CreatureKind};

use super::ConfigError;

/// One roster row as it appears in data files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub kind: CreatureKind,
    pub tier: DifficultyTier,
    pub base_health: i32,
    pub base_damage: DamageProfile,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreatureRoster {
    entries: BTreeMap<(CreatureKind, DifficultyTier), CreatureConfig>,
}

impl CreatureRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster, rejecting two rows for the same kind and tier.
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Result<Self, ConfigError> {
        let mut roster = Self::new();
        for entry in entries {
            let key = (entry.kind, entry.tier);
            if roster.entries.contains_key(&key) {
                return Err(ConfigError::DuplicateRosterEntry {
                    kind: entry.kind,
                    tier: entry.tier,
                });
            }
            roster.insert(
                entry.tier,
                CreatureConfig::new(entry.kind, entry.base_health, entry.base_damage),
            );
        }
        Ok(roster)
    }

    pub fn insert(&mut self, tier: DifficultyTier, config: CreatureConfig) {
        self.entries.insert((config.kind, tier), config);
    }

    pub fn get(&self, kind: CreatureKind, tier: DifficultyTier) -> Result<&CreatureConfig, ConfigError> {
        self.entries
            .get(&(kind, tier))
            .ok_or(ConfigError::MissingRosterEntry { kind, tier })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageKind;

    fn entry(kind: CreatureKind, tier: DifficultyTier, health: i32) -> RosterEntry {
        RosterEntry {
            kind,
            tier,
            base_health: health,
            base_damage: DamageProfile::single(DamageKind::Physical, 4),
        }
    }

    #[test]
    fn lookup_by_kind_and_tier() {
        let roster = CreatureRoster::from_entries([
            entry(CreatureKind::Goblin, DifficultyTier::Easy, 30),
            entry(CreatureKind::Goblin, DifficultyTier::Hard, 60),
        ])
        .unwrap();

        assert_eq!(
            roster
                .get(CreatureKind::Goblin, DifficultyTier::Hard)
                .unwrap()
                .base_health,
            60
        );
        assert_eq!(
            roster.get(CreatureKind::Goblin, DifficultyTier::Normal),
            Err(ConfigError::MissingRosterEntry {
                kind: CreatureKind::Goblin,
                tier: DifficultyTier::Normal,
            })
        );
    }

    #[test]
    fn duplicate_rows_are_rejected() {
        let err = CreatureRoster::from_entries([
            entry(CreatureKind::Orc, DifficultyTier::Normal, 80),
            entry(CreatureKind::Orc, DifficultyTier::Normal, 90),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::DuplicateRosterEntry { .. }));
    }
}
