//! Damage kinds and per-kind magnitude profiles.

use std::collections::BTreeMap;

// ============================================================================
// Damage Kind
// ============================================================================

/// Damage type carried by base damage, weapons and armor.
///
/// Mitigation is type-agnostic today; the kind is kept so profiles can be
/// inspected and rendered per element.
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
pub enum DamageKind {
    /// Physical damage (blades, claws, blunt force).
    Physical,
    /// Fire damage (burns, explosions).
    Fire,
    /// Ice damage (frost, cold).
    Ice,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
}

// ============================================================================
// Damage Profile
// ============================================================================

/// Non-negative magnitude per [`DamageKind`].
///
/// Used both for "damage by type" (creatures, weapons) and "defense by type"
/// (armor). Adding to a kind that is already present accumulates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DamageProfile {
    values: BTreeMap<DamageKind, u32>,
}

impl DamageProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a profile holding a single kind.
    pub fn single(kind: DamageKind, amount: u32) -> Self {
        let mut profile = Self::new();
        profile.add(kind, amount);
        profile
    }

    /// Builder-style variant of [`DamageProfile::add`].
    #[must_use]
    pub fn with(mut self, kind: DamageKind, amount: u32) -> Self {
        self.add(kind, amount);
        self
    }

    /// Adds `amount` to `kind`, accumulating with any existing value.
    pub fn add(&mut self, kind: DamageKind, amount: u32) {
        let slot = self.values.entry(kind).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Adds every entry of `other` into this profile.
    pub fn merge(&mut self, other: &DamageProfile) {
        for (kind, amount) in other.iter() {
            self.add(kind, amount);
        }
    }

    /// Returns the magnitude for `kind` (zero when absent).
    pub fn get(&self, kind: DamageKind) -> u32 {
        self.values.get(&kind).copied().unwrap_or(0)
    }

    /// Sum of all magnitudes.
    pub fn total(&self) -> u32 {
        self.values
            .values()
            .fold(0u32, |acc, value| acc.saturating_add(*value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates entries in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (DamageKind, u32)> + '_ {
        self.values.iter().map(|(kind, amount)| (*kind, *amount))
    }
}

impl FromIterator<(DamageKind, u32)> for DamageProfile {
    fn from_iter<T: IntoIterator<Item = (DamageKind, u32)>>(iter: T) -> Self {
        let mut profile = Self::new();
        for (kind, amount) in iter {
            profile.add(kind, amount);
        }
        profile
    }
}

impl std::fmt::Display for DamageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (kind, amount)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}: {amount}")?;
        }
        write!(f, "}}")
    }
}
