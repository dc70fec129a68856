//! Base damage strategies and difficulty tiers.

use super::damage::DamageProfile;

/// Difficulty selected once per run. Scales base damage.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum DifficultyTier {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyTier {
    /// Integer multiplier applied by [`DifficultyScaling`].
    pub const fn multiplier(self) -> i32 {
        match self {
            DifficultyTier::Easy => 1,
            DifficultyTier::Normal => 2,
            DifficultyTier::Hard => 3,
        }
    }
}

/// Raised when a raw tier value does not name a known tier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid difficulty tier: {0}")]
pub struct InvalidTier(pub u8);

impl TryFrom<u8> for DifficultyTier {
    type Error = InvalidTier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DifficultyTier::Easy),
            1 => Ok(DifficultyTier::Normal),
            2 => Ok(DifficultyTier::Hard),
            other => Err(InvalidTier(other)),
        }
    }
}

/// Maps a creature's base damage profile to a scalar damage value.
///
/// The engine holds the strategy as a trait object, so alternative curves can
/// be swapped in without touching creatures or actions.
pub trait DamageStrategy: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    fn calculate(&self, base: &DamageProfile, tier: DifficultyTier) -> i32;
}

/// Canonical strategy: sum of all base magnitudes times the tier multiplier.
#[derive(Clone, Copy, Debug, Default)]
pub struct DifficultyScaling;

impl DamageStrategy for DifficultyScaling {
    fn name(&self) -> &'static str {
        "difficulty-scaling"
    }

    fn calculate(&self, base: &DamageProfile, tier: DifficultyTier) -> i32 {
        let total = i32::try_from(base.total()).unwrap_or(i32::MAX);
        total.saturating_mul(tier.multiplier())
    }
}

/// Tier-independent strategy: the base profile total, unscaled.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatDamage;

impl DamageStrategy for FlatDamage {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn calculate(&self, base: &DamageProfile, _tier: DifficultyTier) -> i32 {
        i32::try_from(base.total()).unwrap_or(i32::MAX)
    }
}
