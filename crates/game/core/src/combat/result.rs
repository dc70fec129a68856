//! Damage pipeline results.

use crate::creature::Creature;

use super::strategy::DamageStrategy;

/// Damage produced by an attacker before the defender mitigates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutgoingDamage {
    /// Strategy base damage.
    pub base: i32,
    /// Sum of equipped attack components.
    pub equipment: i32,
    /// Value after the attacker's modifier chain.
    pub modified: i32,
}

impl OutgoingDamage {
    /// Base plus equipment, before modifiers.
    pub fn raw(&self) -> i32 {
        self.base.saturating_add(self.equipment)
    }
}

/// What the defender did with an incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageReceipt {
    pub incoming: i32,
    /// Total defense across equipped defense items.
    pub defense: u32,
    /// HP actually lost, never negative.
    pub mitigated: i32,
    pub remaining_hp: i32,
}

/// Runs the outgoing half of the pipeline.
///
/// ```text
/// base      = strategy.calculate(attacker.base_damage, attacker.tier)
/// equipment = Σ attack_component.total_damage()
/// modified  = attacker.modifiers.notify(attacker, defender, base + equipment)
/// ```
pub fn compute_outgoing(
    strategy: &dyn DamageStrategy,
    attacker: &Creature,
    defender: &Creature,
) -> OutgoingDamage {
    let base = strategy.calculate(attacker.base_damage(), attacker.tier());
    let equipment = attacker.equipment_damage();
    let raw = base.saturating_add(equipment);
    let modified = attacker.modifiers().notify(attacker, defender, raw);

    OutgoingDamage {
        base,
        equipment,
        modified,
    }
}
