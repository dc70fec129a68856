use crate::combat::{DamageReceipt, OutgoingDamage, compute_outgoing};
use crate::creature::CreatureId;
use crate::error::{ErrorSeverity, GameError};
use crate::world::{CardinalDirection, World, WorldError};

use super::{ActionContext, ActionTransition};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error("no valid target to the {direction}")]
    NoTarget { direction: CardinalDirection },

    #[error(transparent)]
    World(#[from] WorldError),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AttackError::NoTarget { .. } => ErrorSeverity::Recoverable,
            AttackError::World(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AttackError::NoTarget { .. } => "ATTACK_NO_TARGET",
            AttackError::World(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub target: CreatureId,
    pub target_name: String,
    pub outgoing: OutgoingDamage,
    pub receipt: DamageReceipt,
}

/// Melee attack on the creature in the adjacent cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: CreatureId,
    pub direction: CardinalDirection,
}

impl AttackAction {
    pub fn new(actor: CreatureId, direction: CardinalDirection) -> Self {
        Self { actor, direction }
    }

    fn target(&self, world: &World) -> Result<CreatureId, AttackError> {
        let origin = world
            .position_of(self.actor)
            .ok_or(WorldError::UnknownCreature(self.actor))?;
        world
            .creature_in_direction(origin, self.direction)
            .ok_or(AttackError::NoTarget {
                direction: self.direction,
            })
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Output = AttackReport;

    fn actor(&self) -> CreatureId {
        self.actor
    }

    fn pre_validate(&self, world: &World, _ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        self.target(world).map(|_| ())
    }

    fn apply(&self, world: &mut World, ctx: &ActionContext<'_>) -> Result<AttackReport, AttackError> {
        let target = self.target(world)?;

        let attacker = world
            .creature(self.actor)
            .ok_or(WorldError::UnknownCreature(self.actor))?;
        let defender = world
            .creature(target)
            .ok_or(WorldError::UnknownCreature(target))?;
        let outgoing = compute_outgoing(ctx.strategy, attacker, defender);

        let defender = world
            .creature_mut(target)
            .ok_or(WorldError::UnknownCreature(target))?;
        let receipt = defender.receive_damage(outgoing.modified);

        tracing::debug!(
            attacker = %self.actor,
            target = %target,
            strategy = ctx.strategy.name(),
            base = outgoing.base,
            equipment = outgoing.equipment,
            modified = outgoing.modified,
            mitigated = receipt.mitigated,
            "attack resolved"
        );

        Ok(AttackReport {
            target,
            target_name: defender.name().to_owned(),
            outgoing,
            receipt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{
        DamageKind, DamageProfile, DifficultyScaling, DifficultyTier, FlatDamage, StatusEffect,
    };
    use crate::creature::{Creature, CreatureConfig, CreatureKind};
    use crate::item::Item;
    use crate::world::Position;

    fn arena(tier: DifficultyTier) -> (World, CreatureId, CreatureId) {
        let mut world = World::new(3, 3).unwrap();
        let player = Creature::new("Hero", CreatureConfig::defaults(CreatureKind::Player), tier);
        let enemy = Creature::new("Enemy", CreatureConfig::defaults(CreatureKind::Enemy), tier);
        let p = world.add_creature(player, Position::new(1, 1)).unwrap();
        let e = world.add_creature(enemy, Position::new(1, 0)).unwrap();
        (world, p, e)
    }

    #[test]
    fn hard_attack_upward_deals_thirty() {
        let (mut world, hero, enemy) = arena(DifficultyTier::Hard);
        let ctx = ActionContext::new(&DifficultyScaling);

        let report = AttackAction::new(hero, CardinalDirection::North)
            .apply(&mut world, &ctx)
            .unwrap();

        assert_eq!(report.target, enemy);
        assert_eq!(report.receipt.mitigated, 30);
        assert_eq!(world.creature(enemy).unwrap().hp(), 70);
    }

    #[test]
    fn defender_armor_mitigates() {
        let (mut world, hero, enemy) = arena(DifficultyTier::Hard);
        world
            .creature_mut(enemy)
            .unwrap()
            .equip_defense(Item::armor("Shield", "", DamageProfile::single(DamageKind::Physical, 5)));
        let ctx = ActionContext::new(&DifficultyScaling);

        AttackAction::new(hero, CardinalDirection::North)
            .apply(&mut world, &ctx)
            .unwrap();

        assert_eq!(world.creature(enemy).unwrap().hp(), 75);
    }

    #[test]
    fn attacker_modifiers_apply_to_outgoing() {
        let (mut world, hero, enemy) = arena(DifficultyTier::Easy);
        world
            .creature_mut(hero)
            .unwrap()
            .attach_modifier(Box::new(StatusEffect::Enraged { percent: 50 }));
        let ctx = ActionContext::new(&DifficultyScaling);

        let report = AttackAction::new(hero, CardinalDirection::North)
            .apply(&mut world, &ctx)
            .unwrap();

        assert_eq!(report.outgoing.modified, 15);
        assert_eq!(world.creature(enemy).unwrap().hp(), 85);
    }

    #[test]
    fn strategy_is_swappable() {
        let (mut world, hero, enemy) = arena(DifficultyTier::Hard);
        let ctx = ActionContext::new(&FlatDamage);

        AttackAction::new(hero, CardinalDirection::North)
            .apply(&mut world, &ctx)
            .unwrap();

        assert_eq!(world.creature(enemy).unwrap().hp(), 90);
    }

    #[test]
    fn empty_direction_has_no_target() {
        let (world, hero, _) = arena(DifficultyTier::Normal);
        let ctx = ActionContext::new(&DifficultyScaling);

        let err = AttackAction::new(hero, CardinalDirection::South)
            .pre_validate(&world, &ctx)
            .unwrap_err();

        assert!(err.severity().is_recoverable());
        assert_eq!(
            err,
            AttackError::NoTarget {
                direction: CardinalDirection::South
            }
        );
    }
}
