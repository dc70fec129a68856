use proptest::prelude::*;

use skirmish_core::{
    ActionContext, ActionTransition, AttackComponent, CardinalDirection, Creature, CreatureConfig,
    CreatureKind, DamageKind, DamageProfile, DamageStrategy, DifficultyScaling, DifficultyTier,
    Item, LootAction, ObjectFlags, Position, StatusEffect, World, WorldObject,
};

fn sword(damage: u32) -> AttackComponent {
    AttackComponent::leaf(Item::weapon(
        format!("blade-{damage}"),
        "",
        5,
        DamageProfile::single(DamageKind::Physical, damage),
    ))
}

fn creature(name: &str) -> Creature {
    Creature::new(
        name,
        CreatureConfig::defaults(CreatureKind::Enemy),
        DifficultyTier::Normal,
    )
}

fn direction() -> impl Strategy<Value = CardinalDirection> {
    prop::sample::select(CardinalDirection::ALL.to_vec())
}

proptest! {
    #[test]
    fn harder_tiers_never_hit_softer(physical in 0u32..10_000, fire in 0u32..10_000) {
        let base = DamageProfile::new()
            .with(DamageKind::Physical, physical)
            .with(DamageKind::Fire, fire);
        let easy = DifficultyScaling.calculate(&base, DifficultyTier::Easy);
        let normal = DifficultyScaling.calculate(&base, DifficultyTier::Normal);
        let hard = DifficultyScaling.calculate(&base, DifficultyTier::Hard);
        prop_assert!(easy <= normal);
        prop_assert!(normal <= hard);
    }

    #[test]
    fn group_damage_ignores_child_order(damages in prop::collection::vec(0u32..1_000, 0..8)) {
        let forward = AttackComponent::group_of(
            "forward",
            damages.iter().copied().map(sword).collect(),
        );
        let backward = AttackComponent::group_of(
            "backward",
            damages.iter().rev().copied().map(sword).collect(),
        );
        let expected: u32 = damages.iter().sum();
        prop_assert_eq!(forward.total_damage(), expected);
        prop_assert_eq!(backward.total_damage(), expected);
    }

    #[test]
    fn modifier_chain_is_deterministic(
        damage in 0i32..10_000,
        bonus in 0u32..500,
        percent in 0u32..200,
    ) {
        let mut attacker = creature("attacker");
        let defender = creature("defender");
        attacker.attach_modifier(Box::new(StatusEffect::Empowered(bonus)));
        attacker.attach_modifier(Box::new(StatusEffect::Enraged { percent }));

        let first = attacker.modifiers().notify(&attacker, &defender, damage);
        let second = attacker.modifiers().notify(&attacker, &defender, damage);
        prop_assert_eq!(first, second);
        prop_assert!(first >= damage);
    }

    #[test]
    fn mitigation_is_never_negative(incoming in -1_000i32..1_000, armor in 0u32..500) {
        let mut target = creature("target");
        target.equip_defense(Item::armor(
            "plate",
            "",
            DamageProfile::single(DamageKind::Physical, armor),
        ));
        let before = target.hp();

        let receipt = target.receive_damage(incoming);

        prop_assert!(receipt.mitigated >= 0);
        prop_assert_eq!(receipt.remaining_hp, before - receipt.mitigated);
        prop_assert!(receipt.remaining_hp <= before);
    }

    #[test]
    fn moves_never_stack_creatures(
        steps in prop::collection::vec((0usize..3, direction()), 0..40),
    ) {
        let mut world = World::new(4, 4).unwrap();
        let ids = [
            world.add_creature(creature("a"), Position::new(0, 0)).unwrap(),
            world.add_creature(creature("b"), Position::new(1, 0)).unwrap(),
            world.add_creature(creature("c"), Position::new(0, 1)).unwrap(),
        ];

        for (index, direction) in steps {
            let id = ids[index];
            let from = world.position_of(id).unwrap();
            let to = from.step(direction);
            if world.set_position(id, to).is_err() {
                prop_assert_eq!(world.position_of(id), Some(from));
            }

            let mut cells: Vec<Position> =
                ids.iter().filter_map(|id| world.position_of(*id)).collect();
            cells.sort();
            cells.dedup();
            prop_assert_eq!(cells.len(), ids.len());
            prop_assert!(cells.iter().all(|cell| world.is_within_bounds(*cell)));
        }
    }

    #[test]
    fn loot_moves_exactly_one_item(with_item in any::<bool>(), removable in any::<bool>()) {
        let mut world = World::new(3, 3).unwrap();
        let actor = world.add_creature(creature("looter"), Position::new(1, 1)).unwrap();
        let mut flags = ObjectFlags::default();
        flags.set(ObjectFlags::REMOVABLE, removable);
        let chest = WorldObject::new("Chest", flags);
        let item = with_item.then(|| Item::armor("cap", "", DamageProfile::single(DamageKind::Physical, 1)));
        let object = world
            .add_world_object_with_item(chest, item, Position::new(1, 1))
            .unwrap();

        let ctx = ActionContext::new(&DifficultyScaling);
        let report = LootAction::new(actor).apply(&mut world, &ctx).unwrap();

        let equipped = world.creature(actor).unwrap().defense_items().len();
        let left_behind = usize::from(world.item_of(object).is_some());
        prop_assert_eq!(equipped + left_behind, usize::from(with_item));
        prop_assert_eq!(report.item.is_some(), with_item);
        prop_assert_eq!(report.object_removed, removable);
        prop_assert_eq!(world.object(object).is_none(), removable);
    }
}
