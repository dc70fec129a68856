//! Action selection.
//!
//! The turn loop never branches on [`super::CreatureKind`]. Each kind maps to
//! a [`Behavior`], and the [`BehaviorTable`] holds one [`Controller`] per
//! behavior. Controllers see the world only through a [`Perception`].

use crate::action::{ActionKind, ActionPrompt, DirectionPurpose};
use crate::rng::{RngOracle, compute_seed};
use crate::world::{CardinalDirection, Position, World};

use super::{CreatureId, CreatureKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Behavior {
    /// Driven by an [`InputSource`].
    Interactive,
    /// Attacks adjacent players, wanders otherwise.
    Aggressive,
}

/// A creature standing on a neighbouring cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacentCreature {
    pub direction: CardinalDirection,
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub name: String,
}

/// What a creature knows when it decides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Perception {
    pub actor: CreatureId,
    pub name: String,
    pub kind: CreatureKind,
    pub position: Position,
    pub hp: i32,
    pub lootable_here: bool,
    pub adjacent: Vec<AdjacentCreature>,
    /// Engine turn counter, for seeding random choices.
    pub nonce: u64,
}

impl Perception {
    /// Observes the world from `actor`'s cell. `None` when the actor is gone.
    pub fn observe(world: &World, actor: CreatureId, nonce: u64) -> Option<Self> {
        let creature = world.creature(actor)?;
        let position = creature.position();

        let adjacent = CardinalDirection::ALL
            .into_iter()
            .filter_map(|direction| {
                let id = world.creature_in_direction(position, direction)?;
                let other = world.creature(id)?;
                Some(AdjacentCreature {
                    direction,
                    id,
                    kind: other.kind(),
                    name: other.name().to_owned(),
                })
            })
            .collect();

        Some(Self {
            actor,
            name: creature.name().to_owned(),
            kind: creature.kind(),
            position,
            hp: creature.hp(),
            lootable_here: world.lootable_object_at(position).is_some(),
            adjacent,
            nonce,
        })
    }

    pub fn can_attack(&self) -> bool {
        !self.adjacent.is_empty()
    }

    pub fn prompt(&self) -> ActionPrompt {
        ActionPrompt {
            actor: self.actor,
            name: self.name.clone(),
            position: self.position,
            hp: self.hp,
            can_loot: self.lootable_here,
            can_attack: self.can_attack(),
        }
    }
}

/// Picks actions and directions for one behavior family.
///
/// `None` means no usable answer; the turn degrades to a skip.
pub trait Controller {
    fn decide(&mut self, perception: &Perception) -> Option<ActionKind>;

    fn direction(
        &mut self,
        perception: &Perception,
        purpose: DirectionPurpose,
    ) -> Option<CardinalDirection>;
}

/// Blocking boundary for interactive input. `None` means an unrecognized token.
pub trait InputSource {
    fn choose_action(&mut self, prompt: &ActionPrompt) -> Option<ActionKind>;

    fn choose_direction(&mut self, purpose: DirectionPurpose) -> Option<CardinalDirection>;
}

/// Controller for the player: forwards to an input source.
#[derive(Debug)]
pub struct InteractiveController<I> {
    input: I,
}

impl<I: InputSource> InteractiveController<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn into_inner(self) -> I {
        self.input
    }
}

impl<I: InputSource> Controller for InteractiveController<I> {
    fn decide(&mut self, perception: &Perception) -> Option<ActionKind> {
        let prompt = perception.prompt();
        match self.input.choose_action(&prompt)? {
            // Attacking with nobody in reach is a plain skip.
            ActionKind::Attack if !prompt.can_attack => Some(ActionKind::Skip),
            other => Some(other),
        }
    }

    fn direction(
        &mut self,
        _perception: &Perception,
        purpose: DirectionPurpose,
    ) -> Option<CardinalDirection> {
        self.input.choose_direction(purpose)
    }
}

/// Enemy policy: hit an adjacent player, otherwise take a seeded random step.
#[derive(Clone, Debug)]
pub struct AggressiveController<R> {
    rng: R,
    game_seed: u64,
}

impl<R: RngOracle> AggressiveController<R> {
    pub fn new(rng: R, game_seed: u64) -> Self {
        Self { rng, game_seed }
    }

    fn player_direction(perception: &Perception) -> Option<CardinalDirection> {
        perception
            .adjacent
            .iter()
            .find(|other| other.kind == CreatureKind::Player)
            .map(|other| other.direction)
    }
}

impl<R: RngOracle> Controller for AggressiveController<R> {
    fn decide(&mut self, perception: &Perception) -> Option<ActionKind> {
        if Self::player_direction(perception).is_some() {
            Some(ActionKind::Attack)
        } else {
            Some(ActionKind::Move)
        }
    }

    fn direction(
        &mut self,
        perception: &Perception,
        purpose: DirectionPurpose,
    ) -> Option<CardinalDirection> {
        match purpose {
            DirectionPurpose::Attack => Self::player_direction(perception),
            DirectionPurpose::Move => {
                let seed = compute_seed(self.game_seed, perception.nonce, perception.actor.0, 0);
                let index = self.rng.pick_index(seed, CardinalDirection::ALL.len())?;
                CardinalDirection::ALL.get(index).copied()
            }
        }
    }
}

/// One controller per behavior.
pub struct BehaviorTable {
    interactive: Box<dyn Controller>,
    aggressive: Box<dyn Controller>,
}

impl BehaviorTable {
    pub fn new(interactive: Box<dyn Controller>, aggressive: Box<dyn Controller>) -> Self {
        Self {
            interactive,
            aggressive,
        }
    }

    pub fn controller_for(&mut self, behavior: Behavior) -> &mut dyn Controller {
        match behavior {
            Behavior::Interactive => self.interactive.as_mut(),
            Behavior::Aggressive => self.aggressive.as_mut(),
        }
    }
}

impl std::fmt::Debug for BehaviorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorTable").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DifficultyTier;
    use crate::creature::{Creature, CreatureConfig};
    use crate::rng::PcgRng;

    fn spawn(world: &mut World, kind: CreatureKind, x: i32, y: i32) -> CreatureId {
        let creature = Creature::new(
            kind.to_string(),
            CreatureConfig::defaults(kind),
            DifficultyTier::Normal,
        );
        world.add_creature(creature, Position::new(x, y)).unwrap()
    }

    struct Fixed(Option<ActionKind>);

    impl InputSource for Fixed {
        fn choose_action(&mut self, _prompt: &ActionPrompt) -> Option<ActionKind> {
            self.0
        }

        fn choose_direction(&mut self, _purpose: DirectionPurpose) -> Option<CardinalDirection> {
            Some(CardinalDirection::East)
        }
    }

    #[test]
    fn perception_lists_neighbours() {
        let mut world = World::new(3, 3).unwrap();
        let player = spawn(&mut world, CreatureKind::Player, 1, 1);
        spawn(&mut world, CreatureKind::Orc, 1, 0);
        spawn(&mut world, CreatureKind::Goblin, 2, 2);

        let perception = Perception::observe(&world, player, 0).unwrap();

        assert_eq!(perception.adjacent.len(), 1);
        assert_eq!(perception.adjacent[0].direction, CardinalDirection::North);
        assert!(perception.prompt().can_attack);
        assert!(!perception.lootable_here);
    }

    #[test]
    fn aggressive_attacks_adjacent_player() {
        let mut world = World::new(3, 3).unwrap();
        spawn(&mut world, CreatureKind::Player, 1, 1);
        let orc = spawn(&mut world, CreatureKind::Orc, 2, 1);

        let perception = Perception::observe(&world, orc, 3).unwrap();
        let mut controller = AggressiveController::new(PcgRng, 7);

        assert_eq!(controller.decide(&perception), Some(ActionKind::Attack));
        assert_eq!(
            controller.direction(&perception, DirectionPurpose::Attack),
            Some(CardinalDirection::West)
        );
    }

    #[test]
    fn aggressive_wanders_deterministically() {
        let mut world = World::new(5, 5).unwrap();
        let troll = spawn(&mut world, CreatureKind::Troll, 2, 2);
        spawn(&mut world, CreatureKind::Goblin, 2, 1);

        let perception = Perception::observe(&world, troll, 11).unwrap();
        let mut first = AggressiveController::new(PcgRng, 42);
        let mut second = AggressiveController::new(PcgRng, 42);

        assert_eq!(first.decide(&perception), Some(ActionKind::Move));
        let a = first.direction(&perception, DirectionPurpose::Move);
        let b = second.direction(&perception, DirectionPurpose::Move);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn interactive_attack_without_target_becomes_skip() {
        let mut world = World::new(3, 3).unwrap();
        let player = spawn(&mut world, CreatureKind::Player, 1, 1);
        let perception = Perception::observe(&world, player, 0).unwrap();

        let mut controller = InteractiveController::new(Fixed(Some(ActionKind::Attack)));
        assert_eq!(controller.decide(&perception), Some(ActionKind::Skip));

        let mut confused = InteractiveController::new(Fixed(None));
        assert_eq!(confused.decide(&perception), None);
    }

    #[test]
    fn table_dispatches_by_behavior() {
        let mut world = World::new(3, 3).unwrap();
        let player = spawn(&mut world, CreatureKind::Player, 0, 0);
        let perception = Perception::observe(&world, player, 0).unwrap();

        let mut table = BehaviorTable::new(
            Box::new(InteractiveController::new(Fixed(Some(ActionKind::Loot)))),
            Box::new(AggressiveController::new(PcgRng, 0)),
        );

        let chosen = table
            .controller_for(CreatureKind::Player.behavior())
            .decide(&perception);
        assert_eq!(chosen, Some(ActionKind::Loot));
    }
}
