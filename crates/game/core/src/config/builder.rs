//! Descriptor validation and world population.

use crate::audit::{AuditEvent, AuditKind, AuditSink};
use crate::combat::DifficultyTier;
use crate::creature::{Creature, CreatureConfig, CreatureId, CreatureKind};
use crate::item::ItemCatalog;
use crate::rng::{PcgRng, RngOracle, compute_seed};
use crate::world::{Position, World, WorldObject};

use super::{ConfigError, CreaturePlacement, CreatureRoster, ObjectPlacement, WorldDescriptor};

/// Seed context slot reserved for placement rolls.
const PLACEMENT_CONTEXT: u32 = 0x504c;

/// A populated world ready for the engine.
#[derive(Debug)]
pub struct Scenario {
    pub world: World,
    pub player: CreatureId,
    pub tier: DifficultyTier,
    pub seed: u64,
}

/// Turns a [`WorldDescriptor`] into a [`Scenario`].
///
/// Stats resolve as: placement override, then roster entry (when a roster is
/// supplied), then [`CreatureConfig::defaults`].
pub struct ScenarioBuilder<'a> {
    descriptor: &'a WorldDescriptor,
    roster: Option<&'a CreatureRoster>,
    catalog: ItemCatalog,
    rng: Box<dyn RngOracle + 'a>,
}

impl<'a> ScenarioBuilder<'a> {
    pub fn new(descriptor: &'a WorldDescriptor) -> Self {
        Self {
            descriptor,
            roster: None,
            catalog: ItemCatalog::standard(),
            rng: Box::new(PcgRng),
        }
    }

    #[must_use]
    pub fn roster(mut self, roster: &'a CreatureRoster) -> Self {
        self.roster = Some(roster);
        self
    }

    #[must_use]
    pub fn catalog(mut self, catalog: ItemCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn rng(mut self, rng: impl RngOracle + 'a) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn build(&self, audit: &mut dyn AuditSink) -> Result<Scenario, ConfigError> {
        let descriptor = self.descriptor;
        let tier = descriptor.tier()?;
        let (width, height) = (descriptor.size.width, descriptor.size.height);
        if width > World::MAX_SIDE || height > World::MAX_SIDE {
            return Err(ConfigError::WorldTooLarge {
                width,
                height,
                max: World::MAX_SIDE,
            });
        }
        let mut world = World::new(width, height)?;

        for obstacle in &descriptor.obstacles {
            world.set_walkable(*obstacle, false)?;
        }

        let mut players = descriptor.creatures.iter().filter(|c| c.player);
        let player_spec = players.next().ok_or(ConfigError::MissingPlayer)?;
        // An unflagged Player-kind entry would still get the interactive controller.
        if players.next().is_some()
            || descriptor
                .creatures
                .iter()
                .any(|c| !c.player && c.kind == CreatureKind::Player)
        {
            return Err(ConfigError::DuplicatePlayer);
        }

        // Fixed objects go first so random creatures never land under them.
        let (random_objects, fixed_objects): (Vec<_>, Vec<_>) =
            descriptor.objects.iter().partition(|o| o.random);
        let mut rolls = 0u64;
        for spec in fixed_objects {
            self.place_object(&mut world, spec, &mut rolls, audit)?;
        }

        let player = self.place_creature(&mut world, player_spec, tier, &mut rolls, audit)?;
        for spec in descriptor.creatures.iter().filter(|c| !c.player) {
            self.place_creature(&mut world, spec, tier, &mut rolls, audit)?;
        }

        for spec in random_objects {
            self.place_object(&mut world, spec, &mut rolls, audit)?;
        }

        tracing::info!(
            width = descriptor.size.width,
            height = descriptor.size.height,
            %tier,
            creatures = world.creature_count(),
            "scenario built"
        );

        Ok(Scenario {
            world,
            player,
            tier,
            seed: descriptor.seed,
        })
    }

    fn place_creature(
        &self,
        world: &mut World,
        spec: &CreaturePlacement,
        tier: DifficultyTier,
        rolls: &mut u64,
        audit: &mut dyn AuditSink,
    ) -> Result<CreatureId, ConfigError> {
        let kind = if spec.player {
            CreatureKind::Player
        } else {
            spec.kind
        };
        let name = spec.display_name();
        let config = self.resolve_stats(kind, spec, tier)?;

        let fallback = spec
            .player
            .then_some(CreaturePlacement::DEFAULT_PLAYER_POSITION);
        let position = self.resolve_position(world, &name, spec.random, spec.position.or(fallback), rolls)?;

        let id = world.add_creature(Creature::new(name.as_str(), config, tier), position)?;
        audit.record(AuditEvent::new(
            name,
            AuditKind::Placement,
            format!("{kind} placed at {position}"),
        ));
        Ok(id)
    }

    fn place_object(
        &self,
        world: &mut World,
        spec: &ObjectPlacement,
        rolls: &mut u64,
        audit: &mut dyn AuditSink,
    ) -> Result<(), ConfigError> {
        let item = spec
            .item
            .as_ref()
            .map(|item| item.build(&self.catalog))
            .transpose()?;
        let position = self.resolve_position(world, &spec.name, spec.random, spec.position, rolls)?;

        let detail = match &item {
            Some(item) => format!("placed at {position} holding {}", item.name()),
            None => format!("placed at {position}"),
        };
        world.add_world_object_with_item(
            WorldObject::new(spec.name.as_str(), spec.flags()),
            item,
            position,
        )?;
        audit.record(AuditEvent::new(spec.name.as_str(), AuditKind::Placement, detail));
        Ok(())
    }

    fn resolve_stats(
        &self,
        kind: CreatureKind,
        spec: &CreaturePlacement,
        tier: DifficultyTier,
    ) -> Result<CreatureConfig, ConfigError> {
        let mut config = match (spec.stats.health, spec.stats.damage.as_ref()) {
            (Some(health), Some(damage)) => CreatureConfig::new(kind, health, damage.clone()),
            _ => match self.roster {
                Some(roster) => roster.get(kind, tier)?.clone(),
                None => CreatureConfig::defaults(kind),
            },
        };

        if let Some(health) = spec.stats.health {
            config.base_health = health;
        }
        if let Some(damage) = &spec.stats.damage {
            config.base_damage = damage.clone();
        }
        config.kind = kind;
        Ok(config)
    }

    fn resolve_position(
        &self,
        world: &World,
        name: &str,
        random: bool,
        explicit: Option<Position>,
        rolls: &mut u64,
    ) -> Result<Position, ConfigError> {
        if !random {
            return explicit.ok_or_else(|| ConfigError::MissingPosition {
                name: name.to_owned(),
            });
        }

        let free = world.free_cells();
        let seed = compute_seed(self.descriptor.seed, *rolls, 0, PLACEMENT_CONTEXT);
        *rolls += 1;
        self.rng
            .pick_index(seed, free.len())
            .and_then(|index| free.get(index).copied())
            .ok_or_else(|| ConfigError::NoFreeCell {
                name: name.to_owned(),
            })
    }
}
