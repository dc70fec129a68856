//! Deterministic rules for turn-based grid skirmishes.
//!
//! `skirmish-core` defines the world model (grid, creatures, objects), the
//! item and damage pipeline, and the turn engine. It performs no I/O: data
//! files are read by `skirmish-content`, and terminals, input and log output
//! belong to the client. All state mutation during play flows through
//! [`engine::GameEngine`].
pub mod action;
pub mod audit;
pub mod combat;
pub mod config;
pub mod creature;
pub mod engine;
pub mod error;
pub mod item;
pub mod rng;
pub mod world;

pub use action::{
    ActionContext, ActionKind, ActionPrompt, ActionReport, ActionTransition, AttackAction,
    AttackError, AttackReport, DirectionPurpose, LootAction, LootError, LootReport, MoveAction,
    MoveReport, SkipReason,
};
pub use audit::{AuditEvent, AuditKind, AuditLog, AuditSink, TracingAudit};
pub use combat::{
    DamageKind, DamageProfile, DamageReceipt, DamageStrategy, DifficultyScaling, DifficultyTier,
    EquipmentModifier, FlatDamage, Modifier, ModifierChain, OutgoingDamage, StatusEffect,
};
pub use config::{
    ConfigError, CreaturePlacement, CreatureRoster, Enchant, EnchantTarget, GridSize, ItemSpec,
    ObjectPlacement, RosterEntry, Scenario, ScenarioBuilder, StatOverride, WorldDescriptor,
};
pub use creature::{
    AggressiveController, Behavior, BehaviorTable, Controller, Creature, CreatureConfig,
    CreatureId, CreatureKind, InputSource, InteractiveController, Perception,
};
pub use engine::{
    EngineError, GameEngine, GameStatus, TransitionPhase, TransitionPhaseError, TurnOutcome,
    TurnPhase,
};
pub use error::{ErrorSeverity, GameError};
pub use item::{AttackComponent, AttackGroup, Item, ItemCatalog, ItemCategory};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use world::{
    CardinalDirection, GridDimensions, MoveError, NullRenderer, ObjectFlags, ObjectId, Position,
    RenderSink, World, WorldError, WorldObject, WorldSnapshot,
};
