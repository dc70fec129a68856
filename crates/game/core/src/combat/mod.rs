//! Combat resolution.
//!
//! The damage pipeline is split into small pieces that compose:
//!
//! - `damage`: damage kinds and per-kind profiles
//! - `strategy`: difficulty tiers and the pluggable base damage strategy
//! - `modifier`: the ordered observer chain applied to outgoing damage
//! - `result`: outgoing damage computation and defender receipts
//!
//! Mitigation itself lives on [`crate::creature::Creature::receive_damage`].

pub mod damage;
pub mod modifier;
pub mod result;
pub mod strategy;

pub use damage::{DamageKind, DamageProfile};
pub use modifier::{EquipmentModifier, Modifier, ModifierChain, StatusEffect};
pub use result::{DamageReceipt, OutgoingDamage, compute_outgoing};
pub use strategy::{DamageStrategy, DifficultyScaling, DifficultyTier, FlatDamage, InvalidTier};
