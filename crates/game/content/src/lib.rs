//! Data-driven content for Skirmish.
//!
//! This crate reads starting worlds and creature rosters from RON or TOML
//! files and ships a small bundled data set under `data/`:
//! - World descriptors (grid, difficulty, obstacles, creatures, objects)
//! - Creature rosters (per kind, per difficulty tier stats)
//!
//! Loaders produce `skirmish-core` types directly; nothing here holds game
//! state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, DataFormat, LoadResult, RosterLoader, WorldLoader};

/// Directory holding the bundled sample data.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
