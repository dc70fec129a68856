//! Content factory for locating data files by name.

use std::path::{Path, PathBuf};

use anyhow::Context;
use skirmish_core::{CreatureRoster, WorldDescriptor};

use crate::loaders::{LoadResult, RosterLoader, WorldLoader};

const EXTENSIONS: [&str; 2] = ["ron", "toml"];

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── roster.ron          (or roster.toml, optional)
/// └── worlds/
///     ├── arena.ron
///     └── crossroads.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::BUNDLED_DATA_DIR)
    }

    /// Load `worlds/{name}.ron` or, failing that, `worlds/{name}.toml`.
    pub fn load_world(&self, name: &str) -> LoadResult<WorldDescriptor> {
        let worlds = self.data_dir.join("worlds");
        let path = find_with_extension(&worlds, name)
            .with_context(|| format!("No world named '{name}' in {}", worlds.display()))?;
        WorldLoader::load(&path)
    }

    /// Load `roster.ron` or `roster.toml`. A directory without either has no
    /// roster and creatures fall back to default stats.
    pub fn load_roster(&self) -> LoadResult<Option<CreatureRoster>> {
        find_with_extension(&self.data_dir, "roster")
            .map(|path| RosterLoader::load(&path))
            .transpose()
    }

    /// Names of the worlds under `worlds/`, sorted.
    pub fn world_names(&self) -> LoadResult<Vec<String>> {
        let worlds = self.data_dir.join("worlds");
        let entries = std::fs::read_dir(&worlds)
            .with_context(|| format!("Failed to list {}", worlds.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.contains(&ext));
            if let (true, Some(stem)) = (supported, path.file_stem().and_then(|s| s.to_str())) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn find_with_extension(dir: &Path, stem: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
}
