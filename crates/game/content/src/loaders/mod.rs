//! Content loaders for reading game data from files.
//!
//! Every loader accepts RON or TOML; the format is picked from the file
//! extension (see [`DataFormat`]).

pub mod factory;
pub mod roster;
pub mod world;

pub use factory::ContentFactory;
pub use roster::RosterLoader;
pub use world::WorldLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Supported data file syntaxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    Ron,
    Toml,
}

impl DataFormat {
    /// Picks the format from the extension, case-insensitively.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ron") => Ok(DataFormat::Ron),
            Some("toml") => Ok(DataFormat::Toml),
            _ => anyhow::bail!(
                "Unsupported data file {}: expected a .ron or .toml extension",
                path.display()
            ),
        }
    }

    /// Deserializes `content` in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> LoadResult<T> {
        match self {
            DataFormat::Ron => ron::from_str(content).context("Failed to parse RON"),
            DataFormat::Toml => toml::from_str(content).context("Failed to parse TOML"),
        }
    }
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}

/// Reads `path` and deserializes it in the format its extension names.
pub(crate) fn read_data<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let format = DataFormat::from_path(path)?;
    let content = read_file(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading data file");
    format
        .parse(&content)
        .with_context(|| format!("Invalid data in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DataFormat::from_path(Path::new("maps/arena.ron")).unwrap(),
            DataFormat::Ron
        );
        assert_eq!(
            DataFormat::from_path(Path::new("ROSTER.TOML")).unwrap(),
            DataFormat::Toml
        );
        assert!(DataFormat::from_path(Path::new("world.json")).is_err());
        assert!(DataFormat::from_path(Path::new("world")).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_file(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ron"));
    }
}
