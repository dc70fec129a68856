//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Runtime settings for one session.
///
/// Environment variables (a `.env` file is honoured):
/// - `SKIRMISH_WORLD` - world file path, or the name of a bundled world (default: `arena`)
/// - `SKIRMISH_ROSTER` - roster file path (default: the bundled roster)
/// - `SKIRMISH_SEED` - overrides the world's random seed
/// - `SKIRMISH_LOG_DIR` - enables a daily rolling log file in this directory
/// - `SKIRMISH_MAX_TURNS` - stops after this many rounds
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub world: String,
    pub roster: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub max_rounds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            world: Self::DEFAULT_WORLD.to_owned(),
            roster: None,
            seed: None,
            log_dir: None,
            max_rounds: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_WORLD: &'static str = "arena";

    /// Construct configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construct configuration from any key lookup. Blank values count as
    /// unset; unparsable numbers are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(world) = read("SKIRMISH_WORLD") {
            config.world = world;
        }
        config.roster = read("SKIRMISH_ROSTER").map(PathBuf::from);
        config.seed = read("SKIRMISH_SEED").and_then(|raw| parse_number("SKIRMISH_SEED", &raw));
        config.log_dir = read("SKIRMISH_LOG_DIR").map(PathBuf::from);
        config.max_rounds = read("SKIRMISH_MAX_TURNS")
            .and_then(|raw| parse_number("SKIRMISH_MAX_TURNS", &raw));
        config
    }
}

fn parse_number(key: &str, raw: &str) -> Option<u64> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, value = raw, %err, "ignoring invalid number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SKIRMISH_WORLD", "crossroads"),
            ("SKIRMISH_ROSTER", "/data/roster.toml"),
            ("SKIRMISH_SEED", "99"),
            ("SKIRMISH_LOG_DIR", "/var/log/skirmish"),
            ("SKIRMISH_MAX_TURNS", " 25 "),
        ]));

        assert_eq!(config.world, "crossroads");
        assert_eq!(config.roster, Some(PathBuf::from("/data/roster.toml")));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/skirmish")));
        assert_eq!(config.max_rounds, Some(25));
    }

    #[test]
    fn blank_and_invalid_values_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SKIRMISH_WORLD", "   "),
            ("SKIRMISH_SEED", "lots"),
            ("SKIRMISH_MAX_TURNS", "-3"),
        ]));

        assert_eq!(config.world, ClientConfig::DEFAULT_WORLD);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_rounds, None);
    }
}
