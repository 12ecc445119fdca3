//! Headless run parameters, read from `TILECITY_*` environment variables.

use std::path::PathBuf;

use bevy::prelude::*;

use save::PlayerId;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub days: u32,
    pub terrain_seed: i32,
    pub save_dir: PathBuf,
    pub player: PlayerId,
    pub city_id: u64,
    pub city_name: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            days: 30,
            terrain_seed: 42,
            save_dir: PathBuf::from("saves"),
            player: PlayerId(1),
            city_id: 1,
            city_name: "Tile City".to_string(),
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            days: parse_or(&lookup, "TILECITY_DAYS", defaults.days),
            terrain_seed: parse_or(&lookup, "TILECITY_SEED", defaults.terrain_seed),
            save_dir: lookup("TILECITY_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_dir),
            player: PlayerId(parse_or(&lookup, "TILECITY_PLAYER", defaults.player.0)),
            city_id: parse_or(&lookup, "TILECITY_CITY", defaults.city_id),
            city_name: lookup("TILECITY_NAME").unwrap_or(defaults.city_name),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {key}={raw:?}: not a valid value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(RunConfig::from_lookup(|_| None), RunConfig::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let config = RunConfig::from_lookup(|key| match key {
            "TILECITY_DAYS" => Some("7".to_string()),
            "TILECITY_SEED" => Some("-3".to_string()),
            "TILECITY_SAVE_DIR" => Some("/tmp/tc".to_string()),
            "TILECITY_PLAYER" => Some(" 12 ".to_string()),
            _ => None,
        });
        assert_eq!(config.days, 7);
        assert_eq!(config.terrain_seed, -3);
        assert_eq!(config.save_dir, PathBuf::from("/tmp/tc"));
        assert_eq!(config.player, PlayerId(12));
        assert_eq!(config.city_id, 1);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = RunConfig::from_lookup(|key| match key {
            "TILECITY_DAYS" => Some("forever".to_string()),
            _ => None,
        });
        assert_eq!(config.days, 30);
    }
}
