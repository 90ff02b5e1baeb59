//! Startup configuration for a [`Game`](crate::Game).

use std::collections::BTreeSet;

use mapcast_player::DEFAULT_INBOX_CAPACITY;
use mapcast_protocol::MapId;
use mapcast_room::RoomConfig;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Env var holding a comma-separated list of map ids, e.g. `1,2,3`.
pub const ENV_MAPS: &str = "MAPCAST_MAPS";
pub const ENV_QUEUE_CAPACITY: &str = "MAPCAST_QUEUE_CAPACITY";
pub const ENV_INBOX_CAPACITY: &str = "MAPCAST_INBOX_CAPACITY";

/// The fixed set of maps plus buffer sizing.
///
/// Map ids are kept as raw integers until [`validate`](Self::validate) so
/// a bad id surfaces as `InvalidConfig` rather than a parse error.
///
/// ```json
/// { "map_ids": [1, 2, 3], "queue_capacity": 100, "inbox_capacity": 100 }
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_ids: Vec<i64>,
    /// Per-map pending-line capacity.
    pub queue_capacity: usize,
    /// Per-player inbox capacity.
    pub inbox_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_ids: Vec::new(),
            queue_capacity: RoomConfig::DEFAULT_QUEUE_CAPACITY,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Default sizing with the given maps.
    pub fn new(map_ids: impl Into<Vec<i64>>) -> Self {
        Self {
            map_ids: map_ids.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads [`ENV_MAPS`], [`ENV_QUEUE_CAPACITY`] and [`ENV_INBOX_CAPACITY`].
    /// Unset variables fall back to map `1` and the default capacities.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GameError> {
        let mut config = Self::new(vec![1]);

        if let Some(raw) = lookup(ENV_MAPS) {
            config.map_ids = raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<i64>().map_err(|_| {
                        GameError::InvalidConfig(format!("{ENV_MAPS}: {part:?} is not an integer"))
                    })
                })
                .collect::<Result<_, _>>()?;
        }
        if let Some(raw) = lookup(ENV_QUEUE_CAPACITY) {
            config.queue_capacity = parse_capacity(ENV_QUEUE_CAPACITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_INBOX_CAPACITY) {
            config.inbox_capacity = parse_capacity(ENV_INBOX_CAPACITY, &raw)?;
        }

        Ok(config)
    }

    /// Checks every field and returns the distinct map ids, ascending.
    ///
    /// # Errors
    /// [`GameError::InvalidConfig`] if any id is ≤ 0 or a capacity is 0.
    pub fn validate(&self) -> Result<Vec<MapId>, GameError> {
        if self.queue_capacity == 0 {
            return Err(GameError::InvalidConfig("queue_capacity must be at least 1".into()));
        }
        if self.inbox_capacity == 0 {
            return Err(GameError::InvalidConfig("inbox_capacity must be at least 1".into()));
        }

        let ids = self
            .map_ids
            .iter()
            .map(|&raw| MapId::try_from(raw))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(ids.into_iter().collect())
    }

    pub fn room_config(&self) -> RoomConfig {
        RoomConfig::with_capacity(self.queue_capacity)
    }
}

fn parse_capacity(var: &str, raw: &str) -> Result<usize, GameError> {
    raw.trim()
        .parse()
        .map_err(|_| GameError::InvalidConfig(format!("{var}: {raw:?} is not a capacity")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_capacities() {
        let config = GameConfig::new(vec![1, 2]);
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.inbox_capacity, 100);
        assert_eq!(config.room_config().queue_capacity, 100);
    }

    #[test]
    fn test_validate_dedupes_and_sorts() {
        let config = GameConfig::new(vec![3, 1, 3, 2]);
        assert_eq!(config.validate().unwrap(), vec![MapId(1), MapId(2), MapId(3)]);
    }

    #[test]
    fn test_validate_rejects_non_positive_ids() {
        for bad in [0, -1] {
            let err = GameConfig::new(vec![1, bad]).validate().unwrap_err();
            assert!(matches!(err, GameError::InvalidConfig(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = GameConfig {
            queue_capacity: 0,
            ..GameConfig::new(vec![1])
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let config = GameConfig {
            inbox_capacity: 0,
            ..GameConfig::new(vec![1])
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = GameConfig::from_json(r#"{ "map_ids": [5, 6] }"#).unwrap();
        assert_eq!(config, GameConfig::new(vec![5, 6]));

        let config = GameConfig::from_json(r#"{ "map_ids": [1], "inbox_capacity": 3 }"#).unwrap();
        assert_eq!(config.inbox_capacity, 3);
        assert_eq!(config.queue_capacity, 100);
    }

    #[test]
    fn test_from_json_malformed() {
        let err = GameConfig::from_json("{ map_ids: ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn test_from_lookup_defaults_to_map_one() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GameConfig::new(vec![1]));
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let config = GameConfig::from_lookup(lookup(&[
            (ENV_MAPS, " 4, 7 ,9,"),
            (ENV_QUEUE_CAPACITY, "16"),
            (ENV_INBOX_CAPACITY, "8"),
        ]))
        .unwrap();
        assert_eq!(config.map_ids, vec![4, 7, 9]);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.inbox_capacity, 8);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = GameConfig::from_lookup(lookup(&[(ENV_MAPS, "1,two")])).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));

        let err = GameConfig::from_lookup(lookup(&[(ENV_INBOX_CAPACITY, "-3")])).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }
}
