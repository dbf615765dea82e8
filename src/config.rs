use log::LevelFilter;
use serde::Deserialize;

pub const LOG_LEVEL: LevelFilter = LevelFilter::Trace;

/// Tuning of the min-cut solver. The defaults are empirical and assume a 50x50 room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MinCutConfig {
    /// Capacity of edges between neighbouring tiles. Must be larger than any tile cost so that
    /// only tiles are ever cut.
    pub inter_tile_capacity: u32,
    /// Maximum number of blocking flow phases before giving up.
    pub max_phases: u16,
    /// Tiles within this Chebyshev distance of a passable exit tile act as the sink.
    pub exit_range: u8,
}

impl Default for MinCutConfig {
    fn default() -> Self {
        MinCutConfig {
            inter_tile_capacity: 10000,
            max_phases: 50,
            exit_range: 2,
        }
    }
}

impl MinCutConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MinCutConfig;

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = MinCutConfig::from_json(r#"{ "max_phases": 7 }"#).unwrap();
        assert_eq!(config.max_phases, 7);
        assert_eq!(config.inter_tile_capacity, MinCutConfig::default().inter_tile_capacity);
        assert_eq!(config.exit_range, 2);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(MinCutConfig::from_json("{}").unwrap(), MinCutConfig::default());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(MinCutConfig::from_json(r#"{ "max_phases": -1 }"#).is_err());
    }
}
