//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{MAX_PLAYERS, MIN_PLAYERS};

/// Engine configuration parameters
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of players in the game (2..=4)
    pub num_players: u8,

    /// Reject selections of a color the source does not hold with
    /// `IllegalSelection` instead of treating them as a no-op
    pub strict_selection: bool,

    /// Reject placements a strict rule set forbids with `IllegalPlacement`
    /// instead of redirecting the tiles to the floor
    pub strict_placement: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            strict_selection: false,
            strict_placement: false,
        }
    }
}

impl EngineConfig {
    pub fn with_players(num_players: u8) -> Self {
        Self {
            num_players,
            ..Default::default()
        }
    }

    /// Both strict flags on
    pub fn strict(mut self) -> Self {
        self.strict_selection = true;
        self.strict_placement = true;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(EngineError::InvalidPlayerCount(self.num_players));
        }
        Ok(())
    }

    /// 5, 7 or 9 factories
    pub fn num_factories(&self) -> usize {
        self.num_players as usize * 2 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive_two_player() {
        let config = EngineConfig::default();
        assert_eq!(config.num_players, 2);
        assert!(!config.strict_selection);
        assert!(!config.strict_placement);
        assert_eq!(config.num_factories(), 5);
    }

    #[test]
    fn test_validate_player_count() {
        assert!(EngineConfig::with_players(4).validate().is_ok());
        assert_eq!(
            EngineConfig::with_players(1).validate(),
            Err(EngineError::InvalidPlayerCount(1))
        );
        assert_eq!(
            EngineConfig::with_players(5).validate(),
            Err(EngineError::InvalidPlayerCount(5))
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"num_players": 3, "strict_placement": true}"#).unwrap();
        assert_eq!(config.num_players, 3);
        assert!(config.strict_placement);
        assert!(!config.strict_selection);
        assert_eq!(config.num_factories(), 7);
    }
}
