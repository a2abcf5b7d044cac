use crate::engine::search::INFINITY;
use serde::{Deserialize, Serialize};
use std::fmt;

// Most stones a board can hold, and so the largest store or pit difference.
const MAX_STONES: i64 = 255;

/// Which leaf evaluation the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Weighted store and pit differential.
    #[default]
    Material,
    /// Win/draw/loss on finished boards, store differential otherwise.
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub store_weight: i32,
    pub pit_weight: i32,
    pub win_score: i32,
    pub evaluator: EvaluatorKind,

    // Search Parameters
    pub max_depth: u8, // Iterative deepening ceiling for timed searches
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_weight: 100,
            pit_weight: 10,
            win_score: 1000,
            evaluator: EvaluatorKind::Material,

            max_depth: 32,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed engine config: {err}"),
            Self::Invalid(reason) => write!(f, "invalid engine config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl EngineConfig {
    /// Parses a JSON object; missing keys keep their defaults.
    ///
    /// # Errors
    /// Malformed JSON, or values rejected by [`Self::validate`].
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// `Invalid` naming the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_weight < 0 || self.pit_weight < 0 {
            return Err(ConfigError::Invalid("weights must not be negative"));
        }
        // Leaf values must stay strictly inside the search window.
        let material_bound = MAX_STONES * (i64::from(self.store_weight) + i64::from(self.pit_weight));
        if material_bound >= i64::from(INFINITY) {
            return Err(ConfigError::Invalid("weights are too large for the search window"));
        }
        // A finished game must outrank any store lead in an unfinished one.
        if i64::from(self.win_score) <= MAX_STONES {
            return Err(ConfigError::Invalid("win_score must exceed the largest store difference"));
        }
        if self.win_score >= INFINITY {
            return Err(ConfigError::Invalid("win_score is too large for the search window"));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::eval::MaterialEvaluator;
    use crate::engine::Evaluator;
    use crate::logic::board::Board;

    #[test]
    fn test_load_config_from_json() {
        let json = r#"{
            "store_weight": 120,
            "pit_weight": 5,
            "evaluator": "outcome",
            "max_depth": 12
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();

        assert_eq!(config.store_weight, 120);
        assert_eq!(config.pit_weight, 5);
        assert_eq!(config.evaluator, EvaluatorKind::Outcome);
        assert_eq!(config.max_depth, 12);
        // Check default values
        assert_eq!(config.win_score, 1000);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "pit_weight": -1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "max_depth": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "store_weight": 30000000 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "store_weight": 50000000, "pit_weight": 50000000 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "win_score": 1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "win_score": 1000000000 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EngineConfig::load_from_json(r#"{ "evaluator": "fuzzy" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_accepts_largest_safe_weights() {
        // 255 * (3_900_000 + 21_000) stays below the window bound.
        let json = r#"{ "store_weight": 3900000, "pit_weight": 21000 }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        let eval = MaterialEvaluator::from_config(&config);
        let lopsided = Board::from_layout([0, 0, 0, 0, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0]).unwrap();

        assert!(eval.evaluate(&lopsided) < INFINITY);
    }

    #[test]
    fn test_round_trips_through_serde() {
        let config = EngineConfig {
            evaluator: EvaluatorKind::Outcome,
            win_score: 500,
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"outcome\""));
        assert_eq!(EngineConfig::load_from_json(&json).unwrap(), config);
    }
}
