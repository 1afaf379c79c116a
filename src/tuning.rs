//! Data-driven game balance
//!
//! Every number the simulation step reads lives here. Defaults match
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_bottom_offset: f32,
    pub fire_interval: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub bullet_spawn_offset: f32,
    pub bullet_top_margin: f32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_base_speed: f32,
    pub enemy_random_speed: f32,
    pub enemy_speed_per_score: f32,
    pub enemy_bottom_margin: f32,

    // === Pacing ===
    pub spawn_interval_base: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_per_score: f32,

    // === Scoring ===
    pub kill_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            fire_interval: FIRE_INTERVAL,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            bullet_spawn_offset: BULLET_SPAWN_OFFSET,
            bullet_top_margin: BULLET_TOP_MARGIN,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_random_speed: ENEMY_RANDOM_SPEED,
            enemy_speed_per_score: ENEMY_SPEED_PER_SCORE,
            enemy_bottom_margin: ENEMY_BOTTOM_MARGIN,

            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_interval_per_score: SPAWN_INTERVAL_PER_SCORE,

            kill_score: KILL_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Spawn interval for the given score: linear ramp with a floor
    pub fn spawn_interval(&self, score: u64) -> f32 {
        let ramped = self.spawn_interval_base - score as f32 * self.spawn_interval_per_score;
        ramped.max(self.spawn_interval_floor)
    }

    /// Enemy fall speed for a uniform sample `roll` in [0, 1)
    pub fn enemy_speed(&self, roll: f32, score: u64) -> f32 {
        self.enemy_base_speed + roll * self.enemy_random_speed + score as f32 * self.enemy_speed_per_score
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("fire_interval", self.fire_interval),
            ("bullet_radius", self.bullet_radius),
            ("bullet_speed", self.bullet_speed),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("spawn_interval_floor", self.spawn_interval_floor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative = [
            ("player_bottom_offset", self.player_bottom_offset),
            ("bullet_spawn_offset", self.bullet_spawn_offset),
            ("bullet_top_margin", self.bullet_top_margin),
            ("enemy_base_speed", self.enemy_base_speed),
            ("enemy_random_speed", self.enemy_random_speed),
            ("enemy_speed_per_score", self.enemy_speed_per_score),
            ("enemy_bottom_margin", self.enemy_bottom_margin),
            ("spawn_interval_per_score", self.spawn_interval_per_score),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be zero or positive, got {value}"),
                });
            }
        }

        if self.enemy_base_speed + self.enemy_random_speed <= 0.0 {
            return Err(TuningError::Invalid {
                field: "enemy_base_speed",
                reason: "enemies would never move".to_string(),
            });
        }

        if self.spawn_interval_floor > self.spawn_interval_base {
            return Err(TuningError::Invalid {
                field: "spawn_interval_floor",
                reason: format!(
                    "floor {} exceeds base interval {}",
                    self.spawn_interval_floor, self.spawn_interval_base
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.fire_interval, 0.18);
        assert_eq!(tuning.kill_score, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 400.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 400.0);
        assert_eq!(tuning.bullet_speed, BULLET_SPEED);
        assert_eq!(tuning.enemy_width, ENEMY_WIDTH);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "bullet_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "bullet_speed", .. }));

        let err = Tuning::from_json(r#"{ "spawn_interval_floor": 2.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_interval_floor", .. }));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_spawn_interval_ramp() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval(0) - 1.2).abs() < 1e-6);
        assert!((tuning.spawn_interval(50) - 0.7).abs() < 1e-6);
        // Floor kicks in at score 75
        assert!((tuning.spawn_interval(75) - 0.45).abs() < 1e-6);
        assert!((tuning.spawn_interval(10_000) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_enemy_speed_grows_with_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemy_speed(0.0, 0), 60.0);
        assert_eq!(tuning.enemy_speed(0.5, 0), 120.0);
        assert_eq!(tuning.enemy_speed(0.0, 1000), 260.0);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);

        let tuned = Tuning {
            player_speed: 275.5,
            spawn_interval_floor: 0.3,
            kill_score: 25,
            ..Tuning::default()
        };
        let json = serde_json::to_string_pretty(&tuned).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuned);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
