//! Data-driven game balance
//!
//! Everything a host may want to rebalance without touching the simulation.
//! Missing fields in a JSON document fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game balance and playfield configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width (pixels)
    pub field_width: f32,
    /// Playfield height (pixels)
    pub field_height: f32,
    /// Lives at the start of a run (also granted by bonus lives)
    pub starting_lives: u8,
    /// Maximum gap between destructions that keeps a combo going (ms)
    pub combo_timeout_ms: f64,
    /// Bonus points per combo step (`combo * combo_bonus`)
    pub combo_bonus: u64,
    /// Explosive bricks damage neighbours whose centers lie closer than this
    pub explosion_radius: f32,
    /// Chance that a power-up brick drops a pickup
    pub power_up_drop_chance: f64,
    /// Points awarded for catching a pickup
    pub power_up_collect_points: u64,
    /// Speed multiplier applied by the slow-ball power-up
    pub slow_factor: f32,
    /// Fixed bonus awarded on clearing a level
    pub level_complete_bonus: u64,
    /// Wall-clock milliseconds in one nominal frame unit
    pub frame_ms: f64,
    /// Largest simulation step (frame units) a single frame may take
    pub max_frame_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            starting_lives: 3,
            combo_timeout_ms: 1000.0,
            combo_bonus: 5,
            explosion_radius: 100.0,
            power_up_drop_chance: 0.5,
            power_up_collect_points: 25,
            slow_factor: 0.7,
            level_complete_bonus: 500,
            frame_ms: 16.67,
            max_frame_step: 2.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "field_width": 1024 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.field_width, 1024.0);
        assert_eq!(tuning.combo_timeout_ms, 1000.0);
        assert_eq!(tuning.explosion_radius, 100.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
