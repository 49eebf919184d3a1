//! Game configuration
//!
//! Every constant the simulation depends on, fixed for the lifetime of a
//! `Simulation`. Loaded from JSON with per-field defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Playfield, bird and pipe constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Bird ===
    /// Fixed horizontal position of the bird
    pub bird_x: f32,
    pub bird_radius: f32,
    /// Added to the bird's velocity every tick
    pub gravity: f32,
    /// Velocity assigned by a jump (negative = upward)
    pub jump_impulse: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Vertical opening between the top and bottom bars
    pub gap_height: f32,
    /// Horizontal spacing between pipes at spawn
    pub spawn_interval: f32,
    /// Leftward movement per tick
    pub scroll_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            bird_x: BIRD_X,
            bird_radius: BIRD_RADIUS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            pipe_width: PIPE_WIDTH,
            gap_height: PIPE_GAP,
            spawn_interval: PIPE_INTERVAL,
            scroll_speed: SCROLL_SPEED,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of pipes alive during a run: floor(width / interval)
    pub fn pipe_count(&self) -> usize {
        (self.width / self.spawn_interval).floor() as usize
    }

    /// Exclusive upper bound for a random gap top
    pub fn gap_top_range(&self) -> f32 {
        self.height - self.gap_height
    }

    /// Check that every constant describes a playable field.
    ///
    /// Must hold before any gap is drawn: a gap at least as tall as the
    /// playfield leaves an empty range for the gap top.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("bird_radius", self.bird_radius),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("spawn_interval", self.spawn_interval),
            ("scroll_speed", self.scroll_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        // Zero gravity is allowed (floaty debug mode), negative is not
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !self.jump_impulse.is_finite() {
            return Err(ConfigError::InvalidImpulse(self.jump_impulse));
        }
        if self.gap_height >= self.height {
            return Err(ConfigError::GapTooTall {
                gap: self.gap_height,
                height: self.height,
            });
        }
        if !self.bird_x.is_finite()
            || self.bird_x - self.bird_radius < 0.0
            || self.bird_x + self.bird_radius > self.width
        {
            return Err(ConfigError::BirdOutOfBounds {
                x: self.bird_x,
                radius: self.bird_radius,
                width: self.width,
            });
        }
        if self.pipe_count() == 0 {
            return Err(ConfigError::NoPipes {
                interval: self.spawn_interval,
                width: self.width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipe_count(), 2);
        assert_eq!(config.gap_top_range(), 400.0);
    }

    #[test]
    fn test_gap_as_tall_as_playfield_rejected() {
        let config = GameConfig {
            gap_height: 600.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapTooTall { .. })
        ));

        let config = GameConfig {
            gap_height: 800.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let config = GameConfig {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "width", .. })
        ));

        let config = GameConfig {
            scroll_speed: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_wider_than_playfield_rejected() {
        let config = GameConfig {
            spawn_interval: 401.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoPipes { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "gravity": 0.25, "width": 800 }"#).unwrap();
        assert_eq!(config.gravity, 0.25);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, PLAYFIELD_HEIGHT);
        assert_eq!(config.pipe_count(), 4);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "gap_height": 900 }"#),
            Err(ConfigError::GapTooTall { .. })
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
