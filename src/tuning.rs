//! Data-driven game balance
//!
//! [`Tuning`] mirrors the constants in [`crate::consts`] and can be loaded
//! from JSON. Missing keys fall back to the compile-time defaults, so a
//! partial file only overrides what it names. [`LevelTable`] holds the
//! per-level population counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::EntityKind;

/// Configuration loading/validation failure
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed into the expected shape
    Parse(serde_json::Error),
    /// A level table must contain at least one level
    EmptyLevelTable,
    /// A value is outside its usable range
    InvalidValue { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::EmptyLevelTable => write!(f, "level table has no levels"),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value for '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Size, speed and animation parameters shared by every entity of a kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindProfile {
    pub width: f32,
    pub height: f32,
    pub max_speed: f32,
    pub max_force: f32,
    /// Distance of the wander target ahead of the entity (0 = never wanders)
    pub wander_projection: f32,
    /// Sprite sheet frames in the swim cycle
    pub frame_count: u32,
}

impl KindProfile {
    const fn fixed(size: f32) -> Self {
        Self {
            width: size,
            height: size,
            max_speed: 0.0,
            max_force: 0.0,
            wander_projection: 0.0,
            frame_count: 1,
        }
    }
}

/// Runtime-tunable gameplay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Kind profiles ===
    pub player: KindProfile,
    pub predator: KindProfile,
    pub prey: KindProfile,
    pub collectible: KindProfile,
    pub trap: KindProfile,

    // === Behavior ===
    /// Player max speed while standing on a trap
    pub trapped_speed: f32,
    pub hunt_radius: f32,
    /// Seeking predators give up beyond `hunt_radius * hunt_hysteresis`
    pub hunt_hysteresis: f32,
    pub wander_radius: f32,
    pub wander_jitter: f32,

    // === World ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// World extent as a multiple of the viewport
    pub world_scale: f32,
    pub spawn_margin: f32,
    pub predator_spawn_clearance: f32,
    /// Ticks per second (converts level time limits to ticks)
    pub tick_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: KindProfile {
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
                max_speed: PLAYER_MAX_SPEED,
                max_force: PLAYER_MAX_FORCE,
                wander_projection: 0.0,
                frame_count: 4,
            },
            predator: KindProfile {
                width: PREDATOR_WIDTH,
                height: PREDATOR_HEIGHT,
                max_speed: PREDATOR_MAX_SPEED,
                max_force: PREDATOR_MAX_FORCE,
                wander_projection: PREDATOR_WANDER_PROJECTION,
                frame_count: 8,
            },
            prey: KindProfile {
                width: PREY_SIZE,
                height: PREY_SIZE,
                max_speed: PREY_MAX_SPEED,
                max_force: PREY_MAX_FORCE,
                wander_projection: PREY_WANDER_PROJECTION,
                frame_count: 4,
            },
            collectible: KindProfile::fixed(COLLECTIBLE_SIZE),
            trap: KindProfile::fixed(TRAP_SIZE),

            trapped_speed: PLAYER_TRAPPED_SPEED,
            hunt_radius: HUNT_RADIUS,
            hunt_hysteresis: HUNT_HYSTERESIS,
            wander_radius: WANDER_RADIUS,
            wander_jitter: WANDER_JITTER,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            world_scale: WORLD_SCALE,
            spawn_margin: SPAWN_MARGIN,
            predator_spawn_clearance: PREDATOR_SPAWN_CLEARANCE,
            tick_rate: TICK_RATE,
        }
    }
}

impl Tuning {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Profile lookup for a kind
    pub fn profile(&self, kind: EntityKind) -> &KindProfile {
        match kind {
            EntityKind::Player => &self.player,
            EntityKind::Predator => &self.predator,
            EntityKind::Prey => &self.prey,
            EntityKind::Collectible => &self.collectible,
            EntityKind::Trap => &self.trap,
        }
    }

    /// Distance beyond which a seeking predator returns to wandering
    pub fn hunt_exit_radius(&self) -> f32 {
        self.hunt_radius * self.hunt_hysteresis
    }

    /// Half extents of the world rectangle (centered on the origin)
    pub fn world_half_extents(&self) -> glam::Vec2 {
        glam::Vec2::new(self.viewport_width, self.viewport_height) * self.world_scale / 2.0
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { name, value })
            }
        }

        for (name, profile) in [
            ("player", &self.player),
            ("predator", &self.predator),
            ("prey", &self.prey),
            ("collectible", &self.collectible),
            ("trap", &self.trap),
        ] {
            positive(name, profile.width)?;
            positive(name, profile.height)?;
            if profile.frame_count == 0 {
                return Err(ConfigError::InvalidValue { name, value: 0.0 });
            }
        }
        for (name, profile) in [
            ("player", &self.player),
            ("predator", &self.predator),
            ("prey", &self.prey),
        ] {
            positive(name, profile.max_speed)?;
            positive(name, profile.max_force)?;
        }

        positive("trapped_speed", self.trapped_speed)?;
        positive("hunt_radius", self.hunt_radius)?;
        if self.hunt_hysteresis < 1.0 {
            return Err(ConfigError::InvalidValue {
                name: "hunt_hysteresis",
                value: self.hunt_hysteresis,
            });
        }
        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        positive("world_scale", self.world_scale)?;
        positive("tick_rate", self.tick_rate)?;
        Ok(())
    }
}

/// Population counts for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub predator_count: u32,
    pub collectible_count: u32,
    pub prey_count: u32,
    pub trap_count: u32,
    /// Seconds allowed to clear the level (0 = unlimited)
    pub time_limit: u32,
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: Vec<LevelConfig>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig {
                    predator_count: 2,
                    collectible_count: 10,
                    prey_count: 15,
                    trap_count: 4,
                    time_limit: 60,
                },
                LevelConfig {
                    predator_count: 3,
                    collectible_count: 20,
                    prey_count: 30,
                    trap_count: 6,
                    time_limit: 60,
                },
                LevelConfig {
                    predator_count: 5,
                    collectible_count: 30,
                    prey_count: 60,
                    trap_count: 10,
                    time_limit: 60,
                },
            ],
        }
    }
}

impl LevelTable {
    /// Parse a level table from JSON (`{"levels": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: LevelTable = serde_json::from_str(json)?;
        if table.levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        Ok(table)
    }

    pub fn get(&self, index: usize) -> Option<&LevelConfig> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True if `index` is the last configured level
    pub fn is_final(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().hunt_exit_radius(), 360.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"hunt_radius": 100.0}"#).unwrap();
        assert_eq!(tuning.hunt_radius, 100.0);
        assert_eq!(tuning.wander_radius, WANDER_RADIUS);
        assert_eq!(tuning.player.max_speed, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{"hunt_hysteresis": 0.5}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "hunt_hysteresis", .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_world_extents() {
        let half = Tuning::default().world_half_extents();
        assert_eq!(half, glam::Vec2::new(1200.0, 900.0));
    }

    #[test]
    fn test_level_table() {
        let table = LevelTable::default();
        assert_eq!(table.len(), 3);
        assert!(!table.is_final(0));
        assert!(table.is_final(2));

        let json = r#"{"levels": [{"predator_count": 1, "collectible_count": 2,
            "prey_count": 0, "trap_count": 0, "time_limit": 0}]}"#;
        let table = LevelTable::from_json(json).unwrap();
        assert_eq!(table.get(0).map(|l| l.collectible_count), Some(2));

        let err = LevelTable::from_json(r#"{"levels": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLevelTable));
    }
}
