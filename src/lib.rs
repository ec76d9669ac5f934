//! Eel Forage - An underwater predator/prey arcade game
//!
//! Core modules:
//! - `vector`: Steering math on top of `glam::Vec2`
//! - `sim`: Deterministic simulation (steering, collisions, game state)
//! - `tuning`: Data-driven game balance and level table
//! - `render`: Per-entity sprite instances for the renderer
//! - `platform`: Browser host binding

pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod vector;

pub use tuning::{ConfigError, LevelConfig, LevelTable, Tuning};
pub use vector::{SteeringVec, Vector2};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Minimum time between admitted frames (ms)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Default viewport (canvas) size; the world is 3x this in each axis
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    pub const WORLD_SCALE: f32 = 3.0;

    /// Eel (player)
    pub const PLAYER_WIDTH: f32 = 16.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_MAX_SPEED: f32 = 3.0;
    pub const PLAYER_TRAPPED_SPEED: f32 = 1.5;
    pub const PLAYER_MAX_FORCE: f32 = 0.2;

    /// Shark (predator)
    pub const PREDATOR_WIDTH: f32 = 48.0;
    pub const PREDATOR_HEIGHT: f32 = 64.0;
    pub const PREDATOR_MAX_SPEED: f32 = 2.5;
    pub const PREDATOR_MAX_FORCE: f32 = 0.1;
    pub const PREDATOR_WANDER_PROJECTION: f32 = 100.0;

    /// Fish (prey)
    pub const PREY_SIZE: f32 = 24.0;
    pub const PREY_MAX_SPEED: f32 = 2.0;
    pub const PREY_MAX_FORCE: f32 = 0.05;
    pub const PREY_WANDER_PROJECTION: f32 = 150.0;

    /// Egg (collectible) and trap
    pub const COLLECTIBLE_SIZE: f32 = 8.0;
    pub const TRAP_SIZE: f32 = 16.0;

    /// Predators start seeking inside this distance
    pub const HUNT_RADIUS: f32 = 240.0;
    /// Predators give up beyond `HUNT_RADIUS * HUNT_HYSTERESIS`
    pub const HUNT_HYSTERESIS: f32 = 1.5;

    /// Wander circle radius and per-tick angle jitter
    pub const WANDER_RADIUS: f32 = 30.0;
    pub const WANDER_JITTER: f32 = 0.2;
    /// Initial wander angle offset
    pub const WANDER_THETA_START: f32 = std::f32::consts::FRAC_PI_2;

    /// Spawns stay this far inside the world edge
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Predators never spawn closer than this to the player
    pub const PREDATOR_SPAWN_CLEARANCE: f32 = HUNT_RADIUS * HUNT_HYSTERESIS;

    /// Animation frames held per sprite frame
    pub const FRAME_HOLD: u32 = 6;
}

/// Heading of a velocity (radians, `atan2(y, x)`)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a screen-space pointer to a world-space target.
///
/// The camera keeps `camera_center` in the middle of the viewport, so the
/// pointer's offset from the viewport centre is its offset from the camera.
#[inline]
pub fn screen_to_world(pointer: Vec2, viewport: Vec2, camera_center: Vec2) -> Vec2 {
    camera_center + (pointer - viewport / 2.0)
}
