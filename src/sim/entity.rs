//! Entities and kinematic integration
//!
//! Every game object is one [`Entity`] record. The `kind` tag selects the
//! profile (size, speed, force) and the [`Behavior`] payload carries the
//! little state that differs per kind.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::WANDER_THETA_START;
use crate::tuning::KindProfile;
use crate::vector::SteeringVec;

/// Stable entity handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player always has id 0
    pub const PLAYER: EntityId = EntityId(0);
}

/// What an entity is; fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Prey,
    Predator,
    Collectible,
    Trap,
}

impl EntityKind {
    /// Moves under its own steering each tick
    pub fn is_mobile(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Prey | EntityKind::Predator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Prey => "prey",
            EntityKind::Predator => "predator",
            EntityKind::Collectible => "collectible",
            EntityKind::Trap => "trap",
        }
    }
}

/// Predator hunting state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HuntState {
    #[default]
    Wandering,
    Seeking,
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Player-controlled eel
    Pilot {
        /// Follows the pointer when true (toggled by click)
        is_movable: bool,
        /// Overlapping a trap this tick
        is_trapped: bool,
        alive: bool,
    },
    /// Predator: wanders until the player comes close, then seeks
    Hunter { state: HuntState, wander_theta: f32 },
    /// Prey: wanders forever
    Wanderer { wander_theta: f32 },
    /// Collectibles and traps
    Inert,
}

impl Behavior {
    /// Initial behavior for a kind
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player => Behavior::Pilot {
                is_movable: true,
                is_trapped: false,
                alive: true,
            },
            EntityKind::Predator => Behavior::Hunter {
                state: HuntState::Wandering,
                wander_theta: WANDER_THETA_START,
            },
            EntityKind::Prey => Behavior::Wanderer {
                wander_theta: WANDER_THETA_START,
            },
            EntityKind::Collectible | EntityKind::Trap => Behavior::Inert,
        }
    }
}

/// A game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Force accumulator, zeroed after every integration
    pub acc: Vec2,
    pub width: f32,
    pub height: f32,
    /// Radians; heading + 90 degrees once the entity has moved
    pub rotation: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub behavior: Behavior,
    /// Set by the collision pass, cleared at the start of the next one
    #[serde(skip)]
    pub is_colliding: bool,
    /// Deferred deletion; compacted after the tick's update pass
    #[serde(skip)]
    pub marked_for_removal: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, profile: &KindProfile) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            width: profile.width,
            height: profile.height,
            rotation: 0.0,
            max_speed: profile.max_speed,
            max_force: profile.max_force,
            behavior: Behavior::for_kind(kind),
            is_colliding: false,
            marked_for_removal: false,
        }
    }

    /// Accumulate a steering force for this tick
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Advance one tick with the given speed cap.
    ///
    /// Velocity picks up the accumulated force, is clamped to `max_speed`,
    /// and moves the entity. The rotation follows the heading (+90 degrees
    /// for the sprite orientation) and the accumulator is cleared. A stopped
    /// entity has no heading, so the heading formula is not applied and it
    /// keeps its last rotation instead of snapping to 90 degrees.
    pub fn integrate(&mut self, max_speed: f32) {
        self.vel = (self.vel + self.acc).limit(max_speed);
        self.pos += self.vel;
        if self.vel != Vec2::ZERO {
            self.rotation = self.vel.angle() + std::f32::consts::FRAC_PI_2;
        }
        self.acc = Vec2::ZERO;
    }

    /// Clamp the bounding box inside `[min, max]`; velocity is kept
    pub fn contain(&mut self, min: Vec2, max: Vec2) {
        self.pos.x = self.pos.x.min(max.x - self.width).max(min.x);
        self.pos.y = self.pos.y.min(max.y - self.height).max(min.y);
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Collision shape
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size(),
            rotation: self.rotation,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() / 2.0
    }

    /// Player still alive (always true for non-players)
    pub fn is_alive(&self) -> bool {
        match self.behavior {
            Behavior::Pilot { alive, .. } => alive,
            _ => true,
        }
    }

    pub fn is_trapped(&self) -> bool {
        matches!(self.behavior, Behavior::Pilot { is_trapped: true, .. })
    }

    pub fn is_movable(&self) -> bool {
        matches!(self.behavior, Behavior::Pilot { is_movable: true, .. })
    }

    /// Predator hunting state, if this is a predator
    pub fn hunt_state(&self) -> Option<HuntState> {
        match self.behavior {
            Behavior::Hunter { state, .. } => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn predator() -> Entity {
        let tuning = Tuning::default();
        Entity::new(EntityId(1), EntityKind::Predator, Vec2::ZERO, &tuning.predator)
    }

    #[test]
    fn test_new_uses_profile() {
        let e = predator();
        assert_eq!((e.width, e.height), (48.0, 64.0));
        assert_eq!(e.max_speed, 2.5);
        assert_eq!(e.hunt_state(), Some(HuntState::Wandering));
        assert!(e.is_alive());
    }

    #[test]
    fn test_integrate_resets_acceleration() {
        let mut e = predator();
        e.apply_force(Vec2::new(0.1, 0.0));
        e.apply_force(Vec2::new(0.0, 0.1));
        e.integrate(e.max_speed);
        assert_eq!(e.acc, Vec2::ZERO);
        assert!((e.vel - Vec2::new(0.1, 0.1)).length() < 1e-6);
        assert!((e.pos - Vec2::new(0.1, 0.1)).length() < 1e-6);
    }

    #[test]
    fn test_integrate_rotation_offset() {
        let mut e = predator();
        e.apply_force(Vec2::new(1.0, 0.0));
        e.integrate(e.max_speed);
        assert!((e.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_stopped_entity_keeps_rotation() {
        let mut e = predator();
        e.integrate(e.max_speed);
        assert_eq!(e.rotation, 0.0);

        e.apply_force(Vec2::new(0.0, 1.0));
        e.integrate(e.max_speed);
        let heading = e.rotation;
        e.vel = Vec2::ZERO;
        e.integrate(e.max_speed);
        assert_eq!(e.rotation, heading);
    }

    #[test]
    fn test_contain_clamps_position_keeps_velocity() {
        let mut e = predator();
        e.pos = Vec2::new(1000.0, -1000.0);
        e.vel = Vec2::new(2.0, -2.0);
        e.contain(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0));
        assert_eq!(e.pos, Vec2::new(100.0 - 48.0, -100.0));
        assert_eq!(e.vel, Vec2::new(2.0, -2.0));
    }

    proptest! {
        #[test]
        fn velocity_bounded_after_integration(
            vx in -50.0f32..50.0, vy in -50.0f32..50.0,
            fx in -5.0f32..5.0, fy in -5.0f32..5.0,
            max_speed in 0.1f32..10.0,
        ) {
            let mut e = predator();
            e.vel = Vec2::new(vx, vy);
            e.apply_force(Vec2::new(fx, fy));
            e.integrate(max_speed);
            prop_assert!(e.vel.length() <= max_speed + 1e-4);
            prop_assert_eq!(e.acc, Vec2::ZERO);
        }
    }
}
