//! Steering force generators
//!
//! Each behavior returns a force bounded by `max_force`; callers accumulate
//! it into the entity's acceleration.

use glam::Vec2;

use super::rng::UniformSource;
use crate::polar_to_cartesian;
use crate::vector::SteeringVec;

/// Steer toward `target` at full speed
pub fn seek(velocity: Vec2, target: Vec2, position: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    let desired = (target - position).set_magnitude(max_speed);
    (desired - velocity).limit(max_force)
}

/// Steer directly away from `target`
pub fn flee(velocity: Vec2, target: Vec2, position: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    -seek(velocity, target, position, max_speed, max_force)
}

/// Parameters of the wander circle
#[derive(Debug, Clone, Copy)]
pub struct WanderParams {
    /// Distance of the circle centre ahead of the entity
    pub projection: f32,
    /// Circle radius
    pub radius: f32,
    /// Max change of the wander angle per tick
    pub jitter: f32,
    pub max_force: f32,
}

/// Smooth random steering.
///
/// Projects a point ahead along the current velocity, pushes it around a
/// circle by the accumulated `wander_theta` (relative to the heading) and
/// returns it rescaled to `max_force`, along with the next wander angle.
pub fn wander<R: UniformSource + ?Sized>(
    velocity: Vec2,
    wander_theta: f32,
    params: &WanderParams,
    rng: &mut R,
) -> (Vec2, f32) {
    let ahead = velocity.set_magnitude(params.projection);
    let theta = wander_theta + velocity.angle();
    let point = ahead + polar_to_cartesian(params.radius, theta);
    let force = point.set_magnitude(params.max_force);

    let next_theta = wander_theta + rng.uniform(-params.jitter, params.jitter);
    (force, next_theta)
}
