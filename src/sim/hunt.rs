//! Predator behavior: wander until the player is close, then give chase.
//!
//! The exit distance is larger than the entry distance so a predator
//! hovering near the hunt radius doesn't flip state every tick.

use glam::Vec2;

use super::entity::{Behavior, Entity, HuntState};
use super::rng::UniformSource;
use super::steering::{WanderParams, seek, wander};
use crate::tuning::Tuning;
use crate::vector::SteeringVec;

/// Next hunting state given the distance to the target
pub fn next_hunt_state(state: HuntState, distance: f32, enter_radius: f32, exit_radius: f32) -> HuntState {
    match state {
        HuntState::Wandering if distance < enter_radius => HuntState::Seeking,
        HuntState::Seeking if distance > exit_radius => HuntState::Wandering,
        _ => state,
    }
}

/// Run one tick of a wandering/hunting entity: update its state, then
/// accumulate the steering force for it. Entities without a steering
/// behavior are left untouched.
pub fn steer<R: UniformSource + ?Sized>(entity: &mut Entity, target: Vec2, tuning: &Tuning, rng: &mut R) {
    let params = WanderParams {
        projection: tuning.profile(entity.kind).wander_projection,
        radius: tuning.wander_radius,
        jitter: tuning.wander_jitter,
        max_force: entity.max_force,
    };

    let force = match entity.behavior {
        Behavior::Hunter { state, wander_theta } => {
            let distance = entity.pos.distance_to(target);
            let next = next_hunt_state(state, distance, tuning.hunt_radius, tuning.hunt_exit_radius());
            if next != state {
                log::debug!("predator {:?}: {:?} -> {:?} at {:.1}", entity.id, state, next, distance);
            }

            match next {
                HuntState::Wandering => {
                    let (force, theta) = wander(entity.vel, wander_theta, &params, rng);
                    entity.behavior = Behavior::Hunter { state: next, wander_theta: theta };
                    force
                }
                HuntState::Seeking => {
                    entity.behavior = Behavior::Hunter { state: next, wander_theta };
                    seek(entity.vel, target, entity.pos, entity.max_speed, entity.max_force)
                }
            }
        }
        Behavior::Wanderer { wander_theta } => {
            let (force, theta) = wander(entity.vel, wander_theta, &params, rng);
            entity.behavior = Behavior::Wanderer { wander_theta: theta };
            force
        }
        Behavior::Pilot { .. } | Behavior::Inert => return,
    };

    entity.apply_force(force);
}
