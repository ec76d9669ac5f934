//! Per-tick simulation step
//!
//! Order within a tick:
//! 1. Player steering toward the pointer, integration, containment
//! 2. Predator/prey steering, integration, containment
//! 3. Player-vs-entity collisions and their effects
//! 4. Compaction of removed entities
//! 5. Level and session progression

use glam::Vec2;

use super::collision::rects_overlap;
use super::entity::{Behavior, EntityKind, HuntState};
use super::hunt;
use super::rng::UniformSource;
use super::state::{GamePhase, GameState, Outcome};
use super::steering::seek;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World-space steering target for the player
    pub pointer: Option<Vec2>,
    /// Toggle whether the player follows the pointer (click)
    pub toggle_movable: bool,
    /// Idle/demo mode - the autopilot steers the player
    pub idle_mode: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Collectibles picked up this tick
    pub collected: u32,
    pub trapped: bool,
    pub eaten: bool,
    /// Advanced to the next level this tick
    pub level_cleared: bool,
}

/// Advance the game state by one tick
pub fn tick<R: UniformSource + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) -> TickReport {
    let mut report = TickReport::default();
    if state.phase.is_over() {
        return report;
    }

    state.time_ticks += 1;
    state.level_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        input.pointer = autopilot_target(state).or(input.pointer);
    }

    update_player(state, &input);
    update_agents(state, rng);
    resolve_collisions(state, &mut report);
    state.compact();
    update_progression(state, &mut report, rng);

    report
}

/// Demo steering target: swim away from the closest hunting predator,
/// otherwise head for the nearest egg.
pub fn autopilot_target(state: &GameState) -> Option<Vec2> {
    let player = state.player.center();
    let closest = |kind: EntityKind| {
        state
            .entities
            .iter()
            .filter(move |e| e.kind == kind && !e.marked_for_removal)
            .map(|e| (e.center(), e.center().distance(player)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    };

    let threat = state
        .entities
        .iter()
        .filter(|e| e.hunt_state() == Some(HuntState::Seeking))
        .map(|e| (e.center(), e.center().distance(player)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((predator, _)) = threat {
        return Some(state.player.pos + (player - predator));
    }
    closest(EntityKind::Collectible).map(|(egg, _)| egg - state.player.size() / 2.0)
}

fn update_player(state: &mut GameState, input: &TickInput) {
    let trapped_speed = state.tuning.trapped_speed;
    let bounds = state.bounds;
    let player = &mut state.player;

    if let Behavior::Pilot { ref mut is_movable, .. } = player.behavior {
        if input.toggle_movable {
            *is_movable = !*is_movable;
        }
    }

    if player.is_movable() {
        if let Some(target) = input.pointer {
            let force = seek(player.vel, target, player.pos, player.max_speed, player.max_force);
            player.apply_force(force);
        }
        // Trap slow-down comes from the previous collision pass
        let max_speed = if player.is_trapped() {
            trapped_speed.min(player.max_speed)
        } else {
            player.max_speed
        };
        player.integrate(max_speed);
    }
    player.contain(bounds.min, bounds.max);
}

fn update_agents<R: UniformSource + ?Sized>(state: &mut GameState, rng: &mut R) {
    let target = state.player.pos;
    let bounds = state.bounds;
    let tuning = &state.tuning;

    for entity in state.entities.iter_mut().filter(|e| e.kind.is_mobile()) {
        hunt::steer(entity, target, tuning, rng);
        entity.integrate(entity.max_speed);
        entity.contain(bounds.min, bounds.max);
    }
}

/// Test the player against every entity and apply the effects.
///
/// Collected entities are only marked here; the arena is compacted after
/// the pass so no neighbour is skipped.
fn resolve_collisions(state: &mut GameState, report: &mut TickReport) {
    let player_rect = state.player.rect();
    let mut player_hit = false;
    let mut trapped = false;
    let mut eaten = false;

    for entity in state.entities.iter_mut() {
        entity.is_colliding = false;
        if entity.marked_for_removal || !rects_overlap(&player_rect, &entity.rect()) {
            continue;
        }

        entity.is_colliding = true;
        player_hit = true;
        match entity.kind {
            EntityKind::Collectible => {
                entity.marked_for_removal = true;
                report.collected += 1;
                log::debug!("Collected egg {:?}", entity.id);
            }
            EntityKind::Predator => eaten = true,
            EntityKind::Trap => trapped = true,
            EntityKind::Prey | EntityKind::Player => {}
        }
    }

    state.player.is_colliding = player_hit;
    if let Behavior::Pilot {
        ref mut is_trapped,
        ref mut alive,
        ..
    } = state.player.behavior
    {
        *is_trapped = trapped;
        if eaten {
            *alive = false;
        }
    }

    state.collected += report.collected;
    report.trapped = trapped;
    report.eaten = eaten;
}

fn update_progression<R: UniformSource + ?Sized>(state: &mut GameState, report: &mut TickReport, rng: &mut R) {
    if !state.player.is_alive() {
        log::info!("Eaten on level {} after {} ticks", state.level_index + 1, state.time_ticks);
        state.phase = GamePhase::GameOver(Outcome::Eaten);
        return;
    }

    if state.remaining_collectibles() == 0 {
        if state.levels.is_final(state.level_index) {
            log::info!("All levels cleared in {} ticks", state.time_ticks);
            state.phase = GamePhase::Victory;
        } else {
            state.level_index += 1;
            report.level_cleared = true;
            log::info!("Level cleared, advancing to level {}", state.level_index + 1);
            state.populate_level(rng);
        }
        return;
    }

    if let Some(limit) = state.level_tick_limit() {
        if state.level_ticks >= limit {
            log::info!("Time expired on level {}", state.level_index + 1);
            state.phase = GamePhase::GameOver(Outcome::TimeExpired);
        }
    }
}
