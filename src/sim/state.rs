//! Game state and the entity arena
//!
//! The player lives outside the arena; every other entity sits in
//! `entities` in spawn order with a stable [`EntityId`]. Removal is deferred:
//! entities are marked during a pass and compacted afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::rng::UniformSource;
use crate::tuning::{LevelConfig, LevelTable, Tuning};

/// Why a run ended badly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Touched by a predator
    Eaten,
    /// Level time limit ran out
    TimeExpired,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended in failure
    GameOver(Outcome),
    /// Final level cleared
    Victory,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "playing",
            GamePhase::GameOver(Outcome::Eaten) => "eaten",
            GamePhase::GameOver(Outcome::TimeExpired) => "time_expired",
            GamePhase::Victory => "victory",
        }
    }
}

/// World rectangle entities are clamped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    /// Rectangle centered on the origin
    pub fn centered(half_extents: Vec2) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub levels: LevelTable,
    /// Current level index (0-based)
    pub level_index: usize,
    /// Ticks spent in the current level
    pub level_ticks: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub bounds: WorldBounds,
    pub player: Entity,
    /// Non-player entities in spawn order
    pub entities: Vec<Entity>,
    /// Collectibles picked up this session
    pub collected: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session with the player at the world origin and level 0 populated
    pub fn new<R: UniformSource + ?Sized>(tuning: Tuning, levels: LevelTable, rng: &mut R) -> Self {
        let mut state = Self::empty(tuning, levels);
        state.populate_level(rng);
        state
    }

    /// Create a session with no entities besides the player (tests and scripted setups)
    pub fn empty(tuning: Tuning, levels: LevelTable) -> Self {
        let bounds = WorldBounds::centered(tuning.world_half_extents());
        let player = Entity::new(EntityId::PLAYER, EntityKind::Player, Vec2::ZERO, &tuning.player);
        Self {
            tuning,
            levels,
            level_index: 0,
            level_ticks: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            bounds,
            player,
            entities: Vec::new(),
            collected: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity of `kind` at `pos` (top-left)
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2) -> EntityId {
        debug_assert!(kind != EntityKind::Player, "the player is not spawned into the arena");
        let id = self.next_entity_id();
        let entity = Entity::new(id, kind, pos, self.tuning.profile(kind));
        self.entities.push(entity);
        id
    }

    /// Mark an entity for removal; it disappears at the next [`GameState::compact`]
    pub fn despawn(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.marked_for_removal = true;
                true
            }
            None => false,
        }
    }

    /// Drop every entity marked for removal
    pub fn compact(&mut self) {
        self.entities.retain(|e| !e.marked_for_removal);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        if id == EntityId::PLAYER {
            return Some(&self.player);
        }
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id == EntityId::PLAYER {
            return Some(&mut self.player);
        }
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind == kind && !e.marked_for_removal)
            .count()
    }

    /// Collectibles still to pick up in this level
    pub fn remaining_collectibles(&self) -> usize {
        self.count(EntityKind::Collectible)
    }

    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.levels.get(self.level_index)
    }

    /// Level time limit in ticks (None = unlimited)
    pub fn level_tick_limit(&self) -> Option<u64> {
        self.current_level()
            .filter(|level| level.time_limit > 0)
            .map(|level| (level.time_limit as f32 * self.tuning.tick_rate).round() as u64)
    }

    /// Replace the arena with the current level's population
    pub fn populate_level<R: UniformSource + ?Sized>(&mut self, rng: &mut R) {
        self.entities.clear();
        self.level_ticks = 0;
        let Some(level) = self.current_level().copied() else {
            log::warn!("No level config for index {}", self.level_index);
            return;
        };

        for _ in 0..level.collectible_count {
            let pos = self.random_spawn(EntityKind::Collectible, rng);
            self.spawn(EntityKind::Collectible, pos);
        }
        for _ in 0..level.predator_count {
            let pos = self.predator_spawn(rng);
            self.spawn(EntityKind::Predator, pos);
        }
        for _ in 0..level.prey_count {
            let pos = self.random_spawn(EntityKind::Prey, rng);
            self.spawn(EntityKind::Prey, pos);
        }
        for _ in 0..level.trap_count {
            let pos = self.random_spawn(EntityKind::Trap, rng);
            self.spawn(EntityKind::Trap, pos);
        }

        log::info!(
            "Level {}: {} eggs, {} sharks, {} fish, {} traps",
            self.level_index + 1,
            level.collectible_count,
            level.predator_count,
            level.prey_count,
            level.trap_count
        );
    }

    /// Uniform position inside the world, `spawn_margin` from the edges
    fn random_spawn<R: UniformSource + ?Sized>(&self, kind: EntityKind, rng: &mut R) -> Vec2 {
        let profile = self.tuning.profile(kind);
        let margin = self.tuning.spawn_margin;
        let min = self.bounds.min + Vec2::splat(margin);
        let max = (self.bounds.max - Vec2::splat(margin) - Vec2::new(profile.width, profile.height)).max(min);
        Vec2::new(rng.uniform(min.x, max.x), rng.uniform(min.y, max.y))
    }

    /// Spawn point for a predator, rerolled a few times to keep clear of the player
    fn predator_spawn<R: UniformSource + ?Sized>(&self, rng: &mut R) -> Vec2 {
        const ATTEMPTS: u32 = 16;
        let clearance = self.tuning.predator_spawn_clearance;
        let mut pos = self.random_spawn(EntityKind::Predator, rng);
        for _ in 1..ATTEMPTS {
            if pos.distance(self.player.pos) >= clearance {
                break;
            }
            pos = self.random_spawn(EntityKind::Predator, rng);
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::seeded;

    #[test]
    fn test_new_populates_first_level() {
        let mut rng = seeded(12345);
        let state = GameState::new(Tuning::default(), LevelTable::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.remaining_collectibles(), 10);
        assert_eq!(state.count(EntityKind::Predator), 2);
        assert_eq!(state.count(EntityKind::Prey), 15);
        assert_eq!(state.count(EntityKind::Trap), 4);
        assert!(state.player.is_alive());
    }

    #[test]
    fn test_spawns_inside_world() {
        let mut rng = seeded(7);
        let state = GameState::new(Tuning::default(), LevelTable::default(), &mut rng);
        for e in &state.entities {
            assert!(e.pos.x >= state.bounds.min.x && e.pos.x + e.width <= state.bounds.max.x);
            assert!(e.pos.y >= state.bounds.min.y && e.pos.y + e.height <= state.bounds.max.y);
        }
    }

    #[test]
    fn test_predators_spawn_clear_of_player() {
        let mut rng = seeded(99);
        let state = GameState::new(Tuning::default(), LevelTable::default(), &mut rng);
        let clearance = state.tuning.predator_spawn_clearance;
        for e in state.entities.iter().filter(|e| e.kind == EntityKind::Predator) {
            assert!(e.pos.distance(state.player.pos) >= clearance);
        }
    }

    #[test]
    fn test_ids_are_stable_and_unique() {
        let mut state = GameState::empty(Tuning::default(), LevelTable::default());
        let a = state.spawn(EntityKind::Collectible, Vec2::ZERO);
        let b = state.spawn(EntityKind::Collectible, Vec2::ONE);
        let c = state.spawn(EntityKind::Trap, Vec2::splat(2.0));
        assert_ne!(a, b);
        assert!(state.despawn(b));
        // Still present until compaction
        assert_eq!(state.entities.len(), 3);
        assert_eq!(state.remaining_collectibles(), 1);
        state.compact();
        assert_eq!(state.entities.len(), 2);
        assert!(state.get(b).is_none());
        assert_eq!(state.get(c).map(|e| e.kind), Some(EntityKind::Trap));
        assert!(!state.despawn(b));
    }

    #[test]
    fn test_level_tick_limit() {
        let state = GameState::empty(Tuning::default(), LevelTable::default());
        assert_eq!(state.level_tick_limit(), Some(3600));

        let mut levels = LevelTable::default();
        levels.levels[0].time_limit = 0;
        let state = GameState::empty(Tuning::default(), levels);
        assert_eq!(state.level_tick_limit(), None);
    }
}
