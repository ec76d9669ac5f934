//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per admitted frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod hunt;
pub mod rng;
pub mod session;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{Rect, aabb_overlap, polygons_intersect, rect_to_polygon, rects_overlap, sat_overlap};
pub use entity::{Behavior, Entity, EntityId, EntityKind, HuntState};
pub use rng::{UniformSource, seeded};
pub use session::{FrameGate, Session};
pub use state::{GamePhase, GameState, Outcome, WorldBounds};
pub use steering::{WanderParams, flee, seek, wander};
pub use tick::{TickInput, TickReport, tick};
