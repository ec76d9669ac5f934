//! Per-entity sprite instances for the renderer
//!
//! The simulation doesn't draw. It hands the renderer one [`SpriteInstance`]
//! per entity, laid out for direct upload into a GPU instance buffer.

use bytemuck::{Pod, Zeroable};

use crate::consts::FRAME_HOLD;
use crate::sim::{Entity, EntityKind, GameState};

/// One sprite to draw
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in world space
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Radians about the sprite centre
    pub rotation: f32,
    /// Column in the sprite sheet
    pub frame: u32,
    /// Sprite sheet selector (see [`kind_index`])
    pub kind: u32,
}

/// Stable sprite sheet index per kind
pub fn kind_index(kind: EntityKind) -> u32 {
    match kind {
        EntityKind::Player => 0,
        EntityKind::Prey => 1,
        EntityKind::Predator => 2,
        EntityKind::Collectible => 3,
        EntityKind::Trap => 4,
    }
}

/// Sprite frame for an animation counter: each frame is held `FRAME_HOLD` ticks
#[inline]
pub fn sprite_frame(counter: u32, frame_count: u32) -> u32 {
    (counter / FRAME_HOLD) % frame_count.max(1)
}

fn instance(entity: &Entity, frame: u32) -> SpriteInstance {
    SpriteInstance {
        position: entity.pos.to_array(),
        size: [entity.width, entity.height],
        rotation: entity.rotation,
        frame,
        kind: kind_index(entity.kind),
    }
}

/// Sprite instances for every live entity, player last (drawn on top)
pub fn extract_instances(state: &GameState, counter: u32) -> Vec<SpriteInstance> {
    let mut out = Vec::with_capacity(state.entities.len() + 1);
    for entity in state.entities.iter().filter(|e| !e.marked_for_removal) {
        let frames = state.tuning.profile(entity.kind).frame_count;
        out.push(instance(entity, sprite_frame(counter, frames)));
    }
    let frames = state.tuning.player.frame_count;
    out.push(instance(&state.player, sprite_frame(counter, frames)));
    out
}

/// Raw bytes for a GPU instance buffer upload
pub fn as_bytes(instances: &[SpriteInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Flatten to 7 floats per instance (frame and kind converted, not bit-cast)
pub fn to_floats(instances: &[SpriteInstance]) -> Vec<f32> {
    instances
        .iter()
        .flat_map(|i| {
            [
                i.position[0],
                i.position[1],
                i.size[0],
                i.size[1],
                i.rotation,
                i.frame as f32,
                i.kind as f32,
            ]
        })
        .collect()
}
