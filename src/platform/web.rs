//! Browser binding for a game session

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::render::{extract_instances, to_floats};
use crate::screen_to_world;
use crate::sim::Session;
use crate::tuning::{LevelTable, Tuning};

/// A session driven from JavaScript's `requestAnimationFrame`
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    viewport: Vec2,
}

#[wasm_bindgen]
impl WebSession {
    /// Start a session; `levels_json` overrides the default level table.
    /// Without a seed the current time is used.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, width: f32, height: f32, levels_json: Option<String>) -> WebSession {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let levels = match levels_json.as_deref().map(LevelTable::from_json) {
            Some(Ok(levels)) => levels,
            Some(Err(e)) => {
                log::warn!("Ignoring level table: {}", e);
                LevelTable::default()
            }
            None => LevelTable::default(),
        };
        let tuning = Tuning {
            viewport_width: width,
            viewport_height: height,
            ..Tuning::default()
        };
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid viewport, using defaults: {}", e);
                Tuning::default()
            }
        };
        let viewport = Vec2::new(tuning.viewport_width, tuning.viewport_height);
        WebSession {
            session: Session::new(seed, tuning, levels),
            viewport,
        }
    }

    /// Pointer in canvas coordinates; the camera is centred on the player
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let camera = self.session.state.player.pos;
        let target = screen_to_world(Vec2::new(x, y), self.viewport, camera);
        self.session.set_pointer(target);
    }

    pub fn toggle_movable(&mut self) {
        self.session.toggle_movable();
    }

    /// Let the autopilot play (title screen attract mode)
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.session.set_idle_mode(idle);
    }

    /// Returns true if a tick ran (the host should redraw)
    pub fn frame(&mut self, timestamp: f64) -> bool {
        self.session.frame(timestamp).is_some()
    }

    /// Flattened sprite instances, 7 floats each
    pub fn instances(&self) -> Vec<f32> {
        to_floats(&extract_instances(&self.session.state, self.session.frames()))
    }

    pub fn phase(&self) -> String {
        self.session.state.phase.as_str().to_string()
    }

    /// 1-based level number
    pub fn level(&self) -> u32 {
        self.session.state.level_index as u32 + 1
    }

    pub fn remaining_collectibles(&self) -> u32 {
        self.session.state.remaining_collectibles() as u32
    }

    pub fn fps(&self) -> u32 {
        self.session.fps()
    }

    pub fn player_x(&self) -> f32 {
        self.session.state.player.pos.x
    }

    pub fn player_y(&self) -> f32 {
        self.session.state.player.pos.y
    }
}
