//! Host-facing session driver
//!
//! The host calls [`Session::frame`] from its frame callback. A frame only
//! runs a tick when more than the target interval has passed since the last
//! admitted frame; slow frames run a single tick with no catch-up.

use rand_pcg::Pcg32;

use super::rng::seeded;
use super::state::GameState;
use super::tick::{TickInput, TickReport, tick};
use crate::consts::FRAME_INTERVAL_MS;
use crate::tuning::{LevelTable, Tuning};

/// Minimum-elapsed-time gate in front of the simulation
#[derive(Debug, Clone)]
pub struct FrameGate {
    interval_ms: f64,
    last_ms: f64,
    fps: u32,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL_MS)
    }
}

impl FrameGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_ms: 0.0,
            fps: 0,
        }
    }

    /// True if a frame at `now_ms` should run; records it as the last frame
    pub fn admit(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.last_ms;
        if elapsed > self.interval_ms {
            self.fps = (1000.0 / elapsed).round() as u32;
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Rate measured from the last two admitted frames
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// A running game: state, its seeded RNG, the frame gate and pending input
pub struct Session {
    pub state: GameState,
    rng: Pcg32,
    gate: FrameGate,
    input: TickInput,
    /// Admitted frames (drives sprite animation)
    frames: u32,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning, levels: LevelTable) -> Self {
        let mut rng = seeded(seed);
        let state = GameState::new(tuning, levels, &mut rng);
        log::info!("Session started with seed {}", seed);
        Self {
            state,
            rng,
            gate: FrameGate::default(),
            input: TickInput::default(),
            frames: 0,
        }
    }

    /// Latest world-space steering target
    pub fn set_pointer(&mut self, pointer: glam::Vec2) {
        self.input.pointer = Some(pointer);
    }

    /// Queue a movable toggle for the next tick
    pub fn toggle_movable(&mut self) {
        self.input.toggle_movable = !self.input.toggle_movable;
    }

    /// Hand the player to the autopilot (attract screen, headless runs)
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Run one tick if the gate admits `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> Option<TickReport> {
        if !self.gate.admit(now_ms) {
            return None;
        }
        self.frames = self.frames.wrapping_add(1);
        let report = tick(&mut self.state, &self.input, &mut self.rng);
        // One-shot inputs are consumed by the tick
        self.input.toggle_movable = false;
        Some(report)
    }

    pub fn fps(&self) -> u32 {
        self.gate.fps()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_gate_skips_early_calls() {
        let mut gate = FrameGate::default();
        assert!(gate.admit(20.0));
        assert!(!gate.admit(30.0));
        assert!(!gate.admit(36.0));
        assert!(gate.admit(40.0));
        assert_eq!(gate.fps(), 50);
    }

    #[test]
    fn test_gate_slow_frame_admits_once() {
        let mut gate = FrameGate::default();
        assert!(gate.admit(100.0));
        // 100 ms gap: a single admission, no catch-up
        assert!(gate.admit(200.0));
        assert_eq!(gate.fps(), 10);
        assert!(!gate.admit(201.0));
    }

    #[test]
    fn test_session_frame_drives_ticks() {
        let mut session = Session::new(42, Tuning::default(), LevelTable::default());
        assert!(session.frame(5.0).is_none());
        assert!(session.frame(17.0).is_some());
        assert!(session.frame(20.0).is_none());
        assert!(session.frame(34.0).is_some());
        assert_eq!(session.state.time_ticks, 2);
        assert_eq!(session.frames(), 2);
        assert_eq!(session.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_idle_mode_moves_player_without_pointer() {
        let mut session = Session::new(7, Tuning::default(), LevelTable::default());
        session.set_idle_mode(true);
        let mut now = 0.0;
        for _ in 0..10 {
            now += 20.0;
            session.frame(now);
        }
        assert_ne!(session.state.player.pos, glam::Vec2::ZERO);
    }

    #[test]
    fn test_toggle_is_one_shot() {
        let mut session = Session::new(42, Tuning::default(), LevelTable::default());
        session.toggle_movable();
        session.frame(20.0);
        assert!(!session.state.player.is_movable());
        session.frame(40.0);
        assert!(!session.state.player.is_movable());
    }
}
