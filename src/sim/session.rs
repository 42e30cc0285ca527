//! Session control and frame timing
//!
//! The host owns the loop: it samples a timestamp, turns it into `dt` with a
//! `FrameClock`, calls `Session::tick`, drains events and composes a frame.

use super::events::SimEvent;
use super::level::Level;
use super::state::{GameState, SessionPhase};
use super::tick::{TickInput, tick};
use crate::consts::{FRAME_INTERVAL_MS, MAX_FRAME_STEP};
use crate::renderer::{FrameView, ViewConfig, compose_frame};
use crate::settings::Settings;

/// Converts host timestamps into frame-unit deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    interval_ms: f64,
    max_step: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_STEP)
    }
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            last_ms: None,
            interval_ms: FRAME_INTERVAL_MS,
            max_step: max_step.max(0.0),
        }
    }

    /// Frames elapsed since the previous sample, clamped to `[0, max_step]`
    ///
    /// The first sample has no reference point and counts as one frame.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(prev) => ((now_ms - prev) / self.interval_ms) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, self.max_step)
    }

    /// Forget the last sample (e.g. after the loop was paused)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// A game session: owns the state and gates ticking
#[derive(Debug)]
pub struct Session {
    state: GameState,
    running: bool,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let mut session = Self::with_level(Level::for_variant(settings.variant), settings.seed);
        session.state.look_sensitivity = settings.look_sensitivity;
        session
    }

    pub fn with_level(level: Level, seed: u64) -> Self {
        Self {
            state: GameState::new(level, seed),
            running: false,
        }
    }

    /// Reset every entity to its spawn and begin running
    pub fn start(&mut self) {
        self.state.reset();
        self.running = true;
        log::info!(
            "Session started: {} enemies, seed {:#x}",
            self.state.enemies.len(),
            self.state.seed
        );
    }

    /// Stop ticking; state is kept as-is
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped at tick {}", self.state.time_ticks);
        }
        self.running = false;
    }

    /// Same reset as `start`, from any phase
    pub fn restart(&mut self) {
        log::info!("Session restart (was {:?})", self.state.phase);
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Advance one tick; a no-op while stopped or after the run has ended
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if self.running {
            tick(&mut self.state, input, dt);
        }
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.state.events.drain().collect()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frame(&self, config: &ViewConfig) -> FrameView {
        compose_frame(&self.state, config)
    }
}
